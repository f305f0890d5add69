use tracing::{debug, trace, trace_span};

use crate::body::{Body, BodyId};
use crate::config::WorldConfig;
use crate::math::Vec3;
use crate::narrowphase::{self, ContactEquation};
use crate::shape::{ConvexPolyhedron, Shape};
use crate::solver;

/// Owns every body in the simulation and steps them forward in time.
///
/// Bodies are stored densely and addressed only through [`BodyId`] — never
/// by reference — so the world stays freely movable and the body list can
/// be iterated without lifetime entanglement with callers holding ids.
#[derive(Clone, Debug)]
pub struct World {
    bodies: Vec<Body>,
    gravity: Vec3,
    config: WorldConfig,
}

impl World {
    #[must_use]
    pub fn new() -> Self {
        Self { bodies: Vec::new(), gravity: Vec3::new(0.0, -9.81, 0.0), config: WorldConfig::default() }
    }

    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self { config, ..Self::new() }
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    #[must_use]
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Registers `body`, returning its never-reused id. Ids are assigned
    /// densely in insertion order (`BodyId(0)`, `BodyId(1)`, ...).
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(u32::try_from(self.bodies.len()).expect("more bodies than u32::MAX"));
        trace!(body_id = id.0, "adding body");
        self.bodies.push(body);
        id
    }

    #[must_use]
    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.0 as usize]
    }

    pub fn body_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.0 as usize]
    }

    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Advances the simulation by `dt` seconds:
    /// apply gravity and accumulated forces, run narrow phase over every
    /// body pair, solve normal impulses for `config.iterations` Gauss-Seidel
    /// sweeps, integrate positions and orientations, then clear the
    /// per-body force/torque accumulators.
    pub fn step(&mut self, dt: f32) {
        let _span = trace_span!("physics::step", bodies = self.bodies.len()).entered();

        solver::apply_forces(&mut self.bodies, self.gravity, dt);

        let contacts = self.gather_contacts();
        debug!(contact_count = contacts.len(), "narrow phase done");

        solver::solve(&mut self.bodies, &contacts, |id| id.0 as usize, dt, &self.config);
        solver::integrate(&mut self.bodies, dt);

        for body in &mut self.bodies {
            body.clear_accumulators();
        }
    }

    /// Naive O(n²) narrow phase: every body pair, `i < j`, is tested once.
    fn gather_contacts(&self) -> Vec<ContactEquation> {
        let mut contacts = Vec::new();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let id_i = BodyId(u32::try_from(i).unwrap());
                let id_j = BodyId(u32::try_from(j).unwrap());
                contacts.extend(narrowphase::contacts_between(
                    id_i,
                    &self.bodies[i],
                    id_j,
                    &self.bodies[j],
                    &self.config,
                ));
            }
        }
        contacts
    }

    /// Calls `f` for every `(BodyId, ShapeId, &Shape)` across all bodies.
    pub fn fold_shapes<F: FnMut(BodyId, &Body, &Shape)>(&self, mut f: F) {
        for (index, body) in self.bodies.iter().enumerate() {
            let id = BodyId(u32::try_from(index).unwrap());
            for (_, shape) in body.shapes() {
                f(id, body, shape);
            }
        }
    }

    /// Runs narrow phase across every body pair and calls `f` once per
    /// resulting contact. Useful for external inspection (rendering,
    /// diagnostics) without re-running the solver.
    pub fn fold_contacts<F: FnMut(&ContactEquation)>(&self, mut f: F) {
        for contact in self.gather_contacts() {
            f(&contact);
        }
    }

    /// Calls `f` with every world-space face normal of every `Convex` shape
    /// in the world. Plane and sphere shapes contribute nothing.
    pub fn fold_face_normals<F: FnMut(BodyId, Vec3)>(&self, mut f: F) {
        self.fold_shapes(|id, body, shape| {
            if let Shape::Convex(hull) = shape {
                let transform = body.transform();
                for face_index in 0..hull.faces.len() {
                    f(id, hull.world_normal(face_index, &transform));
                }
            }
        });
    }

    /// Calls `f` with every world-space unique edge direction of every
    /// `Convex` shape in the world.
    pub fn fold_unique_edges<F: FnMut(BodyId, Vec3)>(&self, mut f: F) {
        self.fold_shapes(|id, body, shape| {
            if let Shape::Convex(hull) = shape {
                let transform = body.transform();
                for edge in hull.world_edges(&transform) {
                    f(id, edge);
                }
            }
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience used by tests and examples: a 1kg box-shaped body with a
/// plausible diagonal inverse inertia tensor for a unit cube.
#[must_use]
pub fn box_body(mass: f32, half_extents: Vec3, position: Vec3) -> Body {
    let (hx, hy, hz) = (half_extents.x, half_extents.y, half_extents.z);
    let inv_inertia = if mass > 0.0 {
        Vec3::new(
            12.0 / (mass * (hy * hy + hz * hz) * 4.0),
            12.0 / (mass * (hx * hx + hz * hz) * 4.0),
            12.0 / (mass * (hx * hx + hy * hy) * 4.0),
        )
    } else {
        Vec3::ZERO
    };
    let mut body = Body::new(mass).with_position(position).with_inv_inertia_world(inv_inertia);
    body.add_shape(Shape::Convex(ConvexPolyhedron::from_box(half_extents)));
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quat;

    #[test]
    fn body_ids_are_assigned_in_insertion_order() {
        let mut world = World::new();
        let a = world.add_body(Body::new(1.0));
        let b = world.add_body(Body::new(1.0));
        assert_eq!(a, BodyId(0));
        assert_eq!(b, BodyId(1));
    }

    #[test]
    fn zero_gravity_and_no_contacts_leaves_a_body_at_rest() {
        let mut world = World::new();
        world.set_gravity(Vec3::ZERO);
        let id = world.add_body(Body::new(1.0));
        for _ in 0..10 {
            world.step(0.01);
        }
        assert_eq!(world.body(id).position, Vec3::ZERO);
        assert_eq!(world.body(id).velocity, Vec3::ZERO);
    }

    #[test]
    fn free_falling_body_matches_analytic_solution() {
        let mut world = World::new();
        let id = world.add_body(Body::new(1.0).with_position(Vec3::new(0.0, 10.0, 0.0)));
        let dt = 0.001_f32;
        let steps = 100;
        for _ in 0..steps {
            world.step(dt);
        }
        let t = dt * steps as f32;
        let expected_y = 10.0 - 0.5 * 9.81 * t * t;
        assert!((world.body(id).position.y - expected_y).abs() < 1e-3);
    }

    #[test]
    fn s6_stacked_boxes_settle_without_sinking_or_exploding() {
        let mut world = World::new();
        let mut ground = Body::new(0.0).with_quaternion(Quat::from_angle_axis(-std::f32::consts::FRAC_PI_2, Vec3::X));
        ground.add_shape(Shape::Plane);
        world.add_body(ground);

        let half = Vec3::splat(0.5);
        let lower = world.add_body(box_body(1.0, half, Vec3::new(0.0, 0.5, 0.0)));
        let upper = world.add_body(box_body(1.0, half, Vec3::new(0.0, 1.5, 0.0)));

        for _ in 0..120 {
            world.step(1.0 / 60.0);
        }

        let lower_body = world.body(lower);
        let upper_body = world.body(upper);
        assert!(lower_body.position.y > 0.3, "lower sank: {}", lower_body.position.y);
        assert!(upper_body.position.y > 1.2, "upper sank: {}", upper_body.position.y);
        assert!(lower_body.velocity.length() < 2.0, "lower exploded: {:?}", lower_body.velocity);
        assert!(upper_body.velocity.length() < 2.0, "upper exploded: {:?}", upper_body.velocity);
    }

    #[test]
    fn fold_face_normals_skips_non_convex_shapes() {
        let mut world = World::new();
        let mut body = Body::new(0.0);
        body.add_shape(Shape::Plane);
        body.add_shape(Shape::Sphere(1.0));
        world.add_body(body);

        let mut count = 0;
        world.fold_face_normals(|_, _| count += 1);
        assert_eq!(count, 0);
    }
}
