//! Pairwise collision detection between attached shapes, dispatched on
//! shape kind. Produces ephemeral [`ContactEquation`]s consumed by the
//! solver for a single `World::step` and then discarded.

use crate::body::{Body, BodyId};
use crate::config::WorldConfig;
use crate::math::{Transform, Vec3};
use crate::shape::{clip_against_hull, find_separating_axis, ConvexPolyhedron, Shape};

/// One contact point between two bodies' shapes, valid only for the step
/// that produced it.
#[derive(Clone, Copy, Debug)]
pub struct ContactEquation {
    pub body1: BodyId,
    pub body2: BodyId,
    /// Contact normal, pointing from `body1` toward `body2`.
    pub ni: Vec3,
    /// Contact point relative to `body1`'s center of mass, world-aligned.
    pub ri: Vec3,
    /// Contact point relative to `body2`'s center of mass, world-aligned.
    pub rj: Vec3,
    /// Penetration depth, always `>= 0`; how far the two shapes overlap.
    pub depth: f32,
}

/// Runs narrow-phase collision detection for every pair of shapes between
/// `body1` and `body2`, in deterministic `(bodyId1, bodyId2)` order (the
/// caller is expected to only ever call this with `body1 < body2`).
///
/// Dispatch matrix:
/// - Plane–Plane: never produces contacts (two infinite planes either
///   coincide or never meet; neither is a useful simulation state).
/// - Plane–Convex: per-vertex penetration test against the plane.
/// - Convex–Convex: SAT via [`find_separating_axis`] then
///   [`clip_against_hull`].
/// - Any pair involving a `Sphere` is out of scope for this dispatch and
///   produces no contacts.
#[must_use]
pub fn contacts_between(
    id1: BodyId,
    body1: &Body,
    id2: BodyId,
    body2: &Body,
    config: &WorldConfig,
) -> Vec<ContactEquation> {
    let mut out = Vec::new();
    for (shape_id1, shape1) in body1.shapes() {
        let transform1 = body1.shape_world_transform(shape_id1);
        for (shape_id2, shape2) in body2.shapes() {
            let transform2 = body2.shape_world_transform(shape_id2);
            out.extend(dispatch_pair(
                id1, body1, &transform1, shape1, id2, body2, &transform2, shape2, config,
            ));
        }
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn dispatch_pair(
    id1: BodyId,
    body1: &Body,
    transform1: &Transform,
    shape1: &Shape,
    id2: BodyId,
    body2: &Body,
    transform2: &Transform,
    shape2: &Shape,
    config: &WorldConfig,
) -> Vec<ContactEquation> {
    match (shape1, shape2) {
        (Shape::Plane, Shape::Plane) => Vec::new(),
        (Shape::Plane, Shape::Convex(hull)) => {
            plane_vs_convex(id2, body2, id1, body1, transform1, hull, transform2)
        }
        (Shape::Convex(hull), Shape::Plane) => {
            plane_vs_convex(id1, body1, id2, body2, transform2, hull, transform1)
        }
        (Shape::Convex(hull1), Shape::Convex(hull2)) => {
            convex_vs_convex(id1, body1, transform1, hull1, id2, body2, transform2, hull2, config)
        }
        _ => Vec::new(),
    }
}

/// Tests every vertex of `hull` against the plane (local `+Z` normal,
/// through the plane body's origin, mapped to world space). Penetrating
/// vertices (behind the plane) each produce one contact point.
#[allow(clippy::too_many_arguments)]
fn plane_vs_convex(
    convex_id: BodyId,
    convex_body: &Body,
    plane_id: BodyId,
    plane_body: &Body,
    plane_transform: &Transform,
    hull: &ConvexPolyhedron,
    hull_transform: &Transform,
) -> Vec<ContactEquation> {
    let plane_normal = plane_transform.direction_to_world(Vec3::Z);
    let plane_point = plane_transform.position;

    let mut contacts = Vec::new();
    for i in 0..hull.vertices.len() {
        let world_vertex = hull.world_vertex(i, hull_transform);
        let depth = (world_vertex - plane_point).dot(plane_normal);
        if depth <= 0.0 {
            // ni always points from body1 toward body2; plane_normal points
            // away from the plane surface (from plane toward the convex).
            // The plane-side contact point is the penetrating vertex
            // projected onto the plane's surface, not the vertex itself.
            let projected_on_plane = world_vertex - plane_normal * depth;
            let ri_convex = world_vertex - convex_body.position;
            let ri_plane = projected_on_plane - plane_body.position;
            if convex_id < plane_id {
                contacts.push(ContactEquation {
                    body1: convex_id,
                    body2: plane_id,
                    ni: -plane_normal,
                    ri: ri_convex,
                    rj: ri_plane,
                    depth: -depth,
                });
            } else {
                contacts.push(ContactEquation {
                    body1: plane_id,
                    body2: convex_id,
                    ni: plane_normal,
                    ri: ri_plane,
                    rj: ri_convex,
                    depth: -depth,
                });
            }
        }
    }
    contacts
}

#[allow(clippy::too_many_arguments)]
fn convex_vs_convex(
    id1: BodyId,
    body1: &Body,
    transform1: &Transform,
    hull1: &ConvexPolyhedron,
    id2: BodyId,
    body2: &Body,
    transform2: &Transform,
    hull2: &ConvexPolyhedron,
    config: &WorldConfig,
) -> Vec<ContactEquation> {
    let Some(axis) = find_separating_axis(hull1, transform1, hull2, transform2, config.epsilon) else {
        tracing::trace!(pair = ?(id1, id2), "no separating axis — bodies overlap");
        return Vec::new();
    };
    let points = clip_against_hull(hull1, transform1, hull2, transform2, axis, config.contact_depth_range);
    let ni = -axis;
    points
        .into_iter()
        .map(|clipped| ContactEquation {
            body1: id1,
            body2: id2,
            ni,
            ri: clipped.point - body1.position,
            rj: clipped.point - body2.position,
            depth: -clipped.depth,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quat;
    use crate::shape::ConvexPolyhedron;

    #[test]
    fn plane_plane_never_contacts() {
        let mut plane_a = Body::new(0.0);
        plane_a.add_shape(Shape::Plane);
        let mut plane_b = Body::new(0.0);
        plane_b.add_shape(Shape::Plane);
        let config = WorldConfig::default();
        let contacts = contacts_between(BodyId(0), &plane_a, BodyId(1), &plane_b, &config);
        assert!(contacts.is_empty());
    }

    /// Rotates the plane's local `+Z` normal to world `+Y`, i.e. a ground
    /// plane a box can rest on top of.
    fn upward_plane_quat() -> Quat {
        Quat::from_angle_axis(-std::f32::consts::FRAC_PI_2, Vec3::X)
    }

    #[test]
    fn box_resting_on_plane_produces_four_contacts() {
        let mut plane = Body::new(0.0).with_quaternion(upward_plane_quat());
        plane.add_shape(Shape::Plane);

        let mut box_body = Body::new(1.0).with_position(Vec3::new(0.0, 0.4, 0.0));
        box_body.add_shape(Shape::Convex(ConvexPolyhedron::from_box(Vec3::splat(0.5))));

        let config = WorldConfig::default();
        let contacts = contacts_between(BodyId(0), &box_body, BodyId(1), &plane, &config);
        assert_eq!(contacts.len(), 4);
        for c in &contacts {
            assert!(c.ni.approx_eq(Vec3::new(0.0, -1.0, 0.0), 1e-4));
        }
    }

    #[test]
    fn separated_box_on_plane_has_no_contacts() {
        let mut plane = Body::new(0.0).with_quaternion(upward_plane_quat());
        plane.add_shape(Shape::Plane);

        let mut box_body = Body::new(1.0).with_position(Vec3::new(0.0, 5.0, 0.0));
        box_body.add_shape(Shape::Convex(ConvexPolyhedron::from_box(Vec3::splat(0.5))));

        let config = WorldConfig::default();
        let contacts = contacts_between(BodyId(0), &box_body, BodyId(1), &plane, &config);
        assert!(contacts.is_empty());
    }

    #[test]
    fn stacked_boxes_produce_four_contacts_with_consistent_ids() {
        let mut a = Body::new(1.0);
        a.add_shape(Shape::Convex(ConvexPolyhedron::from_box(Vec3::splat(0.5))));
        let mut b = Body::new(1.0).with_position(Vec3::new(0.0, 0.9, 0.0)).with_quaternion(Quat::IDENTITY);
        b.add_shape(Shape::Convex(ConvexPolyhedron::from_box(Vec3::splat(0.5))));

        let config = WorldConfig::default();
        let contacts = contacts_between(BodyId(0), &a, BodyId(1), &b, &config);
        assert_eq!(contacts.len(), 4);
        for c in &contacts {
            assert_eq!(c.body1, BodyId(0));
            assert_eq!(c.body2, BodyId(1));
        }
    }
}
