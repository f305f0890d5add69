//! Sequential-impulse contact solver and semi-implicit Euler integrator.
//!
//! Normal-only: no friction, no restitution. Positional drift is corrected
//! with Baumgarte stabilization rather than full non-linear projection.

use crate::body::Body;
use crate::config::WorldConfig;
use crate::math::Vec3;
use crate::narrowphase::ContactEquation;

/// Adds gravity and the per-body force/torque accumulators into velocity
/// and angular velocity. Static bodies (`inv_mass == 0.0`) are untouched.
pub fn apply_forces(bodies: &mut [Body], gravity: Vec3, dt: f32) {
    for body in bodies {
        if body.inv_mass == 0.0 {
            continue;
        }
        body.velocity += (gravity + body.force * body.inv_mass) * dt;
        body.angular_velocity += Vec3::new(
            body.torque.x * body.inv_inertia_world.x,
            body.torque.y * body.inv_inertia_world.y,
            body.torque.z * body.inv_inertia_world.z,
        ) * dt;
    }
}

fn angular_term(inv_inertia: Vec3, r: Vec3, n: Vec3) -> f32 {
    let rn = r.cross(n);
    let scaled = Vec3::new(inv_inertia.x * rn.x, inv_inertia.y * rn.y, inv_inertia.z * rn.z);
    scaled.cross(r).dot(n)
}

/// Effective mass (the reciprocal of the constraint's "resistance") for a
/// single contact's normal impulse, folding in both bodies' linear and
/// angular inverse mass.
fn effective_mass(body1: &Body, body2: &Body, contact: &ContactEquation) -> f32 {
    let denom = body1.inv_mass
        + body2.inv_mass
        + angular_term(body1.inv_inertia_world, contact.ri, contact.ni)
        + angular_term(body2.inv_inertia_world, contact.rj, contact.ni);
    if denom > f32::EPSILON {
        1.0 / denom
    } else {
        0.0
    }
}

fn velocity_at_point(body: &Body, r: Vec3) -> Vec3 {
    body.velocity + body.angular_velocity.cross(r)
}

fn relative_normal_velocity(body1: &Body, body2: &Body, contact: &ContactEquation) -> f32 {
    let v2 = velocity_at_point(body2, contact.rj);
    let v1 = velocity_at_point(body1, contact.ri);
    (v2 - v1).dot(contact.ni)
}

fn apply_impulse(body1: &mut Body, body2: &mut Body, contact: &ContactEquation, lambda: f32) {
    let impulse = contact.ni * lambda;
    body1.velocity -= impulse * body1.inv_mass;
    body2.velocity += impulse * body2.inv_mass;

    let angular1 = contact.ri.cross(impulse);
    body1.angular_velocity -= Vec3::new(
        angular1.x * body1.inv_inertia_world.x,
        angular1.y * body1.inv_inertia_world.y,
        angular1.z * body1.inv_inertia_world.z,
    );
    let angular2 = contact.rj.cross(impulse);
    body2.angular_velocity += Vec3::new(
        angular2.x * body2.inv_inertia_world.x,
        angular2.y * body2.inv_inertia_world.y,
        angular2.z * body2.inv_inertia_world.z,
    );
}

/// Runs `config.iterations` Gauss-Seidel sweeps over `contacts`, resolving
/// each contact's normal impulse (with Baumgarte positional bias) in place
/// against the current — already partially updated, within this same sweep
/// — velocities of the two bodies it names.
///
/// `index_of` maps a contact's [`crate::body::BodyId`] to its index in
/// `bodies`; the solver itself is agnostic to how bodies are keyed.
pub fn solve(
    bodies: &mut [Body],
    contacts: &[ContactEquation],
    index_of: impl Fn(crate::body::BodyId) -> usize,
    dt: f32,
    config: &WorldConfig,
) {
    for _ in 0..config.iterations {
        for contact in contacts {
            let i1 = index_of(contact.body1);
            let i2 = index_of(contact.body2);
            debug_assert_ne!(i1, i2);

            let (lo, hi) = if i1 < i2 { (i1, i2) } else { (i2, i1) };
            let (left, right) = bodies.split_at_mut(hi);
            let (lo_body, hi_body) = (&mut left[lo], &mut right[0]);
            let (body1, body2): (&mut Body, &mut Body) =
                if i1 < i2 { (lo_body, hi_body) } else { (hi_body, lo_body) };

            let m_eff = effective_mass(body1, body2, contact);
            if m_eff == 0.0 {
                continue;
            }
            let vn = relative_normal_velocity(body1, body2, contact);
            let bias = (config.baumgarte / dt) * contact.depth.max(0.0);
            let lambda = ((bias - vn) * m_eff).max(0.0);
            apply_impulse(body1, body2, contact, lambda);
        }
    }
}

/// Semi-implicit Euler integration: velocities (already updated by the
/// solver) advance position and orientation.
pub fn integrate(bodies: &mut [Body], dt: f32) {
    for body in bodies {
        if body.inv_mass == 0.0 {
            continue;
        }
        body.position += body.velocity * dt;
        body.quaternion = body.quaternion.integrate(body.angular_velocity, dt);
    }
}
