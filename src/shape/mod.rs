//! Shapes and convex-hull geometry: the immutable collision representation
//! bodies attach to.

mod convex;

pub use convex::{clip_face_against_plane, ClippedPoint, ConvexPolyhedron};

use crate::math::{Transform, Vec3};

/// The three collidable primitives the core understands.
#[derive(Clone, Debug)]
pub enum Shape {
    /// Infinite plane through the shape's local origin, normal `+Z` before
    /// the owning transform is applied.
    Plane,
    Sphere(f32),
    Convex(ConvexPolyhedron),
}

/// Candidate separating axis together with its overlap depth, kept only
/// internally while [`find_separating_axis`] scans the candidate set.
struct AxisCandidate {
    axis: Vec3,
    depth: f32,
}

/// Runs the Separating Axis Theorem over hull `a` and hull `b`: face normals
/// of both hulls, then the cross product of every unique-edge pair. Returns
/// `None` the moment any candidate axis proves separating (depth < 0);
/// otherwise returns the axis of smallest positive overlap depth, oriented
/// so that `(b.position - a.position)·axis <= 0` (it points from `b` toward
/// `a`). Ties keep whichever candidate was found first.
#[must_use]
pub fn find_separating_axis(
    hull_a: &ConvexPolyhedron,
    transform_a: &Transform,
    hull_b: &ConvexPolyhedron,
    transform_b: &Transform,
    epsilon: f32,
) -> Option<Vec3> {
    let mut candidates = Vec::new();

    for face_index in 0..hull_a.faces.len() {
        candidates.push(hull_a.world_normal(face_index, transform_a));
    }
    for face_index in 0..hull_b.faces.len() {
        candidates.push(hull_b.world_normal(face_index, transform_b));
    }
    let edges_a = hull_a.world_edges(transform_a);
    let edges_b = hull_b.world_edges(transform_b);
    for ea in &edges_a {
        for eb in &edges_b {
            let axis = ea.cross(*eb);
            if axis.length_squared() > epsilon * epsilon {
                candidates.push(axis.normalize());
            }
        }
    }

    let mut best: Option<AxisCandidate> = None;
    for axis in candidates {
        let (max_a, min_a) = hull_a.project(transform_a, axis);
        let (max_b, min_b) = hull_b.project(transform_b, axis);
        let depth = (max_a + min_b).min(max_b + min_a);
        if depth < 0.0 {
            return None;
        }
        let is_new_best = match &best {
            Some(b) => depth < b.depth,
            None => true,
        };
        if is_new_best {
            best = Some(AxisCandidate { axis, depth });
        }
    }

    best.map(|candidate| {
        let offset = transform_b.position - transform_a.position;
        if offset.dot(candidate.axis) > 0.0 {
            -candidate.axis
        } else {
            candidate.axis
        }
    })
}

fn best_face(hull: &ConvexPolyhedron, transform: &Transform, axis: Vec3, want_max: bool) -> (usize, f32) {
    let mut best_index = 0;
    let mut best_dot = if want_max { f32::NEG_INFINITY } else { f32::INFINITY };
    for face_index in 0..hull.faces.len() {
        let dot = hull.world_normal(face_index, transform).dot(axis);
        let better = if want_max { dot > best_dot } else { dot < best_dot };
        if better {
            best_dot = dot;
            best_index = face_index;
        }
    }
    (best_index, best_dot)
}

/// Generates the contact manifold between two convex hulls along a
/// previously found separating `axis` (see [`find_separating_axis`], which
/// orients `axis` to point from `b` toward `a`).
///
/// The reference hull is whichever of `a`/`b` has a face normal more
/// parallel to `ni = -axis` (the contact normal, pointing from the
/// incident hull into the reference hull) — that's the face actually
/// touching the other hull. Ties favor `a`. The incident face is the other
/// hull's face most anti-parallel to the *reference face's own* normal.
/// The incident polygon is then clipped against every other face of the
/// reference hull.
#[must_use]
pub fn clip_against_hull(
    hull_a: &ConvexPolyhedron,
    transform_a: &Transform,
    hull_b: &ConvexPolyhedron,
    transform_b: &Transform,
    axis: Vec3,
    depth_range: (f32, f32),
) -> Vec<ClippedPoint> {
    let ni = -axis;
    let (face_a, dot_a) = best_face(hull_a, transform_a, ni, true);
    let (face_b, dot_b) = best_face(hull_b, transform_b, ni, true);

    let (reference, ref_transform, ref_face, ref_normal) = if dot_a >= dot_b {
        (hull_a, transform_a, face_a, hull_a.world_normal(face_a, transform_a))
    } else {
        (hull_b, transform_b, face_b, hull_b.world_normal(face_b, transform_b))
    };
    let (incident_hull, inc_transform) = if dot_a >= dot_b { (hull_b, transform_b) } else { (hull_a, transform_a) };
    let (incident_face, _) = best_face(incident_hull, inc_transform, ref_normal, false);

    let incident_polygon: Vec<Vec3> = incident_hull.faces[incident_face]
        .iter()
        .map(|&vi| incident_hull.world_vertex(vi, inc_transform))
        .collect();

    reference.clip_face_against_hull(ref_transform, ref_face, &incident_polygon, depth_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quat;

    #[test]
    fn s4_offset_boxes_separate_along_shared_face_normal() {
        let hull = ConvexPolyhedron::from_box(Vec3::splat(0.5));
        let ta = Transform::new(Vec3::new(-0.2, 0.0, 0.0), Quat::IDENTITY);
        let tb = Transform::new(Vec3::new(0.2, 0.0, 0.0), Quat::IDENTITY);
        let axis = find_separating_axis(&hull, &ta, &hull, &tb, 1e-4).expect("overlapping");
        assert!(axis.approx_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn s4_reports_the_expected_overlap_depth() {
        let hull = ConvexPolyhedron::from_box(Vec3::splat(0.5));
        let ta = Transform::new(Vec3::new(-0.2, 0.0, 0.0), Quat::IDENTITY);
        let tb = Transform::new(Vec3::new(0.2, 0.0, 0.0), Quat::IDENTITY);
        let axis = find_separating_axis(&hull, &ta, &hull, &tb, 1e-4).unwrap();
        let (max_a, min_a) = hull.project(&ta, axis);
        let (max_b, min_b) = hull.project(&tb, axis);
        let depth = (max_a + min_b).min(max_b + min_a);
        assert!((depth - 0.6).abs() < 1e-4);
    }

    #[test]
    fn far_apart_boxes_have_no_separating_axis_result() {
        let hull = ConvexPolyhedron::from_box(Vec3::splat(0.5));
        let ta = Transform::new(Vec3::new(-10.0, 0.0, 0.0), Quat::IDENTITY);
        let tb = Transform::new(Vec3::new(10.0, 0.0, 0.0), Quat::IDENTITY);
        assert!(find_separating_axis(&hull, &ta, &hull, &tb, 1e-4).is_none());
    }

    #[test]
    fn s5_stacked_boxes_clip_to_four_points_at_expected_depth() {
        let hull = ConvexPolyhedron::from_box(Vec3::splat(0.5));
        let ta = Transform::new(Vec3::ZERO, Quat::IDENTITY);
        let tb = Transform::new(Vec3::new(0.0, 0.9, 0.0), Quat::IDENTITY);
        let axis = find_separating_axis(&hull, &ta, &hull, &tb, 1e-4).expect("overlapping");
        let points = clip_against_hull(&hull, &ta, &hull, &tb, axis, (-100.0, 100.0));
        assert_eq!(points.len(), 4);
        for p in &points {
            assert!((p.depth - (-0.1)).abs() < 1e-4, "depth={}", p.depth);
            assert!(p.normal.approx_eq(Vec3::new(0.0, -1.0, 0.0), 1e-4));
        }
    }
}
