use crate::math::{Transform, Vec3};

/// Immutable convex polyhedron: vertices, faces wound outward, one outward
/// unit normal per face, and the set of unique edge directions (up to sign).
///
/// Built once and shared by reference across any number of bodies — see the
/// "Immutable hulls" design note.
#[derive(Clone, Debug)]
pub struct ConvexPolyhedron {
    pub vertices: Vec<Vec3>,
    /// Each face is an ordered, right-hand-wound list of vertex indices.
    pub faces: Vec<Vec<usize>>,
    pub normals: Vec<Vec3>,
    /// Unique edge directions, undirected, in first-occurrence order.
    pub edges: Vec<Vec3>,
}

/// A point produced by clipping an incident face against a reference hull.
#[derive(Clone, Copy, Debug)]
pub struct ClippedPoint {
    pub point: Vec3,
    pub normal: Vec3,
    pub depth: f32,
}

impl ConvexPolyhedron {
    /// Builds a 6-face, 8-vertex axis-aligned box. Normals are exactly the
    /// six axis directions in the fixed order required by the spec; edges
    /// are returned directly as the three unit axes rather than recomputed,
    /// to avoid floating point drift on the common case.
    #[must_use]
    pub fn from_box(half_extents: Vec3) -> Self {
        let (hx, hy, hz) = (half_extents.x, half_extents.y, half_extents.z);
        // Standard 8-corner enumeration: bit 0 -> x, bit 1 -> y, bit 2 -> z.
        let vertices = vec![
            Vec3::new(-hx, -hy, -hz),
            Vec3::new(hx, -hy, -hz),
            Vec3::new(hx, hy, -hz),
            Vec3::new(-hx, hy, -hz),
            Vec3::new(-hx, -hy, hz),
            Vec3::new(hx, -hy, hz),
            Vec3::new(hx, hy, hz),
            Vec3::new(-hx, hy, hz),
        ];
        // Face order fixed by the spec: -z, +z, -y, +y, -x, +x.
        let faces = vec![
            vec![0, 3, 2, 1], // -z
            vec![4, 5, 6, 7], // +z
            vec![0, 1, 5, 4], // -y
            vec![3, 7, 6, 2], // +y
            vec![0, 4, 7, 3], // -x
            vec![1, 2, 6, 5], // +x
        ];
        let normals = vec![
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ];
        let edges = vec![Vec3::X, Vec3::Y, Vec3::Z];
        Self { vertices, faces, normals, edges }
    }

    /// General construction from vertices and wound faces. Normals are
    /// derived from the first three vertices of each face; the caller is
    /// responsible for outward winding. `edges` is computed via the
    /// unique-edges algorithm, optionally seeded with `seed_edges` for
    /// deterministic ordering across related hulls.
    #[must_use]
    pub fn from_vertices_and_faces(
        vertices: Vec<Vec3>,
        faces: Vec<Vec<usize>>,
        epsilon: f32,
        seed_edges: Vec<Vec3>,
    ) -> Self {
        let normals = faces
            .iter()
            .map(|face| {
                let v0 = vertices[face[0]];
                let v1 = vertices[face[1]];
                let v2 = vertices[face[2]];
                (v1 - v0).cross(v2 - v0).normalize()
            })
            .collect();
        let edges = unique_edges(&faces, &vertices, epsilon, seed_edges);
        Self { vertices, faces, normals, edges }
    }

    #[must_use]
    pub fn world_vertex(&self, index: usize, transform: &Transform) -> Vec3 {
        transform.point_to_world(self.vertices[index])
    }

    #[must_use]
    pub fn world_normal(&self, face_index: usize, transform: &Transform) -> Vec3 {
        transform.direction_to_world(self.normals[face_index])
    }

    #[must_use]
    pub fn world_edges(&self, transform: &Transform) -> Vec<Vec3> {
        self.edges.iter().map(|e| transform.direction_to_world(*e)).collect()
    }

    /// Returns `(max, min)` where `max = maxᵥ(worldVertex·axis)` and
    /// `min = maxᵥ(−worldVertex·axis)`; the hull's projected interval onto
    /// `axis` is `[-min, max]`.
    #[must_use]
    pub fn project(&self, transform: &Transform, axis: Vec3) -> (f32, f32) {
        let mut max = f32::NEG_INFINITY;
        let mut min = f32::NEG_INFINITY;
        for i in 0..self.vertices.len() {
            let w = self.world_vertex(i, transform);
            let d = w.dot(axis);
            max = max.max(d);
            min = min.max(-d);
        }
        (max, min)
    }

    fn world_face_plane(&self, face_index: usize, transform: &Transform) -> (Vec3, f32) {
        let normal = self.world_normal(face_index, transform);
        let point = self.world_vertex(self.faces[face_index][0], transform);
        (normal, -normal.dot(point))
    }

    /// Clips `polygon` (world space) against every face plane of `self`
    /// except `reference_face`, then keeps only points whose signed distance
    /// to the reference face's plane falls within `depth_range`.
    #[must_use]
    pub fn clip_face_against_hull(
        &self,
        transform: &Transform,
        reference_face: usize,
        polygon: &[Vec3],
        depth_range: (f32, f32),
    ) -> Vec<ClippedPoint> {
        let mut poly = polygon.to_vec();
        for (face_index, _) in self.faces.iter().enumerate() {
            if face_index == reference_face {
                continue;
            }
            let (normal, c) = self.world_face_plane(face_index, transform);
            poly = clip_face_against_plane(normal, c, &poly);
            if poly.is_empty() {
                return Vec::new();
            }
        }

        let (ref_normal, ref_c) = self.world_face_plane(reference_face, transform);
        let (min_depth, max_depth) = depth_range;
        poly.into_iter()
            .filter_map(|point| {
                let depth = ref_normal.dot(point) + ref_c;
                if depth >= min_depth && depth <= max_depth {
                    Some(ClippedPoint { point, normal: -ref_normal, depth })
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Sutherland–Hodgman clip of a (possibly open) polygon against the half
/// space `n·x + c ≤ 0`.
#[must_use]
pub fn clip_face_against_plane(normal: Vec3, c: f32, polygon: &[Vec3]) -> Vec<Vec3> {
    let n = polygon.len();
    if n < 2 {
        return polygon.to_vec();
    }
    let mut result = Vec::with_capacity(n);
    for i in 0..n {
        let prev = polygon[(i + n - 1) % n];
        let curr = polygon[i];
        let d_prev = normal.dot(prev) + c;
        let d_curr = normal.dot(curr) + c;
        if d_prev * d_curr < 0.0 {
            let t = d_prev / (d_prev - d_curr);
            result.push(prev + (curr - prev) * t);
        }
        if d_curr <= 0.0 {
            result.push(curr);
        }
    }
    result
}

/// Collects the unique edge directions (up to sign, within `epsilon`) across
/// all faces, in first-occurrence order. `seed` pre-populates the result for
/// deterministic ordering (e.g. a box's three known axes).
fn unique_edges(faces: &[Vec<usize>], vertices: &[Vec3], epsilon: f32, seed: Vec<Vec3>) -> Vec<Vec3> {
    let mut result = seed;
    for face in faces {
        let n = face.len();
        for i in 0..n {
            let a = vertices[face[i]];
            let b = vertices[face[(i + 1) % n]];
            let dir = (b - a).normalize();
            if dir == Vec3::ZERO {
                continue;
            }
            let already_present = result
                .iter()
                .any(|e| e.approx_eq(dir, epsilon) || e.approx_eq(-dir, epsilon));
            if !already_present {
                result.push(dir);
            }
        }
    }
    result
}
