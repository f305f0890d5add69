use super::quat::Quat;
use super::vec3::Vec3;

/// Column-major 4x4 matrix, used only as the output type `foldShapes` hands
/// to the rendering host — the solver itself never multiplies matrices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Builds a rotation + translation matrix from a quaternion and position.
    #[must_use]
    pub fn from_rotation_translation(q: Quat, t: Vec3) -> Self {
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xy, xz) = (x * x2, x * y2, x * z2);
        let (yy, yz, zz) = (y * y2, y * z2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);

        Self {
            cols: [
                [1.0 - (yy + zz), xy + wz, xz - wy, 0.0],
                [xy - wz, 1.0 - (xx + zz), yz + wx, 0.0],
                [xz + wy, yz - wx, 1.0 - (xx + yy), 0.0],
                [t.x, t.y, t.z, 1.0],
            ],
        }
    }

    /// Composes `outer` applied after `inner`: `outer * inner`.
    #[must_use]
    pub fn mul(&self, rhs: &Self) -> Self {
        let mut out = [[0.0_f32; 4]; 4];
        for col in 0..4 {
            for row in 0..4 {
                out[col][row] = (0..4).map(|k| self.cols[k][row] * rhs.cols[col][k]).sum();
            }
        }
        Self { cols: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_from_identity_rotation_translation() {
        let m = Mat4::from_rotation_translation(Quat::IDENTITY, Vec3::ZERO);
        assert_eq!(m, Mat4::IDENTITY);
    }

    #[test]
    fn translation_lands_in_last_column() {
        let m = Mat4::from_rotation_translation(Quat::IDENTITY, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.cols[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
