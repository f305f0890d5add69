use super::vec3::Vec3;
use std::ops::Mul;

/// Unit quaternion used for body and shape orientation.
///
/// Composition is non-commutative: `a * b` first applies `b`, then `a`,
/// matching the convention used by [`Quaternion::rotate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Constructs a rotation of `angle` radians about `axis`. `axis` need not
    /// be normalized; a near-zero axis yields the identity rotation.
    #[must_use]
    pub fn from_angle_axis(angle: f32, axis: Vec3) -> Self {
        let axis = axis.normalize();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let half = angle * 0.5;
        let s = half.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos()).normalize()
    }

    #[must_use]
    pub fn normalize(self) -> Self {
        let len = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if len <= f32::EPSILON {
            Self::IDENTITY
        } else {
            Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
        }
    }

    #[must_use]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotates `v` by this quaternion: `q * (v, 0) * q⁻¹` restricted to the
    /// vector part.
    #[must_use]
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let qv = Vec3::new(self.x, self.y, self.z);
        let t = qv.cross(v) * 2.0;
        v + t * self.w + qv.cross(t)
    }

    /// Advances orientation by angular velocity `omega` over `dt` using the
    /// standard quaternion derivative `q̇ = ½ ω q`, then renormalizes.
    #[must_use]
    pub fn integrate(self, omega: Vec3, dt: f32) -> Self {
        let omega_quat = Self::new(omega.x, omega.y, omega.z, 0.0);
        let dq = omega_quat * self;
        let half_dt = dt * 0.5;
        Self::new(
            self.x + dq.x * half_dt,
            self.y + dq.y * half_dt,
            self.z + dq.z * half_dt,
            self.w + dq.w * half_dt,
        )
        .normalize()
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Hamilton product; non-commutative.
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rotate_is_noop() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Quat::IDENTITY.rotate(v), v);
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let q = Quat::from_angle_axis(std::f32::consts::FRAC_PI_2, Vec3::Z);
        let r = q.rotate(Vec3::X);
        assert!(r.approx_eq(Vec3::Y, 1e-4));
    }

    #[test]
    fn composition_is_not_commutative() {
        let qx = Quat::from_angle_axis(std::f32::consts::FRAC_PI_2, Vec3::X);
        let qz = Quat::from_angle_axis(std::f32::consts::FRAC_PI_2, Vec3::Z);
        assert!((qx * qz).rotate(Vec3::X) != (qz * qx).rotate(Vec3::X));
    }
}
