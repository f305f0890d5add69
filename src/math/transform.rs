use super::mat4::Mat4;
use super::quat::Quat;
use super::vec3::Vec3;

/// A rigid pose: a position and an orientation. Used both for a body's world
/// pose and for a shape's local offset within its body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub quaternion: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        quaternion: Quat::IDENTITY,
    };

    #[must_use]
    pub const fn new(position: Vec3, quaternion: Quat) -> Self {
        Self { position, quaternion }
    }

    /// Maps a local-space point `p` into world space.
    #[must_use]
    pub fn point_to_world(&self, p: Vec3) -> Vec3 {
        self.position + self.quaternion.rotate(p)
    }

    /// Maps a local-space direction into world space (no translation).
    #[must_use]
    pub fn direction_to_world(&self, d: Vec3) -> Vec3 {
        self.quaternion.rotate(d)
    }

    /// Composes `self` (outer) with `local` (inner): the world transform of a
    /// shape whose local offset within the body is `local`.
    #[must_use]
    pub fn compose(&self, local: &Transform) -> Transform {
        Transform::new(self.point_to_world(local.position), self.quaternion * local.quaternion)
    }

    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.quaternion, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
