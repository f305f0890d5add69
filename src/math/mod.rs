//! Minimal vector/quaternion/matrix kernel underlying the physics engine.
//!
//! Kept self-contained (no `glam`/`nalgebra` dependency) since this is the
//! "assumed available" math library the rest of the engine builds on — it
//! has no business reaching further than `f32` arithmetic.

mod mat4;
mod quat;
mod transform;
mod vec3;

pub use mat4::Mat4;
pub use quat::Quat;
pub use transform::Transform;
pub use vec3::Vec3;
