use std::collections::BTreeMap;

use crate::math::{Quat, Transform, Vec3};
use crate::shape::Shape;

/// Opaque, never-reused handle to a body registered with a [`crate::world::World`].
///
/// Deliberately not a reference or index into a `Vec` the caller can alias —
/// see the "opaque handles over pointers" design note.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub(crate) u32);

/// Opaque handle to a shape attached to a body, scoped to that body only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub(crate) u32);

/// A rigid body: pose, velocities, force/torque accumulators, mass
/// properties, and the shapes attached to it.
#[derive(Clone, Debug)]
pub struct Body {
    pub position: Vec3,
    pub quaternion: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Force accumulator, cleared at the end of every `World::step`.
    pub force: Vec3,
    /// Torque accumulator, cleared at the end of every `World::step`.
    pub torque: Vec3,
    pub mass: f32,
    pub inv_mass: f32,
    /// Diagonal world-space inverse inertia tensor. Supplied directly by the
    /// caller rather than derived from shape geometry — the spec's
    /// `ConvexPolyhedron` carries no mass-distribution data to derive it
    /// from. Zero means "no angular response" (the default), matching a
    /// static or deliberately non-rotating body.
    pub inv_inertia_world: Vec3,
    shapes: BTreeMap<ShapeId, Shape>,
    /// Per-shape local offset within the body. A shape with no entry here
    /// sits at the body's origin with no rotation.
    shape_transforms: BTreeMap<ShapeId, Transform>,
    next_shape_id: u32,
}

impl Body {
    /// Builds a body of the given `mass` at the world origin with zero
    /// velocity, zero accumulators, and no shapes. `mass <= 0.0` produces a
    /// static body (`inv_mass == 0.0`), mirroring the world-anchored plane
    /// convention.
    #[must_use]
    pub fn new(mass: f32) -> Self {
        let inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        Self {
            position: Vec3::ZERO,
            quaternion: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            mass,
            inv_mass,
            inv_inertia_world: Vec3::ZERO,
            shapes: BTreeMap::new(),
            shape_transforms: BTreeMap::new(),
            next_shape_id: 0,
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_quaternion(mut self, quaternion: Quat) -> Self {
        self.quaternion = quaternion;
        self
    }

    #[must_use]
    pub fn with_inv_inertia_world(mut self, inv_inertia_world: Vec3) -> Self {
        self.inv_inertia_world = inv_inertia_world;
        self
    }

    /// Replaces the body's mass, recomputing `inv_mass` from it.
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
        self.inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
    }

    /// Attaches `shape` at the body's origin with no local rotation, and
    /// returns its id.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        self.add_shape_with_transform(shape, Transform::IDENTITY)
    }

    /// Attaches `shape` offset from the body's origin by `local`.
    pub fn add_shape_with_transform(&mut self, shape: Shape, local: Transform) -> ShapeId {
        let id = ShapeId(self.next_shape_id);
        self.next_shape_id += 1;
        self.shapes.insert(id, shape);
        self.shape_transforms.insert(id, local);
        id
    }

    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    #[must_use]
    pub fn shape_local_transform(&self, id: ShapeId) -> Transform {
        self.shape_transforms.get(&id).copied().unwrap_or(Transform::IDENTITY)
    }

    /// World-space transform of the attached shape `id`: the body's own pose
    /// composed with the shape's local offset.
    #[must_use]
    pub fn shape_world_transform(&self, id: ShapeId) -> Transform {
        self.transform().compose(&self.shape_local_transform(id))
    }

    #[must_use]
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter().map(|(id, shape)| (*id, shape))
    }

    /// The body's current pose as a [`Transform`].
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.quaternion)
    }

    /// Translates the body by `delta`, leaving velocity untouched.
    pub fn offset_by(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Rotates the body by the angle-axis rotation `angle` about `axis`,
    /// applied after the body's current orientation.
    pub fn rotate_by(&mut self, angle: f32, axis: Vec3) {
        self.quaternion = (Quat::from_angle_axis(angle, axis) * self.quaternion).normalize();
    }

    /// Accumulates a world-space force at the body's center of mass.
    pub fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Clears the force and torque accumulators, called once per
    /// `World::step` after integration.
    pub fn clear_accumulators(&mut self) {
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }
}
