#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! A from-scratch 3D rigid-body physics core: convex-hull SAT collision
//! detection, a normal-only sequential-impulse solver, and semi-implicit
//! Euler integration. No rendering, no input, no broad-phase beyond naive
//! O(n²) pairwise testing — see [`World::step`] for the per-frame pipeline.

pub mod body;
pub mod config;
pub mod error;
pub mod math;
pub mod narrowphase;
pub mod shape;
pub mod solver;
pub mod world;

pub use body::{Body, BodyId, ShapeId};
pub use config::WorldConfig;
pub use error::PhysicsError;
pub use math::{Mat4, Quat, Transform, Vec3};
pub use narrowphase::ContactEquation;
pub use shape::{ConvexPolyhedron, Shape};
pub use world::World;
