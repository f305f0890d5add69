/// Errors surfaced by the small ambient configuration surface.
///
/// The simulation pipeline itself (`World::step`, narrow phase, the solver)
/// is panic-free by design on malformed geometry — see the error handling
/// section of the spec: invalid inputs produce undefined but non-fatal
/// behavior, not `Result`s. `PhysicsError` exists only for the handful of
/// constructors where validating ahead of time is strictly more useful than
/// producing a silently-wrong simulation.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("solver iteration count must be at least 1, got {0}")]
    InvalidIterationCount(u32),
}
