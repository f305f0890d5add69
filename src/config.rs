use crate::error::PhysicsError;

/// Tunable constants for the solver and narrow phase, factored out of the
/// magic numbers the spec describes inline (iteration count, Baumgarte
/// coefficient, epsilon, SAT contact depth clamp).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    /// Fixed Gauss-Seidel iteration count. Spec default: 20.
    pub iterations: u32,
    /// Baumgarte positional-bias coefficient. Spec default: 0.2.
    pub baumgarte: f32,
    /// Precision epsilon for edge uniqueness, axis length, coplanarity.
    pub epsilon: f32,
    /// `[minDepth, maxDepth]` clamp used by `clipAgainstHull`.
    pub contact_depth_range: (f32, f32),
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            iterations: 20,
            baumgarte: 0.2,
            epsilon: 1e-4,
            contact_depth_range: (-100.0, 100.0),
        }
    }
}

impl WorldConfig {
    /// Builder-style override for the iteration count, rejecting zero since
    /// a zero-iteration solver would silently never resolve any contact.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidIterationCount`] if `iterations == 0`.
    pub fn with_iterations(mut self, iterations: u32) -> Result<Self, PhysicsError> {
        if iterations == 0 {
            return Err(PhysicsError::InvalidIterationCount(iterations));
        }
        self.iterations = iterations;
        Ok(self)
    }
}
