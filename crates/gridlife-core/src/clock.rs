//! Generation counter for the Gridlife simulation.
//!
//! The clock is the single source of truth for how many generations the
//! current grid has advanced through. It increments by exactly one per
//! committed step and resets to zero whenever the grid is replaced
//! wholesale (clear, reseed, resize).

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Generation counter would overflow.
    #[error("generation counter overflow: cannot advance beyond u64::MAX")]
    GenerationOverflow,
}

/// Monotonic generation counter.
///
/// All advancement uses checked arithmetic; the counter never silently
/// wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationClock {
    /// Current generation number (0 = the seed generation).
    generation: u64,
}

impl GenerationClock {
    /// Create a clock at generation 0.
    pub const fn new() -> Self {
        Self { generation: 0 }
    }

    /// Create a clock at an explicit generation (useful for testing).
    pub const fn from_generation(generation: u64) -> Self {
        Self { generation }
    }

    /// Advance the clock by one generation. Returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::GenerationOverflow`] if the counter would
    /// exceed `u64::MAX`.
    pub const fn advance(&mut self) -> Result<u64, ClockError> {
        match self.generation.checked_add(1) {
            Some(next) => {
                self.generation = next;
                Ok(next)
            }
            None => Err(ClockError::GenerationOverflow),
        }
    }

    /// Reset the counter to generation 0.
    pub const fn reset(&mut self) {
        self.generation = 0;
    }

    /// Return the current generation number.
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
