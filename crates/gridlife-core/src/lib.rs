//! Generation clock, transition rule, and stepping loop for the Gridlife
//! simulation.
//!
//! This crate owns the engine around the grid: the B3/S23 transition rule,
//! the monotonic generation counter, the session that guards grid mutation
//! by simulation phase, and the timed run loop with start/stop/pause
//! controls.
//!
//! # Modules
//!
//! - [`clock`] -- Monotonic generation counter with checked advancement.
//! - [`config`] -- Configuration loading from `gridlife-config.yaml` into
//!   strongly-typed structs.
//! - [`control`] -- Shared atomic control state (stop, pause, step interval).
//! - [`runner`] -- The async stepping loop driving repeated generations.
//! - [`session`] -- The owned `(grid, clock, phase)` triple and its
//!   mutation contract.
//! - [`step`] -- The synchronous-update transition rule.

pub mod clock;
pub mod config;
pub mod control;
pub mod runner;
pub mod session;
pub mod step;

// Re-export primary types at crate root.
pub use clock::GenerationClock;
pub use config::SimulationConfig;
pub use control::ControlState;
pub use runner::{EndReason, NoOpObserver, RunReport, StepObserver, run_simulation};
pub use session::{SeedMode, Session, SessionError, SimulationPhase};
pub use step::{StepSummary, next_generation};
