//! The simulation session: single owner of the grid, the generation clock,
//! and the running/stopped phase.
//!
//! The session replaces the reactive state of a rendering layer with
//! explicit method calls on one owned value. The phase machine is the
//! concurrency discipline: while [`SimulationPhase::Running`] the stepping
//! loop is the only mutator, and external mutation (toggle, clear, reseed,
//! resize) is rejected with [`SessionError::SimulationRunning`] rather
//! than queued.
//!
//! Documented transition choices: `begin_run` on an already-running
//! session is an error; `end_run` on a stopped session is a no-op.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use gridlife_grid::{Cell, Grid, GridError};

use crate::clock::{ClockError, GenerationClock};
use crate::step::{self, StepSummary};

/// Errors that can occur during session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A grid operation failed.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },

    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A stopped-only operation was attempted while the simulation runs,
    /// or a run was started on an already-running session.
    #[error("operation requires a stopped simulation")]
    SimulationRunning,
}

/// How the initial grid (and every reseed) is filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// All cells start dead.
    Empty,
    /// Each cell starts alive with probability 0.5.
    #[default]
    Random,
}

/// Whether the stepping loop currently owns the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationPhase {
    /// No run in progress; external mutation is accepted.
    #[default]
    Stopped,
    /// The stepping loop is driving generations; external mutation is
    /// rejected.
    Running,
}

/// The owned `(grid, clock, phase)` triple.
///
/// The random source lives in the session so that a seeded session
/// reproduces the same sequence of fills across reseeds and resizes.
#[derive(Debug)]
pub struct Session {
    /// The current generation's grid.
    grid: Grid,
    /// The generation counter.
    clock: GenerationClock,
    /// Stopped/Running phase gate.
    phase: SimulationPhase,
    /// How reseeds and resizes fill the grid.
    seed_mode: SeedMode,
    /// Random source for fills.
    rng: StdRng,
}

impl Session {
    /// Create a session with a freshly filled `rows x cols` grid at
    /// generation 0.
    ///
    /// A `Some(seed)` makes every fill this session performs reproducible;
    /// `None` seeds from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Grid`] if the dimensions overflow.
    pub fn new(
        rows: usize,
        cols: usize,
        seed_mode: SeedMode,
        seed: Option<u64>,
    ) -> Result<Self, SessionError> {
        let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let grid = fill(rows, cols, seed_mode, &mut rng)?;
        Ok(Self {
            grid,
            clock: GenerationClock::new(),
            phase: SimulationPhase::Stopped,
            seed_mode,
            rng,
        })
    }

    // -----------------------------------------------------------------------
    // Read-only access (valid in any phase)
    // -----------------------------------------------------------------------

    /// Return a read-only snapshot view of the current grid.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Return the current generation number.
    pub const fn generation(&self) -> u64 {
        self.clock.generation()
    }

    /// Return the current phase.
    pub const fn phase(&self) -> SimulationPhase {
        self.phase
    }

    /// Return `true` if a run is in progress.
    pub const fn is_running(&self) -> bool {
        matches!(self.phase, SimulationPhase::Running)
    }

    // -----------------------------------------------------------------------
    // External mutation (Stopped only)
    // -----------------------------------------------------------------------

    /// Flip a single cell. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SimulationRunning`] while a run is in
    /// progress, or [`SessionError::Grid`] for out-of-bounds coordinates.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<Cell, SessionError> {
        self.ensure_stopped()?;
        Ok(self.grid.toggle(row, col)?)
    }

    /// Replace the grid with an all-dead grid of the same dimensions and
    /// reset the generation counter to 0.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SimulationRunning`] while a run is in
    /// progress.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.ensure_stopped()?;
        self.grid = Grid::empty(self.grid.rows(), self.grid.cols())?;
        self.clock.reset();
        debug!("Grid cleared");
        Ok(())
    }

    /// Replace the grid with a fresh random fill of the same dimensions
    /// and reset the generation counter to 0.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SimulationRunning`] while a run is in
    /// progress.
    pub fn reseed(&mut self) -> Result<(), SessionError> {
        self.ensure_stopped()?;
        self.grid = Grid::random(self.grid.rows(), self.grid.cols(), &mut self.rng)?;
        self.clock.reset();
        debug!(alive = self.grid.live_count(), "Grid reseeded");
        Ok(())
    }

    /// Discard the grid and allocate a new `rows x cols` grid, filled
    /// according to the session's seed mode, resetting the generation
    /// counter to 0.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SimulationRunning`] while a run is in
    /// progress, or [`SessionError::Grid`] if the dimensions overflow.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), SessionError> {
        self.ensure_stopped()?;
        self.grid = fill(rows, cols, self.seed_mode, &mut self.rng)?;
        self.clock.reset();
        debug!(rows, cols, "Grid resized");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Phase transitions and stepping (the run loop's interface)
    // -----------------------------------------------------------------------

    /// Enter the Running phase.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SimulationRunning`] if a run is already in
    /// progress.
    pub const fn begin_run(&mut self) -> Result<(), SessionError> {
        if matches!(self.phase, SimulationPhase::Running) {
            return Err(SessionError::SimulationRunning);
        }
        self.phase = SimulationPhase::Running;
        Ok(())
    }

    /// Leave the Running phase. No-op if already stopped.
    pub const fn end_run(&mut self) {
        self.phase = SimulationPhase::Stopped;
    }

    /// Advance the session by exactly one generation.
    ///
    /// The step commits atomically: the successor grid is computed from
    /// the current grid first, and only then is it swapped in together
    /// with the counter increment. On error the session is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Clock`] if the generation counter would
    /// overflow, or [`SessionError::Grid`] on an internal write failure.
    pub fn step(&mut self) -> Result<StepSummary, SessionError> {
        let transition = step::compute_transition(&self.grid)?;
        let generation = self.clock.advance()?;
        self.grid = transition.grid;
        Ok(StepSummary {
            generation,
            alive: self.grid.live_count(),
            births: transition.births,
            deaths: transition.deaths,
        })
    }

    /// Reject stopped-only operations while running.
    const fn ensure_stopped(&self) -> Result<(), SessionError> {
        if matches!(self.phase, SimulationPhase::Running) {
            return Err(SessionError::SimulationRunning);
        }
        Ok(())
    }
}

/// Allocate a grid per the seed mode.
fn fill(
    rows: usize,
    cols: usize,
    seed_mode: SeedMode,
    rng: &mut StdRng,
) -> Result<Grid, GridError> {
    match seed_mode {
        SeedMode::Empty => Grid::empty(rows, cols),
        SeedMode::Random => Grid::random(rows, cols, rng),
    }
}
