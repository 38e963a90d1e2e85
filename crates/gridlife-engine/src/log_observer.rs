//! Step observer that reports progress through structured logging.

use tracing::{debug, info};

use gridlife_core::runner::StepObserver;
use gridlife_core::step::StepSummary;
use gridlife_grid::Grid;

/// Logs every step at debug level and every Nth generation at info level.
pub struct LogObserver {
    /// Promote every Nth generation to info level (0 = debug only).
    info_every: u64,
}

impl LogObserver {
    /// Create an observer that logs at info level every `info_every`
    /// generations.
    pub const fn new(info_every: u64) -> Self {
        Self { info_every }
    }
}

impl StepObserver for LogObserver {
    fn on_step(&mut self, summary: &StepSummary, _grid: &Grid) {
        let promote = self.info_every > 0
            && summary.generation.checked_rem(self.info_every) == Some(0);
        if promote {
            info!(
                generation = summary.generation,
                alive = summary.alive,
                births = summary.births,
                deaths = summary.deaths,
                "Generation committed"
            );
        } else {
            debug!(
                generation = summary.generation,
                alive = summary.alive,
                births = summary.births,
                deaths = summary.deaths,
                "Generation committed"
            );
        }
    }
}
