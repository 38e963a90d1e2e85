//! Simulation engine binary for Gridlife.
//!
//! Wires together the session, control state, and stepping loop. Loads
//! configuration, seeds the grid, and runs generations at the configured
//! cadence until a termination condition is met or Ctrl-C requests a stop.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `gridlife-config.yaml` (or argv\[1\])
//! 3. Build the session (grid + generation clock)
//! 4. Build the shared control state and install the Ctrl-C handler
//! 5. Run the stepping loop
//! 6. Log the result

mod error;
mod log_observer;

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gridlife_core::config::SimulationConfig;
use gridlife_core::runner::{self, run_simulation};
use gridlife_core::{ControlState, Session};

use crate::error::EngineError;
use crate::log_observer::LogObserver;

/// Info-level progress cadence: one log line per this many generations.
const INFO_EVERY_GENERATIONS: u64 = 10;

/// Application entry point for the Gridlife engine.
///
/// # Errors
///
/// Returns an error if configuration loading, session construction, or the
/// simulation itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("gridlife-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        rows = config.grid.rows,
        cols = config.grid.cols,
        seed_mode = ?config.grid.seed_mode,
        seed = config.grid.seed,
        step_interval_ms = config.run.step_interval_ms,
        max_generations = config.run.max_generations,
        stop_when_stable = config.run.stop_when_stable,
        "Configuration loaded"
    );

    // 3. Build the session.
    let mut session = Session::new(
        config.grid.rows,
        config.grid.cols,
        config.grid.seed_mode,
        config.grid.seed,
    )
    .map_err(EngineError::from)?;
    info!(alive = session.grid().live_count(), "Grid seeded");

    // 4. Build the control state and install the Ctrl-C handler.
    let control = Arc::new(ControlState::new(&config.run));
    let ctrl_c_control = Arc::clone(&control);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, requesting stop");
            ctrl_c_control.request_stop();
        }
    });

    // 5. Run the stepping loop.
    let mut observer = LogObserver::new(INFO_EVERY_GENERATIONS);
    let report = run_simulation(&mut session, &control, &mut observer)
        .await
        .map_err(EngineError::from)?;

    // 6. Log the result.
    runner::log_run_end(&report);

    Ok(())
}

/// Load configuration from argv\[1\] or the default path.
///
/// A missing file falls back to defaults with a warning; a present but
/// malformed file is an error.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let path_arg = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("gridlife-config.yaml"));
    let path = Path::new(&path_arg);

    if path.exists() {
        Ok(SimulationConfig::from_file(path)?)
    } else {
        warn!(path = %path.display(), "Config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}
