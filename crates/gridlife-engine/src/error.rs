//! Error types for the Gridlife engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and simulation execution.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: gridlife_core::config::ConfigError,
    },

    /// Session construction or mutation failed.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: gridlife_core::SessionError,
    },

    /// The stepping loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: gridlife_core::runner::RunnerError,
    },
}
