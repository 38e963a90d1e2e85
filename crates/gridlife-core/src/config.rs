//! Configuration loading and typed config structures for the Gridlife
//! simulation.
//!
//! The canonical configuration lives in `gridlife-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure, and provides a loader that reads and validates the
//! file. Every field has a default, so a missing or partial file still
//! yields a usable configuration.

use std::path::Path;

use serde::Deserialize;

use crate::session::SeedMode;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Grid dimensions and seeding.
    #[serde(default)]
    pub grid: GridConfig,

    /// Stepping cadence and run boundaries.
    #[serde(default)]
    pub run: RunConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Grid dimensions and seeding configuration.
///
/// The reference collaborator offers 25, 50, and 100 as grid sizes, but
/// any dimensions are valid here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    /// Number of rows.
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Number of columns.
    #[serde(default = "default_cols")]
    pub cols: usize,

    /// How the initial grid and reseeds are filled.
    #[serde(default)]
    pub seed_mode: SeedMode,

    /// Random seed for reproducible fills (absent = seed from the OS).
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            seed_mode: SeedMode::default(),
            seed: None,
        }
    }
}

/// Stepping cadence and run boundary configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Real-time milliseconds between generations.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,

    /// Stop after this many generations (0 = unlimited).
    #[serde(default)]
    pub max_generations: u64,

    /// End the run when a step changes nothing (a still life).
    #[serde(default)]
    pub stop_when_stable: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: default_step_interval_ms(),
            max_generations: 0,
            stop_when_stable: false,
        }
    }
}

/// Default row count.
const fn default_rows() -> usize {
    25
}

/// Default column count.
const fn default_cols() -> usize {
    25
}

/// Default cadence: 100 ms between generations, the reference cadence.
const fn default_step_interval_ms() -> u64 {
    100
}
