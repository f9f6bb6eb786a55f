//! Error types for the Monte Carlo engine.

use pricer_core::types::PricingError;
use thiserror::Error;

use super::config::{MAX_PATHS, MAX_STEPS};

/// Configuration error for the Monte Carlo pricer.
///
/// Raised when a [`MonteCarloConfig`](super::MonteCarloConfig) is built
/// with out-of-range values.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count outside valid range [1, 10_000_000].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),
    /// Steps per year outside valid range [1, 10_000].
    #[error("Invalid steps per year {0}: must be in range [1, 10_000]")]
    InvalidStepCount(usize),
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidPathCount(n) => PricingError::InvalidParameter {
                name: "n_paths",
                value: n as f64,
                constraint: if n == 0 {
                    "must be at least 1"
                } else {
                    "exceeds the path buffer limit MAX_PATHS (10_000_000)"
                },
            },
            ConfigError::InvalidStepCount(n) => PricingError::InvalidParameter {
                name: "steps_per_year",
                value: n as f64,
                constraint: if n == 0 {
                    "must be at least 1"
                } else {
                    "exceeds the step limit MAX_STEPS (10_000)"
                },
            },
        }
    }
}

impl ConfigError {
    /// Check a path count against `[1, MAX_PATHS]`.
    pub(crate) fn check_paths(n_paths: usize) -> Result<(), ConfigError> {
        if n_paths == 0 || n_paths > MAX_PATHS {
            Err(ConfigError::InvalidPathCount(n_paths))
        } else {
            Ok(())
        }
    }

    /// Check a step count against `[1, MAX_STEPS]`.
    pub(crate) fn check_steps(n_steps: usize) -> Result<(), ConfigError> {
        if n_steps == 0 || n_steps > MAX_STEPS {
            Err(ConfigError::InvalidStepCount(n_steps))
        } else {
            Ok(())
        }
    }
}
