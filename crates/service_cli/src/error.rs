//! CLI error types and exit codes.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Process exit code for invalid inputs.
pub const EXIT_INVALID_PARAMETER: u8 = 2;

/// Process exit code for an implied volatility solve that fell back.
pub const EXIT_NON_CONVERGENCE: u8 = 3;

/// Process exit code for any other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Domain or numerical error from the pricing layers.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Configuration file or value error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialisation error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Exit code reported to the shell.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Pricing(PricingError::InvalidParameter { .. })
            | CliError::Config(_)
            | CliError::InvalidArgument(_) => EXIT_INVALID_PARAMETER,
            CliError::Pricing(PricingError::SolverNonConvergence { .. }) => EXIT_NON_CONVERGENCE,
            CliError::Pricing(PricingError::NumericalInstability(_))
            | CliError::Io(_)
            | CliError::Csv(_)
            | CliError::Json(_) => EXIT_FAILURE,
        }
    }
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
