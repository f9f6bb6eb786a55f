//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricing, Greeks and implied-volatility operations
//! - `SolverError`: Errors from the bounded minimiser

use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `InvalidParameter`: An input violated its domain (raised immediately)
/// - `SolverNonConvergence`: The implied-volatility solve fell back to its default
/// - `NumericalInstability`: A computation produced a non-finite result
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid_parameter("expiry", 0.0, "must be positive");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter: expiry = 0 (must be positive)"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Input outside its valid domain.
    #[error("Invalid parameter: {name} = {value} ({constraint})")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Human-readable constraint that was violated
        constraint: &'static str,
    },

    /// Implied-volatility solve did not converge.
    #[error("Solver did not converge ({reason}); fallback volatility {fallback}")]
    SolverNonConvergence {
        /// Volatility reported in place of a solution
        fallback: f64,
        /// Why the solve fell back
        reason: String,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, value: f64, constraint: &'static str) -> Self {
        PricingError::InvalidParameter {
            name,
            value,
            constraint,
        }
    }

    /// Returns `true` for domain errors on the inputs.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, PricingError::InvalidParameter { .. })
    }
}

/// Solver error types.
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 500 };
/// assert!(format!("{}", err).contains("500 evaluations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Evaluation budget exhausted before the bracket shrank below tolerance.
    #[error("Failed to converge after {iterations} evaluations")]
    MaxIterationsExceeded {
        /// Number of evaluations performed
        iterations: usize,
    },

    /// Search interval is empty, inverted or not finite.
    #[error("Invalid bounds: [{lower}, {upper}]")]
    InvalidBounds {
        /// Lower bound supplied
        lower: f64,
        /// Upper bound supplied
        upper: f64,
    },

    /// Objective returned NaN or infinity.
    #[error("Objective is not finite at x = {x}")]
    NonFiniteObjective {
        /// Abscissa where the objective failed
        x: f64,
    },
}

/// Require `value` to be finite and strictly positive.
///
/// # Examples
/// ```
/// use pricer_core::types::require_positive;
///
/// assert!(require_positive("spot", 100.0).is_ok());
/// assert!(require_positive("spot", 0.0).is_err());
/// assert!(require_positive("spot", f64::NAN).is_err());
/// ```
pub fn require_positive(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            value,
            "must be finite and positive",
        ))
    }
}

/// Require `value` to be finite.
pub fn require_finite(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(name, value, "must be finite"))
    }
}
