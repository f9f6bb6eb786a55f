//! Parameter, option-style and error types.
//!
//! This module provides:
//! - `option`: Call/put style with parsing and payoff
//! - `params`: Validated `(S, K, T, r, σ)` bundle
//! - `error`: Structured error types for pricing and solver operations
//!
//! # Re-exports
//!
//! - [`OptionType`], [`ParseOptionTypeError`] from `option`
//! - [`OptionParams`] from `params`
//! - [`PricingError`], [`SolverError`], [`require_positive`], [`require_finite`] from `error`

pub mod error;
pub mod option;
pub mod params;

pub use error::{require_finite, require_positive, PricingError, SolverError};
pub use option::{OptionType, ParseOptionTypeError};
pub use params::OptionParams;
