//! Calibration of the Black-Scholes volatility to market prices.
//!
//! - [`ImpliedVolSolver`]: bounded-minimisation implied volatility
//! - [`ImpliedVolatility`]: tagged `Converged` / `FellBack` outcome
//! - [`arbitrage_bounds`]: no-arbitrage price interval for validation

pub mod implied_vol;

pub use implied_vol::{
    arbitrage_bounds, implied_volatility, within_arbitrage_bounds, FallbackReason,
    ImpliedVolConfig, ImpliedVolSolver, ImpliedVolatility,
};
