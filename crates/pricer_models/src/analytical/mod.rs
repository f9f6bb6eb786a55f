//! Analytical pricing formulas for European options.
//!
//! - [`black_scholes`]: closed-form prices, d₁/d₂ terms and put-call parity
//! - [`greeks`]: delta, gamma, vega, theta and rho from the same terms

pub mod black_scholes;
pub mod greeks;

pub use black_scholes::{
    call_price, option_price, put_call_parity_gap, put_price, AnalyticalPricer, BlackScholes,
    BlackScholesTerms,
};
pub use greeks::{
    delta, gamma, greek, greeks, rho, theta, vega, Greek, Greeks, DAYS_PER_YEAR, PERCENTAGE_POINT,
};
