//! Monte Carlo pricing of European options.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig  (paths, step policy, seed)
//! └── per call
//!     ├── PricerRng         (seeded stream)
//!     ├── PathWorkspace     (step-major path grid)
//!     ├── generate_gbm_paths()
//!     ├── compute_payoffs()
//!     └── discounted mean + standard error
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::types::{OptionParams, OptionType};
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(10_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let pricer = MonteCarloPricer::new(config).unwrap();
//!
//! let params = OptionParams::new(100.0, 105.0, 0.5, 0.03, 0.25).unwrap();
//! let call = pricer.price(&params, OptionType::Call).unwrap();
//! let put = pricer.price(&params, OptionType::Put).unwrap();
//! assert!(call.price > 0.0 && put.price > 0.0);
//! ```

pub mod config;
pub mod error;
pub mod paths;
pub mod payoff;
pub mod pricer;
pub mod workspace;

pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, StepRounding, DEFAULT_PATHS, DEFAULT_SEED,
    MAX_PATHS, MAX_STEPS, TRADING_DAYS_PER_YEAR,
};
pub use error::ConfigError;
pub use paths::{generate_gbm_paths, GbmParams};
pub use payoff::{compute_payoffs, PayoffParams};
pub use pricer::{monte_carlo_price, MonteCarloPricer, PricingResult};
pub use workspace::PathWorkspace;
