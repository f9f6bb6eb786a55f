//! # pricer_pricing: Monte Carlo Engine (Layer 3)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing estimates European option prices by simulating risk-neutral
//! Geometric Brownian Motion paths:
//! - Seeded random number generation (`rng`)
//! - Path generation, payoffs, configuration and the pricer itself (`mc`)
//!
//! Every simulation call owns its random stream and path buffers, so the
//! same inputs, path count and seed always reproduce the same price.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::{OptionParams, OptionType};
//! use pricer_pricing::mc::monte_carlo_price;
//!
//! let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let price = monte_carlo_price(&params, OptionType::Call, 20_000, 42).unwrap();
//! assert!((price - 10.45).abs() < 0.5);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `StepRounding`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod rng;

pub use mc::{
    monte_carlo_price, GbmParams, MonteCarloConfig, MonteCarloPricer, PayoffParams, PricingResult,
};
pub use rng::PricerRng;
