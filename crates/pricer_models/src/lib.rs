//! # Pricer Models (L2: Business Logic)
//!
//! Closed-form European option pricing and its inverse.
//!
//! This crate provides:
//! - Black-Scholes prices and the shared d₁/d₂ terms (`analytical::black_scholes`)
//! - Delta, gamma, vega, theta and rho (`analytical::greeks`)
//! - Implied volatility by bounded minimisation (`calibration::implied_vol`)
//!
//! ## Usage
//!
//! ```rust
//! use pricer_core::types::{OptionParams, OptionType};
//! use pricer_models::analytical::{call_price, greeks};
//! use pricer_models::calibration::implied_volatility;
//!
//! let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let price = call_price(&params).unwrap();
//! let g = greeks(&params, OptionType::Call).unwrap();
//! assert!(g.delta > 0.5);
//!
//! let iv = implied_volatility(100.0, 100.0, 1.0, 0.05, price, OptionType::Call).unwrap();
//! assert!((iv.value() - 0.2).abs() < 1e-6);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod calibration;
