//! # pricer_core: Numerical Foundation for European Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Standard normal distribution functions (`math::distributions`)
//! - A derivative-free bounded minimiser (`math::solvers`)
//! - The pricing seam shared by analytical and simulation engines (`traits`)
//! - Option parameters, option style and error types (`types`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - statrs: Full-precision complementary error function
//! - thiserror: Error derive
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::types::{OptionParams, OptionType};
//!
//! let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! assert_eq!(params.spot, 100.0);
//! assert_eq!(OptionType::Call.to_string(), "call");
//!
//! assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `OptionType`, `OptionParams` and solver errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
