//! # Pricer Risk (L4: Application)
//!
//! Parameter sweeps over the analytical engine.
//!
//! This crate provides:
//! - Greek sensitivity grids over spot and volatility (`sensitivity`)
//! - Rayon-based parallel mapping with ordered, fallible results (`parallel`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  sensitivity - GridSpec, grids, panels  │
//! │  parallel/    - Rayon utilities         │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)            │
//! │  Black-Scholes prices and Greeks        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::{OptionParams, OptionType};
//! use pricer_risk::sensitivity::{GridSpec, SensitivityGrid};
//!
//! let base = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let panels = SensitivityGrid::generate_all(&base, OptionType::Call, &GridSpec::default()).unwrap();
//!
//! assert_eq!(panels.len(), 4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod parallel;
pub mod sensitivity;

pub use parallel::ParallelConfig;
pub use sensitivity::{linspace, GridSpec, SensitivityGrid, PANEL_GREEKS};
