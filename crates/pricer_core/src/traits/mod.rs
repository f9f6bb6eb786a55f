//! Core traits.
//!
//! - [`EuropeanPricer`]: price a European option from [`OptionParams`](crate::types::OptionParams)

pub mod priceable;

pub use priceable::EuropeanPricer;
