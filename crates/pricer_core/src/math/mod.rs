//! Mathematical building blocks.
//!
//! - [`distributions`]: standard normal CDF and PDF
//! - [`solvers`]: bounded scalar minimisation

pub mod distributions;
pub mod solvers;
