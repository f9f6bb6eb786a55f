//! Derivative-free scalar optimisation.
//!
//! ## Available Solvers
//!
//! - [`BrentMinimizer`]: Brent's bounded minimiser (golden section search
//!   accelerated by successive parabolic interpolation)
//!
//! ## Configuration
//!
//! [`SolverConfig`] carries:
//! - `tolerance`: Absolute abscissa tolerance (default: 1e-8)
//! - `max_iterations`: Objective evaluation budget (default: 500)
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::solvers::{BrentMinimizer, SolverConfig};
//!
//! // Minimise (x - 2)² on [0, 5]
//! let minimizer = BrentMinimizer::new(SolverConfig::default());
//! let result = minimizer.minimize(|x: f64| (x - 2.0).powi(2), 0.0, 5.0).unwrap();
//!
//! assert!((result.x - 2.0).abs() < 1e-6);
//! ```

mod brent;
mod config;

pub use brent::{BrentMinimizer, MinimizeResult};
pub use config::SolverConfig;
