//! # Random Number Generation
//!
//! - **Reproducibility**: every generator is created from an explicit seed
//! - **Ownership**: one [`PricerRng`] per simulation call, never shared
//! - **Batching**: fill caller-owned `&mut [f64]` slices without allocating
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let mut normals = vec![0.0; 8];
//! rng.fill_normal(&mut normals);
//! ```

pub mod prng;

pub use prng::PricerRng;
