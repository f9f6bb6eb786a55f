//! Monte Carlo pricing engine.
//!
//! # Overview
//!
//! The [`MonteCarloPricer`] coordinates:
//! 1. Random number generation (via [`PricerRng`])
//! 2. Path generation (via [`generate_gbm_paths`])
//! 3. Payoff computation (via [`compute_payoffs`])
//! 4. Discounting and aggregation
//!
//! # Workspace Ownership
//!
//! Every pricing call allocates its own [`PathWorkspace`] and drops it on
//! return. The pricer itself only holds its configuration, so one pricer
//! can be shared across threads.

use pricer_core::traits::EuropeanPricer;
use pricer_core::types::{OptionParams, OptionType, PricingError};
use tracing::debug;

use super::config::MonteCarloConfig;
use super::error::ConfigError;
use super::paths::{generate_gbm_paths, GbmParams};
use super::payoff::{compute_payoffs, PayoffParams};
use super::workspace::PathWorkspace;
use crate::rng::PricerRng;

/// Monte Carlo price estimate with its sampling diagnostics.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingResult;
///
/// let result = PricingResult {
///     price: 10.5,
///     std_error: 0.05,
///     n_paths: 10_000,
///     n_steps: 252,
///     seed: 42,
/// };
///
/// assert!((result.confidence_95() - 0.098).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PricingResult {
    /// Discounted mean payoff.
    pub price: f64,
    /// Standard error of the discounted estimate (NaN for a single path).
    pub std_error: f64,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Number of time steps per path.
    pub n_steps: usize,
    /// Seed of the simulation stream.
    pub seed: u64,
}

impl PricingResult {
    /// Half-width of the 95% confidence interval.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Half-width of the 99% confidence interval.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Monte Carlo pricer for European options under risk-neutral GBM.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{OptionParams, OptionType};
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(20_000)
///     .seed(42)
///     .build()
///     .unwrap();
/// let pricer = MonteCarloPricer::new(config).unwrap();
///
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let result = pricer.price(&params, OptionType::Call).unwrap();
///
/// println!("Price: {} +/- {}", result.price, result.confidence_95());
/// assert!((result.price - 10.45).abs() < 4.0 * result.std_error);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
}

impl MonteCarloPricer {
    /// Creates a pricer from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn new(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Prices a European option with a stream seeded from the configuration.
    ///
    /// Identical parameters, path count and seed give bit-identical results.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for invalid option parameters
    /// - `NumericalInstability` if the estimate is not finite
    pub fn price(
        &self,
        params: &OptionParams,
        option_type: OptionType,
    ) -> Result<PricingResult, PricingError> {
        let mut rng = PricerRng::from_seed(self.config.seed());
        self.price_with_rng(params, option_type, &mut rng)
    }

    /// Prices a European option drawing from a caller-owned stream.
    ///
    /// The stream advances by `n_paths × n_steps` normal draws.
    ///
    /// # Errors
    ///
    /// Same as [`price`](Self::price).
    pub fn price_with_rng(
        &self,
        params: &OptionParams,
        option_type: OptionType,
        rng: &mut PricerRng,
    ) -> Result<PricingResult, PricingError> {
        params.validate()?;

        let n_paths = self.config.n_paths();
        let n_steps = self.config.n_steps_for(params.expiry);

        debug!(
            n_paths,
            n_steps,
            seed = rng.seed(),
            option_type = %option_type,
            "running Monte Carlo simulation"
        );

        let mut workspace = PathWorkspace::new(n_paths, n_steps);
        generate_gbm_paths(&mut workspace, GbmParams::from(params), rng);
        compute_payoffs(
            &mut workspace,
            PayoffParams::new(params.strike, option_type),
        );

        // Aggregate: discounted mean and standard error
        let payoffs = workspace.payoffs();
        let mean = payoffs.iter().sum::<f64>() / n_paths as f64;
        let variance =
            payoffs.iter().map(|&p| (p - mean).powi(2)).sum::<f64>() / (n_paths - 1) as f64;
        let std_error = variance.sqrt() / (n_paths as f64).sqrt();

        let discount_factor = params.discount_factor();
        let price = mean * discount_factor;
        if !price.is_finite() {
            return Err(PricingError::NumericalInstability(format!(
                "Monte Carlo estimate is not finite ({}) for volatility {} and expiry {}",
                price, params.volatility, params.expiry
            )));
        }

        Ok(PricingResult {
            price,
            std_error: std_error * discount_factor,
            n_paths,
            n_steps,
            seed: rng.seed(),
        })
    }
}

impl EuropeanPricer for MonteCarloPricer {
    fn price(&self, params: &OptionParams, option_type: OptionType) -> Result<f64, PricingError> {
        MonteCarloPricer::price(self, params, option_type).map(|result| result.price)
    }

    fn name(&self) -> &'static str {
        "monte-carlo"
    }
}

/// Monte Carlo price with `n_paths` paths, the default step policy and `seed`.
///
/// # Errors
///
/// - `InvalidParameter` if `n_paths` is 0, exceeds the
///   [`MAX_PATHS`](super::config::MAX_PATHS) buffer limit, or the option
///   parameters are invalid
/// - `NumericalInstability` if the estimate is not finite
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{OptionParams, OptionType};
/// use pricer_pricing::mc::monte_carlo_price;
///
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let a = monte_carlo_price(&params, OptionType::Put, 5_000, 7).unwrap();
/// let b = monte_carlo_price(&params, OptionType::Put, 5_000, 7).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn monte_carlo_price(
    params: &OptionParams,
    option_type: OptionType,
    n_paths: usize,
    seed: u64,
) -> Result<f64, PricingError> {
    let config = MonteCarloConfig::builder()
        .n_paths(n_paths)
        .seed(seed)
        .build()?;
    MonteCarloPricer::new(config)?
        .price(params, option_type)
        .map(|result| result.price)
}
