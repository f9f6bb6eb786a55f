//! Monte Carlo simulation configuration.
//!
//! This module provides the configuration type and builder for the
//! simulation pricer: path count, time-step policy and seed.

use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;

/// Resource limit on simulation paths.
///
/// Not a domain constraint on the estimator: larger counts are rejected to
/// bound the N × (steps + 1) path buffer allocated per call.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps per year allowed.
pub const MAX_STEPS: usize = 10_000;

/// Default number of simulation paths.
pub const DEFAULT_PATHS: usize = 100_000;

/// Trading days per year, the default step density.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Default seed.
pub const DEFAULT_SEED: u64 = 42;

/// How `T · steps_per_year` is turned into a whole number of steps.
///
/// Both policies use at least one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StepRounding {
    /// Round to the nearest integer.
    #[default]
    Nearest,
    /// Drop the fractional part.
    Truncate,
}

impl StepRounding {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            StepRounding::Nearest => "nearest",
            StepRounding::Truncate => "truncate",
        }
    }
}

impl fmt::Display for StepRounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepRounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "round" => Ok(StepRounding::Nearest),
            "truncate" | "floor" => Ok(StepRounding::Truncate),
            _ => Err(format!("Unknown step rounding '{}'", s)),
        }
    }
}

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{MonteCarloConfig, StepRounding};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .seed(7)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.steps_per_year(), 252);
/// assert_eq!(config.step_rounding(), StepRounding::Nearest);
/// assert_eq!(config.n_steps_for(1.0), 252);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonteCarloConfig {
    /// Number of simulation paths.
    n_paths: usize,
    /// Time steps per year of expiry.
    steps_per_year: usize,
    /// Rounding policy for the step count.
    step_rounding: StepRounding,
    /// Seed for the simulation stream.
    seed: u64,
}

impl Default for MonteCarloConfig {
    /// 100,000 paths, 252 steps per year, nearest rounding, seed 42.
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            steps_per_year: TRADING_DAYS_PER_YEAR,
            step_rounding: StepRounding::Nearest,
            seed: DEFAULT_SEED,
        }
    }
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps per year.
    #[inline]
    pub fn steps_per_year(&self) -> usize {
        self.steps_per_year
    }

    /// Returns the step rounding policy.
    #[inline]
    pub fn step_rounding(&self) -> StepRounding {
        self.step_rounding
    }

    /// Returns the seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Same configuration with a different seed.
    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of time steps used for an option with expiry `expiry` years.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::mc::{MonteCarloConfig, StepRounding};
    ///
    /// let nearest = MonteCarloConfig::default();
    /// assert_eq!(nearest.n_steps_for(0.5), 126);
    /// assert_eq!(nearest.n_steps_for(0.0031), 1);
    ///
    /// let truncate = MonteCarloConfig::builder()
    ///     .step_rounding(StepRounding::Truncate)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(truncate.n_steps_for(0.999), 251);
    /// assert_eq!(nearest.n_steps_for(0.999), 252);
    /// ```
    pub fn n_steps_for(&self, expiry: f64) -> usize {
        let raw = expiry * self.steps_per_year as f64;
        let whole = match self.step_rounding {
            StepRounding::Nearest => raw.round(),
            StepRounding::Truncate => raw.floor(),
        };
        // Saturating float-to-int cast; NaN maps to zero.
        (whole as usize).max(1)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0 or greater than 10,000,000
    /// - `steps_per_year` is 0 or greater than 10,000
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_paths(self.n_paths)?;
        ConfigError::check_steps(self.steps_per_year)?;
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Unset fields take the [`MonteCarloConfig::default`] values.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(50_000)
///     .steps_per_year(365)
///     .seed(12345)
///     .build()
///     .expect("valid config");
///
/// assert!(MonteCarloConfig::builder().n_paths(0).build().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    steps_per_year: Option<usize>,
    step_rounding: StepRounding,
    seed: Option<u64>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths (1 ..= 10,000,000).
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per year (1 ..= 10,000).
    #[inline]
    pub fn steps_per_year(mut self, steps_per_year: usize) -> Self {
        self.steps_per_year = Some(steps_per_year);
        self
    }

    /// Sets the step rounding policy.
    #[inline]
    pub fn step_rounding(mut self, step_rounding: StepRounding) -> Self {
        self.step_rounding = step_rounding;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_paths` or `steps_per_year` is out of range.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let config = MonteCarloConfig {
            n_paths: self.n_paths.unwrap_or(DEFAULT_PATHS),
            steps_per_year: self.steps_per_year.unwrap_or(TRADING_DAYS_PER_YEAR),
            step_rounding: self.step_rounding,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
        };

        config.validate()?;
        Ok(config)
    }
}
