//! CLI configuration management
//!
//! Loads an optional TOML file with `[monte_carlo]`, `[implied_vol]` and
//! `[grid]` sections plus a top-level `log_level`. Missing keys take the
//! library defaults; command-line flags are applied on top by each command.
//!
//! ```toml
//! log_level = "info"
//!
//! [monte_carlo]
//! n_paths = 100000
//! steps_per_year = 252
//! step_rounding = "nearest"
//! seed = 42
//!
//! [implied_vol]
//! lower = 0.01
//! upper = 3.0
//! fallback_volatility = 0.3
//!
//! [grid]
//! spot_points = 20
//! vol_points = 20
//! ```

use std::path::Path;
use std::str::FromStr;

use pricer_core::math::solvers::SolverConfig;
use pricer_models::calibration::ImpliedVolConfig;
use pricer_pricing::mc::{
    MonteCarloConfig, StepRounding, DEFAULT_PATHS, DEFAULT_SEED, TRADING_DAYS_PER_YEAR,
};
use pricer_risk::sensitivity::GridSpec;
use serde::Deserialize;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unreadable or malformed file.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// A section holds values the library rejects.
    #[error("Invalid [{section}] configuration: {message}")]
    InvalidSection {
        /// TOML section name
        section: &'static str,
        /// Underlying validation message
        message: String,
    },
}

/// Log levels accepted in the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Engine diagnostics (paths, steps, solver iterations)
    Debug,
    /// Command progress
    Info,
    /// Fallbacks and recoverable problems
    #[default]
    Warn,
    /// Failures only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LogLevel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// `[monte_carlo]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MonteCarloSection {
    /// Number of simulated paths
    pub n_paths: usize,
    /// Time steps per year of expiry
    pub steps_per_year: usize,
    /// Rounding of `T · steps_per_year`
    pub step_rounding: StepRounding,
    /// Seed of the simulation stream
    pub seed: u64,
}

impl Default for MonteCarloSection {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            steps_per_year: TRADING_DAYS_PER_YEAR,
            step_rounding: StepRounding::Nearest,
            seed: DEFAULT_SEED,
        }
    }
}

impl MonteCarloSection {
    /// Builds a validated engine configuration, with optional overrides.
    pub fn to_config(
        &self,
        n_paths: Option<usize>,
        seed: Option<u64>,
    ) -> Result<MonteCarloConfig, ConfigError> {
        MonteCarloConfig::builder()
            .n_paths(n_paths.unwrap_or(self.n_paths))
            .steps_per_year(self.steps_per_year)
            .step_rounding(self.step_rounding)
            .seed(seed.unwrap_or(self.seed))
            .build()
            .map_err(|e| ConfigError::InvalidSection {
                section: "monte_carlo",
                message: e.to_string(),
            })
    }
}

/// `[implied_vol]` section.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImpliedVolSection {
    /// Lower volatility bound
    pub lower: f64,
    /// Upper volatility bound
    pub upper: f64,
    /// Minimiser tolerance on the volatility
    pub tolerance: f64,
    /// Minimiser evaluation budget
    pub max_iterations: usize,
    /// Largest accepted price residual
    pub price_tolerance: f64,
    /// Volatility reported when a solve falls back
    pub fallback_volatility: f64,
}

impl Default for ImpliedVolSection {
    fn default() -> Self {
        let defaults = ImpliedVolConfig::default();
        Self {
            lower: defaults.lower,
            upper: defaults.upper,
            tolerance: defaults.solver.tolerance,
            max_iterations: defaults.solver.max_iterations,
            price_tolerance: defaults.price_tolerance,
            fallback_volatility: defaults.fallback_volatility,
        }
    }
}

impl ImpliedVolSection {
    /// Builds a validated solver configuration.
    pub fn to_config(&self) -> Result<ImpliedVolConfig, ConfigError> {
        let config = ImpliedVolConfig::default()
            .with_bounds(self.lower, self.upper)
            .with_solver(SolverConfig {
                tolerance: self.tolerance,
                max_iterations: self.max_iterations,
            })
            .with_price_tolerance(self.price_tolerance)
            .with_fallback(self.fallback_volatility);
        config
            .validate()
            .map_err(|e| ConfigError::InvalidSection {
                section: "implied_vol",
                message: e.to_string(),
            })?;
        Ok(config)
    }
}

/// Full CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level when `RUST_LOG` is not set
    pub log_level: LogLevel,
    /// Simulation settings
    pub monte_carlo: MonteCarloSection,
    /// Implied volatility solver settings
    pub implied_vol: ImpliedVolSection,
    /// Sensitivity grid shape
    pub grid: GridSpec,
}

impl CliConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.monte_carlo.to_config(None, None)?;
        self.implied_vol.to_config()?;
        self.grid
            .validate()
            .map_err(|e| ConfigError::InvalidSection {
                section: "grid",
                message: e.to_string(),
            })
    }
}
