//! Implied volatility by bounded minimisation.
//!
//! The solver minimises `|BS(σ) - market_price|` over `σ ∈ [lower, upper]`
//! with Brent's bounded minimiser. No vega is needed.
//!
//! The outcome is tagged: a converged volatility with its residual, or the
//! configured fallback together with the reason the solve was rejected.

use pricer_core::math::solvers::{BrentMinimizer, SolverConfig};
use pricer_core::types::{
    require_finite, require_positive, OptionType, PricingError, SolverError,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::analytical::black_scholes::price_unchecked;

/// Configuration for [`ImpliedVolSolver`].
///
/// # Examples
/// ```
/// use pricer_models::calibration::ImpliedVolConfig;
///
/// let config = ImpliedVolConfig::default();
/// assert_eq!(config.lower, 0.01);
/// assert_eq!(config.upper, 3.0);
/// assert_eq!(config.fallback_volatility, 0.3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolConfig {
    /// Lower volatility bound of the search.
    pub lower: f64,
    /// Upper volatility bound of the search.
    pub upper: f64,
    /// Minimiser tolerance and evaluation budget.
    pub solver: SolverConfig<f64>,
    /// Largest accepted `|BS(σ̂) - market_price|`.
    pub price_tolerance: f64,
    /// Volatility reported when the solve is rejected.
    pub fallback_volatility: f64,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            lower: 0.01,
            upper: 3.0,
            solver: SolverConfig::default(),
            price_tolerance: 1e-4,
            fallback_volatility: 0.3,
        }
    }
}

impl ImpliedVolConfig {
    /// Replace the search interval.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    /// Replace the fallback volatility.
    pub fn with_fallback(mut self, fallback_volatility: f64) -> Self {
        self.fallback_volatility = fallback_volatility;
        self
    }

    /// Replace the accepted price residual.
    pub fn with_price_tolerance(mut self, price_tolerance: f64) -> Self {
        self.price_tolerance = price_tolerance;
        self
    }

    /// Replace the minimiser configuration.
    pub fn with_solver(mut self, solver: SolverConfig<f64>) -> Self {
        self.solver = solver;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if a bound, tolerance or the
    /// fallback is not finite and positive, or if `upper <= lower`.
    pub fn validate(&self) -> Result<(), PricingError> {
        require_positive("lower", self.lower)?;
        require_positive("upper", self.upper)?;
        if self.upper <= self.lower {
            return Err(PricingError::invalid_parameter(
                "upper",
                self.upper,
                "must exceed the lower volatility bound",
            ));
        }
        require_positive("solver_tolerance", self.solver.tolerance)?;
        if self.solver.max_iterations == 0 {
            return Err(PricingError::invalid_parameter(
                "max_iterations",
                0.0,
                "must be at least 1",
            ));
        }
        require_positive("price_tolerance", self.price_tolerance)?;
        require_positive("fallback_volatility", self.fallback_volatility)?;
        Ok(())
    }
}

/// Why a solve fell back to the default volatility.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// The minimiser finished, but no volatility in range reproduces the
    /// market price. Happens for prices outside the no-arbitrage interval
    /// or needing a volatility beyond the search bounds.
    #[error("best volatility {best_estimate} leaves a price residual of {residual}")]
    ResidualAboveTolerance {
        /// Minimiser's best point (at or near a search bound when the
        /// price is unattainable)
        best_estimate: f64,
        /// `|BS(best_estimate) - market_price|`
        residual: f64,
    },

    /// The minimiser itself failed.
    #[error("minimiser failed: {0}")]
    Solver(#[from] SolverError),
}

/// Outcome of an implied-volatility solve.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::calibration::implied_volatility;
///
/// let outcome = implied_volatility(100.0, 100.0, 1.0, 0.05, 10.45, OptionType::Call).unwrap();
/// assert!(outcome.is_converged());
/// assert!((outcome.value() - 0.2).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ImpliedVolatility {
    /// The price was matched within tolerance.
    Converged {
        /// Implied volatility
        volatility: f64,
        /// `|BS(volatility) - market_price|`
        residual: f64,
        /// Objective evaluations used
        iterations: usize,
    },
    /// The solve was rejected; `volatility` is the configured default.
    FellBack {
        /// Fallback volatility
        volatility: f64,
        /// Why the solve was rejected
        reason: FallbackReason,
    },
}

impl ImpliedVolatility {
    /// Volatility carried by the outcome (solved or fallback).
    pub fn value(&self) -> f64 {
        match self {
            ImpliedVolatility::Converged { volatility, .. }
            | ImpliedVolatility::FellBack { volatility, .. } => *volatility,
        }
    }

    /// `true` for [`ImpliedVolatility::Converged`].
    pub fn is_converged(&self) -> bool {
        matches!(self, ImpliedVolatility::Converged { .. })
    }

    /// Minimiser's best point, if the minimiser produced one.
    ///
    /// For a rejected solve this is the boundary-nearest point the search
    /// ended at, which can be more informative than the fallback.
    pub fn best_estimate(&self) -> Option<f64> {
        match self {
            ImpliedVolatility::Converged { volatility, .. } => Some(*volatility),
            ImpliedVolatility::FellBack {
                reason: FallbackReason::ResidualAboveTolerance { best_estimate, .. },
                ..
            } => Some(*best_estimate),
            ImpliedVolatility::FellBack { .. } => None,
        }
    }

    /// Convert into a strict result.
    ///
    /// # Errors
    /// `PricingError::SolverNonConvergence` for a fallback outcome.
    pub fn into_result(self) -> Result<f64, PricingError> {
        match self {
            ImpliedVolatility::Converged { volatility, .. } => Ok(volatility),
            ImpliedVolatility::FellBack { volatility, reason } => {
                Err(PricingError::SolverNonConvergence {
                    fallback: volatility,
                    reason: reason.to_string(),
                })
            }
        }
    }
}

/// No-arbitrage price interval for a European option.
///
/// - Call: `[max(S - K·e^(-rT), 0), S]`
/// - Put: `[max(K·e^(-rT) - S, 0), K·e^(-rT)]`
///
/// # Errors
/// `PricingError::InvalidParameter` for invalid `spot`, `strike`, `expiry`
/// or a non-finite `rate`.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::calibration::arbitrage_bounds;
///
/// let (lower, upper) = arbitrage_bounds(100.0, 100.0, 1.0, 0.05, OptionType::Call).unwrap();
/// assert!((lower - (100.0 - 100.0 * (-0.05_f64).exp())).abs() < 1e-12);
/// assert_eq!(upper, 100.0);
/// ```
pub fn arbitrage_bounds(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    option_type: OptionType,
) -> Result<(f64, f64), PricingError> {
    validate_contract(spot, strike, expiry, rate)?;
    let pv_strike = strike * (-rate * expiry).exp();
    Ok(match option_type {
        OptionType::Call => ((spot - pv_strike).max(0.0), spot),
        OptionType::Put => ((pv_strike - spot).max(0.0), pv_strike),
    })
}

/// `true` if `price` lies inside [`arbitrage_bounds`].
pub fn within_arbitrage_bounds(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    price: f64,
    option_type: OptionType,
) -> Result<bool, PricingError> {
    let (lower, upper) = arbitrage_bounds(spot, strike, expiry, rate, option_type)?;
    Ok(price >= lower && price <= upper)
}

/// Implied volatility solver.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::calibration::{ImpliedVolConfig, ImpliedVolSolver};
///
/// let solver = ImpliedVolSolver::new(ImpliedVolConfig::default()).unwrap();
/// let outcome = solver.solve(100.0, 100.0, 1.0, 0.05, 5.5735, OptionType::Put).unwrap();
/// assert!((outcome.value() - 0.2).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct ImpliedVolSolver {
    config: ImpliedVolConfig,
    minimizer: BrentMinimizer<f64>,
}

impl ImpliedVolSolver {
    /// Create a solver after validating `config`.
    pub fn new(config: ImpliedVolConfig) -> Result<Self, PricingError> {
        config.validate()?;
        Ok(Self {
            config,
            minimizer: BrentMinimizer::new(config.solver),
        })
    }

    /// Access the configuration.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Solve for the volatility that reproduces `market_price`.
    ///
    /// # Returns
    /// * `Ok(ImpliedVolatility::Converged)` when the residual is within
    ///   `price_tolerance`
    /// * `Ok(ImpliedVolatility::FellBack)` otherwise, carrying the reason
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` for invalid `spot`, `strike`,
    /// `expiry`, a non-finite `rate`, or a negative or non-finite
    /// `market_price`. Domain errors never fall back.
    pub fn solve(
        &self,
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        market_price: f64,
        option_type: OptionType,
    ) -> Result<ImpliedVolatility, PricingError> {
        validate_contract(spot, strike, expiry, rate)?;
        if !(market_price.is_finite() && market_price >= 0.0) {
            return Err(PricingError::invalid_parameter(
                "market_price",
                market_price,
                "must be finite and non-negative",
            ));
        }

        let objective = |sigma: f64| {
            (price_unchecked(spot, strike, expiry, rate, sigma, option_type) - market_price).abs()
        };

        let fallback = self.config.fallback_volatility;
        let outcome = match self
            .minimizer
            .minimize(objective, self.config.lower, self.config.upper)
        {
            Ok(result) if result.fun <= self.config.price_tolerance => {
                debug!(
                    volatility = result.x,
                    residual = result.fun,
                    iterations = result.iterations,
                    "implied volatility converged"
                );
                ImpliedVolatility::Converged {
                    volatility: result.x,
                    residual: result.fun,
                    iterations: result.iterations,
                }
            }
            Ok(result) => {
                warn!(
                    market_price,
                    best_estimate = result.x,
                    residual = result.fun,
                    fallback,
                    "implied volatility residual above tolerance, falling back"
                );
                ImpliedVolatility::FellBack {
                    volatility: fallback,
                    reason: FallbackReason::ResidualAboveTolerance {
                        best_estimate: result.x,
                        residual: result.fun,
                    },
                }
            }
            Err(err) => {
                warn!(market_price, error = %err, fallback, "implied volatility solver failed, falling back");
                ImpliedVolatility::FellBack {
                    volatility: fallback,
                    reason: FallbackReason::Solver(err),
                }
            }
        };

        Ok(outcome)
    }
}

/// Solve with [`ImpliedVolConfig::default`].
///
/// # Errors
/// Same domain errors as [`ImpliedVolSolver::solve`].
pub fn implied_volatility(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    market_price: f64,
    option_type: OptionType,
) -> Result<ImpliedVolatility, PricingError> {
    ImpliedVolSolver::new(ImpliedVolConfig::default())?
        .solve(spot, strike, expiry, rate, market_price, option_type)
}

fn validate_contract(spot: f64, strike: f64, expiry: f64, rate: f64) -> Result<(), PricingError> {
    require_positive("spot", spot)?;
    require_positive("strike", strike)?;
    require_positive("expiry", expiry)?;
    require_finite("rate", rate)
}
