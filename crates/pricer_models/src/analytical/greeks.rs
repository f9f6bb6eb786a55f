//! Closed-form Black-Scholes Greeks.
//!
//! Every sensitivity is computed from the same [`BlackScholesTerms`] used
//! for pricing. Vega and rho are reported per one percentage point move in
//! volatility and rate, theta per calendar day.
//!
//! | Greek | Call | Put |
//! |-------|------|-----|
//! | Delta | N(d₁) | N(d₁) - 1 |
//! | Gamma | φ(d₁) / (S·σ·√T) | same |
//! | Vega  | S·φ(d₁)·√T × 0.01 | same |
//! | Theta | (-S·φ(d₁)·σ/(2√T) - r·K·e^(-rT)·N(d₂)) / 365 | (-S·φ(d₁)·σ/(2√T) + r·K·e^(-rT)·N(-d₂)) / 365 |
//! | Rho   | K·T·e^(-rT)·N(d₂) × 0.01 | -K·T·e^(-rT)·N(-d₂) × 0.01 |

use std::fmt;
use std::str::FromStr;

use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::types::{OptionParams, OptionType, PricingError};

use super::black_scholes::BlackScholesTerms;

/// Calendar days per year used to express theta per day.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// One percentage point, the unit for vega and rho.
pub const PERCENTAGE_POINT: f64 = 0.01;

/// Identifier for a single sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Greek {
    /// ∂V/∂S
    Delta,
    /// ∂²V/∂S²
    Gamma,
    /// ∂V/∂σ per volatility point
    Vega,
    /// -∂V/∂T per calendar day
    Theta,
    /// ∂V/∂r per rate point
    Rho,
}

impl Greek {
    /// All five, in conventional order.
    pub const ALL: [Greek; 5] = [
        Greek::Delta,
        Greek::Gamma,
        Greek::Vega,
        Greek::Theta,
        Greek::Rho,
    ];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Greek::Delta => "delta",
            Greek::Gamma => "gamma",
            Greek::Vega => "vega",
            Greek::Theta => "theta",
            Greek::Rho => "rho",
        }
    }
}

impl fmt::Display for Greek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Greek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Greek::ALL
            .into_iter()
            .find(|g| g.as_str() == lower)
            .ok_or_else(|| format!("Unknown greek '{}'", s))
    }
}

/// All five sensitivities of one option.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// Value change per +1 volatility point
    pub vega: f64,
    /// Value change per calendar day
    pub theta: f64,
    /// Value change per +1 rate point
    pub rho: f64,
}

impl Greeks {
    /// Look up one sensitivity.
    pub fn get(&self, greek: Greek) -> f64 {
        match greek {
            Greek::Delta => self.delta,
            Greek::Gamma => self.gamma,
            Greek::Vega => self.vega,
            Greek::Theta => self.theta,
            Greek::Rho => self.rho,
        }
    }
}

/// Delta: N(d₁) for calls, N(d₁) - 1 for puts.
pub fn delta(params: &OptionParams, option_type: OptionType) -> Result<f64, PricingError> {
    let terms = BlackScholesTerms::from_params(params)?;
    Ok(delta_from_terms(&terms, option_type))
}

/// Gamma: φ(d₁) / (S·σ·√T), identical for calls and puts.
pub fn gamma(params: &OptionParams) -> Result<f64, PricingError> {
    let terms = BlackScholesTerms::from_params(params)?;
    Ok(gamma_from_terms(params, &terms))
}

/// Vega per volatility point, identical for calls and puts.
pub fn vega(params: &OptionParams) -> Result<f64, PricingError> {
    let terms = BlackScholesTerms::from_params(params)?;
    Ok(vega_from_terms(params, &terms))
}

/// Theta per calendar day. Usually negative.
pub fn theta(params: &OptionParams, option_type: OptionType) -> Result<f64, PricingError> {
    let terms = BlackScholesTerms::from_params(params)?;
    Ok(theta_from_terms(params, &terms, option_type))
}

/// Rho per rate point.
pub fn rho(params: &OptionParams, option_type: OptionType) -> Result<f64, PricingError> {
    let terms = BlackScholesTerms::from_params(params)?;
    Ok(rho_from_terms(params, &terms, option_type))
}

/// Single sensitivity selected by `greek`.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionParams, OptionType};
/// use pricer_models::analytical::{greek, Greek};
///
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let gamma = greek(Greek::Gamma, &params, OptionType::Put).unwrap();
/// assert!((gamma - 0.018762).abs() < 1e-6);
/// ```
pub fn greek(
    greek: Greek,
    params: &OptionParams,
    option_type: OptionType,
) -> Result<f64, PricingError> {
    let terms = BlackScholesTerms::from_params(params)?;
    Ok(match greek {
        Greek::Delta => delta_from_terms(&terms, option_type),
        Greek::Gamma => gamma_from_terms(params, &terms),
        Greek::Vega => vega_from_terms(params, &terms),
        Greek::Theta => theta_from_terms(params, &terms, option_type),
        Greek::Rho => rho_from_terms(params, &terms, option_type),
    })
}

/// All five sensitivities from one evaluation of d₁ and d₂.
///
/// # Errors
/// `PricingError::InvalidParameter` for inputs outside their domain.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionParams, OptionType};
/// use pricer_models::analytical::greeks;
///
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let g = greeks(&params, OptionType::Call).unwrap();
///
/// assert!((g.delta - 0.6368).abs() < 1e-4);
/// assert!((g.vega - 0.3752).abs() < 1e-4);
/// assert!((g.theta - (-0.0176)).abs() < 1e-4);
/// assert!((g.rho - 0.5323).abs() < 1e-4);
/// ```
pub fn greeks(params: &OptionParams, option_type: OptionType) -> Result<Greeks, PricingError> {
    let terms = BlackScholesTerms::from_params(params)?;
    Ok(Greeks {
        delta: delta_from_terms(&terms, option_type),
        gamma: gamma_from_terms(params, &terms),
        vega: vega_from_terms(params, &terms),
        theta: theta_from_terms(params, &terms, option_type),
        rho: rho_from_terms(params, &terms, option_type),
    })
}

#[inline]
fn delta_from_terms(terms: &BlackScholesTerms, option_type: OptionType) -> f64 {
    let n_d1 = norm_cdf(terms.d1);
    match option_type {
        OptionType::Call => n_d1,
        OptionType::Put => n_d1 - 1.0,
    }
}

#[inline]
fn gamma_from_terms(params: &OptionParams, terms: &BlackScholesTerms) -> f64 {
    norm_pdf(terms.d1) / (params.spot * params.volatility * terms.sqrt_t)
}

#[inline]
fn vega_from_terms(params: &OptionParams, terms: &BlackScholesTerms) -> f64 {
    params.spot * norm_pdf(terms.d1) * terms.sqrt_t * PERCENTAGE_POINT
}

#[inline]
fn theta_from_terms(params: &OptionParams, terms: &BlackScholesTerms, option_type: OptionType) -> f64 {
    let decay = -(params.spot * norm_pdf(terms.d1) * params.volatility) / (2.0 * terms.sqrt_t);
    let carry = params.rate * params.strike * terms.discount;
    let annual = match option_type {
        OptionType::Call => decay - carry * norm_cdf(terms.d2),
        OptionType::Put => decay + carry * norm_cdf(-terms.d2),
    };
    annual / DAYS_PER_YEAR
}

#[inline]
fn rho_from_terms(params: &OptionParams, terms: &BlackScholesTerms, option_type: OptionType) -> f64 {
    let k_t_df = params.strike * params.expiry * terms.discount;
    let annual = match option_type {
        OptionType::Call => k_t_df * norm_cdf(terms.d2),
        OptionType::Put => -k_t_df * norm_cdf(-terms.d2),
    };
    annual * PERCENTAGE_POINT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::black_scholes::option_price;
    use approx::assert_relative_eq;

    fn reference() -> OptionParams {
        OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
    }

    // ==========================================================
    // Reference Values
    // ==========================================================

    #[test]
    fn test_reference_call_greeks() {
        let g = greeks(&reference(), OptionType::Call).unwrap();

        assert_relative_eq!(g.delta, 0.6368306511756191, epsilon = 1e-10);
        assert_relative_eq!(g.gamma, 0.018762017345846895, epsilon = 1e-10);
        assert_relative_eq!(g.vega, 0.3752403469169379, epsilon = 1e-10);
        assert_relative_eq!(g.theta, -6.414027546438197 / 365.0, epsilon = 1e-10);
        assert_relative_eq!(g.rho, 0.5323248154537634, epsilon = 1e-10);
    }

    #[test]
    fn test_reference_put_greeks() {
        let g = greeks(&reference(), OptionType::Put).unwrap();

        assert_relative_eq!(g.delta, 0.6368306511756191 - 1.0, epsilon = 1e-10);
        assert_relative_eq!(g.gamma, 0.018762017345846895, epsilon = 1e-10);
        assert_relative_eq!(g.vega, 0.3752403469169379, epsilon = 1e-10);
        assert_relative_eq!(g.theta, -1.657880423934626 / 365.0, epsilon = 1e-10);
        assert_relative_eq!(g.rho, -0.4189046090469506, epsilon = 1e-10);
    }

    #[test]
    fn test_single_greek_matches_bundle() {
        let params = reference();
        for style in OptionType::ALL {
            let all = greeks(&params, style).unwrap();
            for g in Greek::ALL {
                assert_eq!(greek(g, &params, style).unwrap(), all.get(g));
            }
            assert_eq!(delta(&params, style).unwrap(), all.delta);
            assert_eq!(gamma(&params).unwrap(), all.gamma);
            assert_eq!(vega(&params).unwrap(), all.vega);
            assert_eq!(theta(&params, style).unwrap(), all.theta);
            assert_eq!(rho(&params, style).unwrap(), all.rho);
        }
    }

    // ==========================================================
    // Sign Conventions and Domain
    // ==========================================================

    #[test]
    fn test_sign_conventions() {
        for spot in [60.0, 90.0, 100.0, 110.0, 160.0] {
            let params = reference().with_spot(spot).unwrap();
            let call = greeks(&params, OptionType::Call).unwrap();
            let put = greeks(&params, OptionType::Put).unwrap();

            assert!((0.0..=1.0).contains(&call.delta));
            assert!((-1.0..=0.0).contains(&put.delta));
            assert!(call.gamma >= 0.0);
            assert!(call.vega >= 0.0);
            assert!(call.theta <= 0.0);
            assert!(call.rho >= 0.0);
            assert!(put.rho <= 0.0);
            assert_relative_eq!(call.delta - put.delta, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut params = reference();
        params.expiry = 0.0;
        assert!(greeks(&params, OptionType::Call).is_err());
        assert!(gamma(&params).is_err());

        let mut params = reference();
        params.volatility = -0.1;
        assert!(matches!(
            vega(&params),
            Err(PricingError::InvalidParameter { name: "volatility", .. })
        ));
    }

    // ==========================================================
    // Finite-Difference Consistency
    // ==========================================================

    #[test]
    fn test_greeks_match_finite_differences() {
        let params = reference();
        let style = OptionType::Call;
        let g = greeks(&params, style).unwrap();
        let price = |p: &OptionParams| option_price(p, style).unwrap();

        let h = 0.01;
        let up = params.with_spot(params.spot + h).unwrap();
        let down = params.with_spot(params.spot - h).unwrap();
        let fd_delta = (price(&up) - price(&down)) / (2.0 * h);
        let fd_gamma = (price(&up) - 2.0 * price(&params) + price(&down)) / (h * h);
        assert_relative_eq!(g.delta, fd_delta, epsilon = 1e-6);
        assert_relative_eq!(g.gamma, fd_gamma, epsilon = 1e-4);

        let hv = 1e-4;
        let vol_up = params.with_volatility(params.volatility + hv).unwrap();
        let vol_down = params.with_volatility(params.volatility - hv).unwrap();
        let fd_vega = (price(&vol_up) - price(&vol_down)) / (2.0 * hv) * PERCENTAGE_POINT;
        assert_relative_eq!(g.vega, fd_vega, epsilon = 1e-6);

        let ht = 1e-4;
        let shorter = params.with_expiry(params.expiry - ht).unwrap();
        let longer = params.with_expiry(params.expiry + ht).unwrap();
        let fd_theta = -(price(&longer) - price(&shorter)) / (2.0 * ht) / DAYS_PER_YEAR;
        assert_relative_eq!(g.theta, fd_theta, epsilon = 1e-6);

        let hr = 1e-5;
        let mut rate_up = params;
        rate_up.rate += hr;
        let mut rate_down = params;
        rate_down.rate -= hr;
        let fd_rho = (price(&rate_up) - price(&rate_down)) / (2.0 * hr) * PERCENTAGE_POINT;
        assert_relative_eq!(g.rho, fd_rho, epsilon = 1e-6);
    }

    #[test]
    fn test_greek_parse_and_display() {
        for g in Greek::ALL {
            assert_eq!(g.to_string().parse::<Greek>().unwrap(), g);
        }
        assert_eq!("VEGA".parse::<Greek>().unwrap(), Greek::Vega);
        assert!("vanna".parse::<Greek>().is_err());
    }
}
