//! Black-Scholes pricing model for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! Inputs are validated on every call. A zero or negative expiry is an
//! error, never a shortcut to intrinsic value.

use pricer_core::math::distributions::norm_cdf;
use pricer_core::traits::EuropeanPricer;
use pricer_core::types::{require_finite, require_positive, OptionParams, OptionType, PricingError};

/// Intermediate Black-Scholes terms shared by prices and Greeks.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholesTerms;
/// use pricer_core::types::OptionParams;
///
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let terms = BlackScholesTerms::from_params(&params).unwrap();
///
/// assert!((terms.d1 - 0.35).abs() < 1e-12);
/// assert!((terms.d2 - 0.15).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesTerms {
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    pub d1: f64,
    /// d₂ = d₁ - σ√T
    pub d2: f64,
    /// √T
    pub sqrt_t: f64,
    /// e^(-rT)
    pub discount: f64,
}

impl BlackScholesTerms {
    /// Compute the terms from validated parameters.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if any input is outside its domain.
    pub fn from_params(params: &OptionParams) -> Result<Self, PricingError> {
        params.validate()?;
        Ok(Self::compute(
            params.spot,
            params.strike,
            params.expiry,
            params.rate,
            params.volatility,
        ))
    }

    /// Unchecked computation. Callers guarantee the domain.
    #[inline]
    pub(crate) fn compute(spot: f64, strike: f64, expiry: f64, rate: f64, volatility: f64) -> Self {
        let sqrt_t = expiry.sqrt();
        let vol_sqrt_t = volatility * sqrt_t;

        let log_moneyness = (spot / strike).ln();
        let drift = (rate + 0.5 * volatility * volatility) * expiry;
        let d1 = (log_moneyness + drift) / vol_sqrt_t;

        Self {
            d1,
            d2: d1 - vol_sqrt_t,
            sqrt_t,
            discount: (-rate * expiry).exp(),
        }
    }
}

/// Black-Scholes model for European option pricing.
///
/// Holds the market state (spot, rate, volatility); contract terms are
/// passed per call.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0).unwrap();
/// let put_price = bs.price_put(100.0, 1.0).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, any finite value)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` naming the offending input.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0, 0.05, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, PricingError> {
        require_positive("spot", spot)?;
        require_finite("rate", rate)?;
        require_positive("volatility", volatility)?;

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Model for the market state in `params`.
    pub fn from_params(params: &OptionParams) -> Result<Self, PricingError> {
        Self::new(params.spot, params.rate, params.volatility)
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// d₁, d₂, √T and the discount factor for a contract.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` if `strike` or `expiry` is not
    /// finite and positive.
    pub fn terms(&self, strike: f64, expiry: f64) -> Result<BlackScholesTerms, PricingError> {
        require_positive("strike", strike)?;
        require_positive("expiry", expiry)?;
        Ok(BlackScholesTerms::compute(
            self.spot,
            strike,
            expiry,
            self.rate,
            self.volatility,
        ))
    }

    /// Computes the European option price for either style.
    ///
    /// # Errors
    /// - `PricingError::InvalidParameter` for an invalid strike or expiry
    /// - `PricingError::NumericalInstability` if the result is not finite
    pub fn price(
        &self,
        strike: f64,
        expiry: f64,
        option_type: OptionType,
    ) -> Result<f64, PricingError> {
        let terms = self.terms(strike, expiry)?;
        let value = price_from_terms(self.spot, strike, &terms, option_type);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(PricingError::NumericalInstability(format!(
                "Black-Scholes {} price is not finite (S = {}, K = {}, T = {}, σ = {})",
                option_type, self.spot, strike, expiry, self.volatility
            )))
        }
    }

    /// Computes European call option price.
    ///
    /// C = S·N(d₁) - K·e^(-rT)·N(d₂)
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
    /// let price = bs.price_call(100.0, 1.0).unwrap();
    /// assert!((price - 10.4506).abs() < 1e-4);
    /// ```
    #[inline]
    pub fn price_call(&self, strike: f64, expiry: f64) -> Result<f64, PricingError> {
        self.price(strike, expiry, OptionType::Call)
    }

    /// Computes European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
    #[inline]
    pub fn price_put(&self, strike: f64, expiry: f64) -> Result<f64, PricingError> {
        self.price(strike, expiry, OptionType::Put)
    }
}

/// Price from precomputed terms.
#[inline]
pub(crate) fn price_from_terms(
    spot: f64,
    strike: f64,
    terms: &BlackScholesTerms,
    option_type: OptionType,
) -> f64 {
    let value = match option_type {
        OptionType::Call => spot * norm_cdf(terms.d1) - strike * terms.discount * norm_cdf(terms.d2),
        OptionType::Put => {
            strike * terms.discount * norm_cdf(-terms.d2) - spot * norm_cdf(-terms.d1)
        }
    };
    // Cancellation can leave a tiny negative value deep out of the money.
    // NaN passes through so callers can report it.
    if value < 0.0 {
        0.0
    } else {
        value
    }
}

/// Unchecked price for callers that have already validated the domain.
#[inline]
pub(crate) fn price_unchecked(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    option_type: OptionType,
) -> f64 {
    let terms = BlackScholesTerms::compute(spot, strike, expiry, rate, volatility);
    price_from_terms(spot, strike, &terms, option_type)
}

/// European option price for `params`.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionParams, OptionType};
/// use pricer_models::analytical::option_price;
///
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// let put = option_price(&params, OptionType::Put).unwrap();
/// assert!((put - 5.5735).abs() < 1e-4);
/// ```
pub fn option_price(params: &OptionParams, option_type: OptionType) -> Result<f64, PricingError> {
    BlackScholes::from_params(params)?.price(params.strike, params.expiry, option_type)
}

/// European call price for `params`.
pub fn call_price(params: &OptionParams) -> Result<f64, PricingError> {
    option_price(params, OptionType::Call)
}

/// European put price for `params`.
pub fn put_price(params: &OptionParams) -> Result<f64, PricingError> {
    option_price(params, OptionType::Put)
}

/// `C - P - (S - K·e^(-rT))`, zero up to rounding for a consistent model.
pub fn put_call_parity_gap(params: &OptionParams) -> Result<f64, PricingError> {
    let call = call_price(params)?;
    let put = put_price(params)?;
    Ok(call - put - (params.spot - params.strike * params.discount_factor()))
}

/// Closed-form engine behind the [`EuropeanPricer`] seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticalPricer;

impl EuropeanPricer for AnalyticalPricer {
    fn price(&self, params: &OptionParams, option_type: OptionType) -> Result<f64, PricingError> {
        option_price(params, option_type)
    }

    fn name(&self) -> &'static str {
        "black-scholes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> OptionParams {
        OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
    }

    // ==========================================================
    // Constructor Tests
    // ==========================================================

    #[test]
    fn test_new_valid_parameters() {
        let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
        assert_eq!(bs.spot(), 100.0);
        assert_eq!(bs.rate(), 0.05);
        assert_eq!(bs.volatility(), 0.2);
    }

    #[test]
    fn test_new_invalid_spot() {
        for spot in [-100.0, 0.0, f64::NAN] {
            match BlackScholes::new(spot, 0.05, 0.2) {
                Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, "spot"),
                other => panic!("Expected InvalidParameter, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_new_invalid_volatility() {
        for vol in [-0.2, 0.0, f64::INFINITY] {
            match BlackScholes::new(100.0, 0.05, vol) {
                Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, "volatility"),
                other => panic!("Expected InvalidParameter, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_non_positive_expiry_is_error() {
        let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
        for expiry in [0.0, -1.0] {
            match bs.price_call(100.0, expiry) {
                Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, "expiry"),
                other => panic!("Expected InvalidParameter, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_non_positive_strike_is_error() {
        let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
        assert!(bs.price_put(0.0, 1.0).is_err());
        assert!(bs.price_put(-5.0, 1.0).is_err());
    }

    // ==========================================================
    // Reference Values
    // ==========================================================

    #[test]
    fn test_terms_reference() {
        let terms = BlackScholesTerms::from_params(&reference()).unwrap();
        // d1 = (0 + 0.07) / 0.2 = 0.35, d2 = 0.15
        assert_relative_eq!(terms.d1, 0.35, epsilon = 1e-12);
        assert_relative_eq!(terms.d2, 0.15, epsilon = 1e-12);
        assert_relative_eq!(terms.sqrt_t, 1.0, epsilon = 1e-15);
        assert_relative_eq!(terms.discount, (-0.05_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_reference_call_and_put() {
        let params = reference();
        assert_relative_eq!(call_price(&params).unwrap(), 10.450583572185565, epsilon = 1e-9);
        assert_relative_eq!(put_price(&params).unwrap(), 5.573526022256971, epsilon = 1e-9);
    }

    #[test]
    fn test_price_method_matches_free_functions() {
        let params = reference();
        let bs = BlackScholes::from_params(&params).unwrap();
        for style in OptionType::ALL {
            assert_eq!(
                bs.price(params.strike, params.expiry, style).unwrap(),
                option_price(&params, style).unwrap()
            );
        }
    }

    #[test]
    fn test_analytical_pricer_trait() {
        let params = reference();
        let pricer = AnalyticalPricer;
        let (call, put) = pricer.price_pair(&params).unwrap();
        assert_relative_eq!(call, 10.450583572185565, epsilon = 1e-9);
        assert_relative_eq!(put, 5.573526022256971, epsilon = 1e-9);
        assert_eq!(pricer.name(), "black-scholes");
    }

    // ==========================================================
    // Put-Call Parity
    // ==========================================================

    #[test]
    fn test_put_call_parity_reference() {
        assert!(put_call_parity_gap(&reference()).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_put_call_parity_negative_rate() {
        let params = OptionParams::new(80.0, 120.0, 2.5, -0.01, 0.45).unwrap();
        assert!(put_call_parity_gap(&params).unwrap().abs() < 1e-10);
    }

    // ==========================================================
    // Limits
    // ==========================================================

    #[test]
    fn test_short_expiry_approaches_intrinsic() {
        for (spot, style, intrinsic) in [
            (110.0, OptionType::Call, 10.0),
            (90.0, OptionType::Call, 0.0),
            (90.0, OptionType::Put, 10.0),
            (110.0, OptionType::Put, 0.0),
        ] {
            let params = OptionParams::new(spot, 100.0, 1e-8, 0.05, 0.2).unwrap();
            let price = option_price(&params, style).unwrap();
            assert_relative_eq!(price, intrinsic, epsilon = 1e-4);
        }

        let atm = OptionParams::new(100.0, 100.0, 1e-14, 0.05, 0.2).unwrap();
        assert!(call_price(&atm).unwrap() < 1e-5);
    }

    #[test]
    fn test_deep_itm_call_approaches_forward_intrinsic() {
        let params = OptionParams::new(500.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        let expected = 500.0 - 100.0 * (-0.05_f64).exp();
        assert_relative_eq!(call_price(&params).unwrap(), expected, epsilon = 1e-8);
    }

    #[test]
    fn test_deep_otm_is_non_negative() {
        let params = OptionParams::new(10.0, 1000.0, 0.1, 0.05, 0.05).unwrap();
        let price = call_price(&params).unwrap();
        assert!(price >= 0.0);
        assert!(price < 1e-12);
    }

    // ==========================================================
    // Property Tests
    // ==========================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn params_strategy() -> impl Strategy<Value = OptionParams> {
            (
                10.0..500.0_f64,
                10.0..500.0_f64,
                0.01..5.0_f64,
                -0.05..0.15_f64,
                0.01..1.5_f64,
            )
                .prop_map(|(s, k, t, r, v)| OptionParams::new(s, k, t, r, v).unwrap())
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_put_call_parity_holds(params in params_strategy()) {
                let gap = put_call_parity_gap(&params).unwrap();
                prop_assert!(gap.abs() < 1e-9, "parity gap {} for {:?}", gap, params);
            }

            #[test]
            fn test_prices_within_static_bounds(params in params_strategy()) {
                let call = call_price(&params).unwrap();
                let put = put_price(&params).unwrap();
                let df = params.discount_factor();

                prop_assert!(call >= (params.spot - params.strike * df).max(0.0) - 1e-9);
                prop_assert!(call <= params.spot + 1e-9);
                prop_assert!(put >= (params.strike * df - params.spot).max(0.0) - 1e-9);
                prop_assert!(put <= params.strike * df + 1e-9);
            }

            #[test]
            fn test_monotone_in_spot(params in params_strategy(), bump in 1.0001..1.5_f64) {
                let bumped = params.with_spot(params.spot * bump).unwrap();

                let call_lo = call_price(&params).unwrap();
                let call_hi = call_price(&bumped).unwrap();
                prop_assert!(call_hi >= call_lo - 1e-10);

                let put_lo = put_price(&params).unwrap();
                let put_hi = put_price(&bumped).unwrap();
                prop_assert!(put_hi <= put_lo + 1e-10);
            }

            #[test]
            fn test_monotone_in_volatility(params in params_strategy(), bump in 1.0001..1.5_f64) {
                let bumped = params.with_volatility(params.volatility * bump).unwrap();

                prop_assert!(call_price(&bumped).unwrap() >= call_price(&params).unwrap() - 1e-10);
                prop_assert!(put_price(&bumped).unwrap() >= put_price(&params).unwrap() - 1e-10);
            }
        }
    }
}
