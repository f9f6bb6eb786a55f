//! Option contract and market parameters.

use super::error::{require_finite, require_positive, PricingError};
use super::option::OptionType;

/// Immutable bundle of the five Black–Scholes inputs.
///
/// Every constructor validates: `spot`, `strike`, `expiry` and `volatility`
/// must be finite and strictly positive, `rate` must be finite. There is no
/// clamping of small expiries or volatilities.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionParams;
///
/// let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// assert!((params.discount_factor() - (-0.05_f64).exp()).abs() < 1e-15);
///
/// assert!(OptionParams::new(100.0, 100.0, 0.0, 0.05, 0.2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParams {
    /// Current underlying price `S`.
    pub spot: f64,
    /// Strike price `K`.
    pub strike: f64,
    /// Time to expiry `T` in years.
    pub expiry: f64,
    /// Continuously compounded risk-free rate `r`.
    pub rate: f64,
    /// Annualised volatility `σ`.
    pub volatility: f64,
}

impl OptionParams {
    /// Create validated parameters.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` naming the first offending input.
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, PricingError> {
        let params = Self {
            spot,
            strike,
            expiry,
            rate,
            volatility,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every field against its domain.
    ///
    /// Useful after constructing the struct literally (e.g. from a config
    /// file).
    pub fn validate(&self) -> Result<(), PricingError> {
        require_positive("spot", self.spot)?;
        require_positive("strike", self.strike)?;
        require_positive("expiry", self.expiry)?;
        require_finite("rate", self.rate)?;
        require_positive("volatility", self.volatility)?;
        Ok(())
    }

    /// Copy with a different volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, PricingError> {
        Self::new(self.spot, self.strike, self.expiry, self.rate, volatility)
    }

    /// Copy with a different spot.
    pub fn with_spot(&self, spot: f64) -> Result<Self, PricingError> {
        Self::new(spot, self.strike, self.expiry, self.rate, self.volatility)
    }

    /// Copy with a different expiry.
    pub fn with_expiry(&self, expiry: f64) -> Result<Self, PricingError> {
        Self::new(self.spot, self.strike, expiry, self.rate, self.volatility)
    }

    /// `e^(-rT)`
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// Immediate exercise value `max(±(S - K), 0)`.
    #[inline]
    pub fn intrinsic(&self, option_type: OptionType) -> f64 {
        option_type.payoff(self.spot, self.strike)
    }
}
