//! Pricing seam shared by the analytical and simulation engines.

use crate::types::{OptionParams, OptionType, PricingError};

/// An engine that prices a European option from its five inputs.
///
/// Implementations are stateless with respect to a call: pricing the same
/// inputs twice yields the same value (simulation engines carry their seed
/// in their configuration).
///
/// # Examples
/// ```
/// use pricer_core::traits::EuropeanPricer;
/// use pricer_core::types::{OptionParams, OptionType, PricingError};
///
/// struct Intrinsic;
///
/// impl EuropeanPricer for Intrinsic {
///     fn price(&self, params: &OptionParams, option_type: OptionType) -> Result<f64, PricingError> {
///         Ok(params.intrinsic(option_type))
///     }
///
///     fn name(&self) -> &'static str {
///         "intrinsic"
///     }
/// }
///
/// let params = OptionParams::new(105.0, 100.0, 1.0, 0.0, 0.2).unwrap();
/// assert_eq!(Intrinsic.price(&params, OptionType::Call).unwrap(), 5.0);
/// ```
pub trait EuropeanPricer {
    /// Present value of the option.
    ///
    /// # Errors
    /// `PricingError::InvalidParameter` for inputs outside their domain.
    fn price(&self, params: &OptionParams, option_type: OptionType) -> Result<f64, PricingError>;

    /// Short engine name used in reports and logs.
    fn name(&self) -> &'static str;

    /// Price both styles.
    fn price_pair(&self, params: &OptionParams) -> Result<(f64, f64), PricingError> {
        Ok((
            self.price(params, OptionType::Call)?,
            self.price(params, OptionType::Put)?,
        ))
    }
}
