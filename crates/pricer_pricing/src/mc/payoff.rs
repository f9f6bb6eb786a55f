//! European payoff evaluation.
//!
//! Payoffs are the exact hard `max`: `max(S_T - K, 0)` for calls and
//! `max(K - S_T, 0)` for puts.

use pricer_core::types::OptionType;

use super::workspace::PathWorkspace;

/// Strike and style of a European payoff.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PayoffParams;
///
/// let call = PayoffParams::call(100.0);
/// assert_eq!(call.evaluate(112.5), 12.5);
/// assert_eq!(PayoffParams::put(100.0).evaluate(112.5), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PayoffParams {
    /// Strike price (K).
    pub strike: f64,
    /// Call or put.
    pub option_type: OptionType,
}

impl PayoffParams {
    /// Creates payoff parameters.
    #[inline]
    pub fn new(strike: f64, option_type: OptionType) -> Self {
        Self {
            strike,
            option_type,
        }
    }

    /// Call payoff with strike `strike`.
    #[inline]
    pub fn call(strike: f64) -> Self {
        Self::new(strike, OptionType::Call)
    }

    /// Put payoff with strike `strike`.
    #[inline]
    pub fn put(strike: f64) -> Self {
        Self::new(strike, OptionType::Put)
    }

    /// Payoff at terminal price `terminal`.
    #[inline]
    pub fn evaluate(&self, terminal: f64) -> f64 {
        self.option_type.payoff(terminal, self.strike)
    }
}

/// Writes the payoff of every path's terminal price into the workspace.
pub fn compute_payoffs(workspace: &mut PathWorkspace, payoff: PayoffParams) {
    let (terminal, payoffs) = workspace.terminal_and_payoffs_mut();
    for (out, &s_t) in payoffs.iter_mut().zip(terminal) {
        *out = payoff.evaluate(s_t);
    }
}
