//! Option style.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Exercise payoff style of a European option.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
///
/// let style: OptionType = "put".parse().unwrap();
/// assert_eq!(style, OptionType::Put);
/// assert_eq!(style.payoff(90.0, 100.0), 10.0);
/// assert_eq!(OptionType::Call.payoff(90.0, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike: payoff `max(S - K, 0)`.
    #[default]
    Call,
    /// Right to sell at the strike: payoff `max(K - S, 0)`.
    Put,
}

impl OptionType {
    /// Both styles, call first.
    pub const ALL: [OptionType; 2] = [OptionType::Call, OptionType::Put];

    /// `+1` for calls, `-1` for puts.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Exercise value at terminal spot `spot`.
    #[inline]
    pub fn payoff(self, spot: f64, strike: f64) -> f64 {
        (self.sign() * (spot - strike)).max(0.0)
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown option style.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown option style '{0}' (expected 'call' or 'put')")]
pub struct ParseOptionTypeError(pub String);

impl FromStr for OptionType {
    type Err = ParseOptionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(ParseOptionTypeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        for style in OptionType::ALL {
            let parsed: OptionType = style.to_string().parse().unwrap();
            assert_eq!(parsed, style);
        }
        assert_eq!("CALL".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" p ".parse::<OptionType>().unwrap(), OptionType::Put);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "straddle".parse::<OptionType>().unwrap_err();
        assert_eq!(err, ParseOptionTypeError("straddle".to_string()));
        assert!(err.to_string().contains("straddle"));
    }

    #[test]
    fn test_payoff_is_hard_max() {
        assert_eq!(OptionType::Call.payoff(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.payoff(100.0, 100.0), 0.0);
        assert_eq!(OptionType::Call.payoff(50.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.payoff(50.0, 100.0), 50.0);
        assert_eq!(OptionType::Put.payoff(150.0, 100.0), 0.0);
    }

    #[test]
    fn test_default_is_call() {
        assert_eq!(OptionType::default(), OptionType::Call);
    }
}
