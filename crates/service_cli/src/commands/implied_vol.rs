//! Implied volatility command implementation
//!
//! Solves for the volatility that reproduces a market price. A solve that
//! falls back is reported in full and then surfaced as a non-convergence
//! error so the process exits with its own code.

use std::fmt::Write as _;

use pricer_core::types::{OptionParams, OptionType};
use pricer_models::analytical::option_price;
use pricer_models::calibration::{
    arbitrage_bounds, ImpliedVolConfig, ImpliedVolSolver, ImpliedVolatility,
};
use serde::Serialize;
use tracing::{info, warn};

use super::{emit, OutputFormat};
use crate::Result;

/// Result of one implied volatility solve.
#[derive(Debug, Clone, Serialize)]
pub struct ImpliedVolSummary {
    /// Call or put
    pub option_type: OptionType,
    /// Target price
    pub market_price: f64,
    /// No-arbitrage interval for the target price
    pub arbitrage_bounds: (f64, f64),
    /// Whether the solve converged
    pub converged: bool,
    /// Solved volatility, or the fallback
    pub volatility: f64,
    /// Minimiser's best point when one exists
    pub best_estimate: Option<f64>,
    /// Black-Scholes price at `volatility`
    pub recovered_price: f64,
    /// `|recovered_price - market_price|`
    pub residual: f64,
    /// Objective evaluations used by a converged solve
    pub iterations: Option<usize>,
    /// Why the solve fell back
    pub fallback_reason: Option<String>,
}

/// Solves and summarises. `params.volatility` is ignored.
pub fn compute(
    params: &OptionParams,
    option_type: OptionType,
    market_price: f64,
    config: ImpliedVolConfig,
) -> Result<(ImpliedVolSummary, ImpliedVolatility)> {
    let solver = ImpliedVolSolver::new(config)?;
    let outcome = solver.solve(
        params.spot,
        params.strike,
        params.expiry,
        params.rate,
        market_price,
        option_type,
    )?;

    let volatility = outcome.value();
    let recovered_price = option_price(&params.with_volatility(volatility)?, option_type)?;
    let (iterations, fallback_reason) = match &outcome {
        ImpliedVolatility::Converged { iterations, .. } => (Some(*iterations), None),
        ImpliedVolatility::FellBack { reason, .. } => (None, Some(reason.to_string())),
    };

    let summary = ImpliedVolSummary {
        option_type,
        market_price,
        arbitrage_bounds: arbitrage_bounds(
            params.spot,
            params.strike,
            params.expiry,
            params.rate,
            option_type,
        )?,
        converged: outcome.is_converged(),
        volatility,
        best_estimate: outcome.best_estimate(),
        recovered_price,
        residual: (recovered_price - market_price).abs(),
        iterations,
        fallback_reason,
    };
    Ok((summary, outcome))
}

/// Plain-text rendering.
pub fn render_table(summary: &ImpliedVolSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Market Price: {:.4}", summary.market_price);
    let _ = writeln!(
        out,
        "No-Arbitrage Range: [{:.4}, {:.4}]",
        summary.arbitrage_bounds.0, summary.arbitrage_bounds.1
    );
    if summary.converged {
        let _ = writeln!(
            out,
            "Implied Volatility: {:.4} ({:.2}%)",
            summary.volatility,
            summary.volatility * 100.0
        );
    } else {
        let _ = writeln!(
            out,
            "WARNING: solver fell back to {:.4} ({})",
            summary.volatility,
            summary.fallback_reason.as_deref().unwrap_or("unknown reason")
        );
        if let Some(best) = summary.best_estimate {
            let _ = writeln!(out, "Best Estimate: {:.4}", best);
        }
    }
    let _ = writeln!(out, "Recovered Price: {:.4}", summary.recovered_price);
    let _ = writeln!(out, "Solver Accuracy: {:.6}", summary.residual);
    if let Some(iterations) = summary.iterations {
        let _ = writeln!(out, "Evaluations: {}", iterations);
    }
    out
}

/// Run the implied-vol command
pub fn run(
    params: &OptionParams,
    option_type: OptionType,
    market_price: f64,
    config: ImpliedVolConfig,
    format: OutputFormat,
) -> Result<()> {
    info!(market_price, option_type = %option_type, "Solving implied volatility...");
    let (summary, outcome) = compute(params, option_type, market_price, config)?;
    emit(&summary, format, render_table)?;

    if !summary.converged {
        warn!(
            fallback = summary.volatility,
            reason = summary.fallback_reason.as_deref().unwrap_or_default(),
            "Implied volatility did not converge"
        );
    }
    outcome.into_result()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    fn atm() -> OptionParams {
        OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn test_reference_quote_converges() {
        let (summary, outcome) =
            compute(&atm(), OptionType::Call, 10.45, ImpliedVolConfig::default()).unwrap();

        assert!(outcome.is_converged());
        assert!(summary.converged);
        assert!((summary.volatility - 0.2).abs() < 1e-3);
        assert!(summary.residual < 1e-4);
        assert!(summary.iterations.is_some());
        assert!(render_table(&summary).contains("Implied Volatility: 0.2"));
    }

    #[test]
    fn test_unattainable_price_falls_back() {
        // Above the call's upper bound S.
        let (summary, outcome) =
            compute(&atm(), OptionType::Call, 150.0, ImpliedVolConfig::default()).unwrap();

        assert!(!summary.converged);
        assert_eq!(summary.volatility, 0.3);
        assert!(summary.fallback_reason.is_some());
        assert!(summary.best_estimate.is_some());
        assert!(render_table(&summary).contains("WARNING"));

        let err = CliError::from(outcome.into_result().unwrap_err());
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_negative_price_is_invalid_parameter() {
        let err = compute(&atm(), OptionType::Put, -1.0, ImpliedVolConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
