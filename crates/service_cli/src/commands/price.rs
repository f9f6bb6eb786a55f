//! Price command implementation
//!
//! Prices the option analytically and by Monte Carlo, with timings and the
//! relative difference between the two.

use std::fmt::Write as _;
use std::time::Instant;

use pricer_core::types::{OptionParams, OptionType};
use pricer_models::analytical::option_price;
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
use serde::Serialize;
use tracing::info;

use super::{emit, OutputFormat};
use crate::{CliError, Result};

/// Analytical and simulated prices of one option.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSummary {
    /// Call or put
    pub option_type: OptionType,
    /// Black-Scholes price
    pub analytical: f64,
    /// Wall time of the analytical price in milliseconds
    pub analytical_ms: f64,
    /// Monte Carlo estimate
    pub monte_carlo: f64,
    /// Standard error of the estimate
    pub std_error: f64,
    /// Simulated paths
    pub n_paths: usize,
    /// Steps per path
    pub n_steps: usize,
    /// Simulation seed
    pub seed: u64,
    /// Wall time of the simulation in milliseconds
    pub monte_carlo_ms: f64,
    /// `|analytical - monte_carlo| / analytical × 100`, absent for a zero price
    pub relative_error_pct: Option<f64>,
}

/// Prices `params` with both engines.
pub fn compute(
    params: &OptionParams,
    option_type: OptionType,
    mc_config: MonteCarloConfig,
) -> Result<PriceSummary> {
    let pricer = MonteCarloPricer::new(mc_config).map_err(|e| CliError::Pricing(e.into()))?;

    let start = Instant::now();
    let analytical = option_price(params, option_type)?;
    let analytical_ms = start.elapsed().as_secs_f64() * 1e3;

    let start = Instant::now();
    let mc = pricer.price(params, option_type)?;
    let monte_carlo_ms = start.elapsed().as_secs_f64() * 1e3;

    let relative_error_pct =
        (analytical > 0.0).then(|| (analytical - mc.price).abs() / analytical * 100.0);

    Ok(PriceSummary {
        option_type,
        analytical,
        analytical_ms,
        monte_carlo: mc.price,
        std_error: mc.std_error,
        n_paths: mc.n_paths,
        n_steps: mc.n_steps,
        seed: mc.seed,
        monte_carlo_ms,
        relative_error_pct,
    })
}

/// Plain-text rendering.
pub fn render_table(summary: &PriceSummary) -> String {
    let mut out = String::new();
    let style = summary.option_type.to_string().to_uppercase();
    let _ = writeln!(
        out,
        "Black-Scholes {} Price: {:.4} ({:.3}ms)",
        style, summary.analytical, summary.analytical_ms
    );
    let _ = writeln!(
        out,
        "Monte Carlo {} Price:   {:.4} ± {:.4} ({:.3}ms, {} paths × {} steps, seed {})",
        style,
        summary.monte_carlo,
        1.96 * summary.std_error,
        summary.monte_carlo_ms,
        summary.n_paths,
        summary.n_steps,
        summary.seed
    );
    match summary.relative_error_pct {
        Some(pct) => {
            let _ = writeln!(out, "Pricing Error: {:.4}%", pct);
        }
        None => {
            let _ = writeln!(out, "Pricing Error: n/a (zero analytical price)");
        }
    }
    out
}

/// Run the price command
pub fn run(
    params: &OptionParams,
    option_type: OptionType,
    mc_config: MonteCarloConfig,
    format: OutputFormat,
) -> Result<()> {
    info!(
        n_paths = mc_config.n_paths(),
        seed = mc_config.seed(),
        "Starting pricing..."
    );
    let summary = compute(params, option_type, mc_config)?;
    emit(&summary, format, render_table)?;
    info!("Pricing complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc(n_paths: usize) -> MonteCarloConfig {
        MonteCarloConfig::builder()
            .n_paths(n_paths)
            .seed(42)
            .build()
            .unwrap()
    }

    #[test]
    fn test_compute_summary() {
        let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        let summary = compute(&params, OptionType::Call, mc(20_000)).unwrap();

        assert!((summary.analytical - 10.450583572185565).abs() < 1e-9);
        assert_eq!(summary.n_paths, 20_000);
        assert_eq!(summary.n_steps, 252);
        assert_eq!(summary.seed, 42);
        let pct = summary.relative_error_pct.unwrap();
        assert!(pct < 5.0, "relative error {}%", pct);
    }

    #[test]
    fn test_zero_price_has_no_relative_error() {
        let params = OptionParams::new(100.0, 1000.0, 0.1, 0.0, 0.05).unwrap();
        let summary = compute(&params, OptionType::Call, mc(100)).unwrap();
        assert!(summary.relative_error_pct.is_none());
        assert!(render_table(&summary).contains("n/a"));
    }

    #[test]
    fn test_table_mentions_both_engines() {
        let params = OptionParams::new(100.0, 95.0, 0.5, 0.02, 0.3).unwrap();
        let table = render_table(&compute(&params, OptionType::Put, mc(1_000)).unwrap());
        assert!(table.contains("Black-Scholes PUT Price"));
        assert!(table.contains("Monte Carlo PUT Price"));
    }
}
