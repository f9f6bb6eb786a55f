//! Report command implementation
//!
//! Runs the full sequence: pricing benchmark, Greeks, implied volatility
//! and the four sensitivity grids. Grids go to CSV files in the output
//! directory; the text report is printed and saved as `report.txt`.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use pricer_core::types::{OptionParams, OptionType};
use pricer_models::calibration::ImpliedVolConfig;
use pricer_pricing::mc::MonteCarloConfig;
use pricer_risk::sensitivity::GridSpec;
use tracing::{info, warn};

use super::grid::{self, GreekSelection};
use super::{greeks, implied_vol, price};
use crate::Result;

const RULE_WIDTH: usize = 60;

/// Inputs of a full report.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Contract and market
    pub params: OptionParams,
    /// Call or put
    pub option_type: OptionType,
    /// Price to invert for implied volatility
    pub market_price: f64,
    /// Simulation settings
    pub monte_carlo: MonteCarloConfig,
    /// Solver settings
    pub implied_vol: ImpliedVolConfig,
    /// Grid shape
    pub grid: GridSpec,
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title);
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
}

/// Builds the report text and writes grid files into `output_dir`.
///
/// Returns the report text and the grid file paths.
pub fn generate(request: &ReportRequest, output_dir: &Path) -> Result<(String, Vec<PathBuf>)> {
    fs::create_dir_all(output_dir)?;

    let mut out = String::new();
    let banner = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{}", banner);
    let _ = writeln!(out, "OPTION PRICER - BLACK-SCHOLES & MONTE CARLO");
    let _ = writeln!(out, "{}", banner);
    let p = &request.params;
    let _ = writeln!(
        out,
        "S = {}, K = {}, T = {}, r = {}, σ = {}, style = {}",
        p.spot, p.strike, p.expiry, p.rate, p.volatility, request.option_type
    );

    section(&mut out, "[1] PRICING & PERFORMANCE BENCHMARK");
    let summary = price::compute(p, request.option_type, request.monte_carlo.clone())?;
    out.push_str(&price::render_table(&summary));

    section(&mut out, "[2] GREEKS CALCULATION");
    out.push_str(&greeks::render_table(&greeks::compute(
        p,
        request.option_type,
    )?));

    section(&mut out, "[3] IMPLIED VOLATILITY SOLVER");
    let (iv, _) = implied_vol::compute(
        p,
        request.option_type,
        request.market_price,
        request.implied_vol,
    )?;
    if !iv.converged {
        warn!(
            market_price = request.market_price,
            fallback = iv.volatility,
            "Implied volatility fell back in report"
        );
    }
    out.push_str(&implied_vol::render_table(&iv));

    section(&mut out, "[4] SENSITIVITY GRIDS");
    let grids = grid::compute(p, request.option_type, GreekSelection::Panels, &request.grid)?;
    let mut paths = Vec::with_capacity(grids.len());
    for g in &grids {
        let path = output_dir.join(format!("{}_{}_grid.csv", request.option_type, g.greek));
        grid::write_csv(std::slice::from_ref(g), File::create(&path)?)?;
        let (lo, hi) = g.range();
        let _ = writeln!(
            out,
            "{:<5} [{:>10.4}, {:>10.4}] -> {}",
            g.greek.as_str(),
            lo,
            hi,
            path.display()
        );
        paths.push(path);
    }

    let _ = writeln!(out, "\n{}", banner);
    let _ = writeln!(out, "Analysis complete!");
    let _ = writeln!(out, "{}", banner);

    Ok((out, paths))
}

/// Run the report command
pub fn run(request: &ReportRequest, output_dir: &Path) -> Result<()> {
    info!(output_dir = %output_dir.display(), "Generating report...");
    let (text, _) = generate(request, output_dir)?;

    let report_path = output_dir.join("report.txt");
    fs::write(&report_path, &text)?;
    print!("{}", text);

    info!(path = %report_path.display(), "Report generation complete");
    Ok(())
}
