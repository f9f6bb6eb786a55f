//! Greeks command implementation

use std::fmt::Write as _;

use pricer_core::types::{OptionParams, OptionType};
use pricer_models::analytical::{greeks, Greeks};
use serde::Serialize;
use tracing::info;

use super::{emit, OutputFormat};
use crate::Result;

/// All five sensitivities for one option.
#[derive(Debug, Clone, Serialize)]
pub struct GreeksSummary {
    /// Inputs the Greeks were evaluated at
    pub params: OptionParams,
    /// Call or put
    pub option_type: OptionType,
    /// Delta, gamma, vega, theta and rho
    pub greeks: Greeks,
}

/// Evaluates every Greek.
pub fn compute(params: &OptionParams, option_type: OptionType) -> Result<GreeksSummary> {
    Ok(GreeksSummary {
        params: *params,
        option_type,
        greeks: greeks(params, option_type)?,
    })
}

/// Plain-text rendering.
pub fn render_table(summary: &GreeksSummary) -> String {
    let g = &summary.greeks;
    let mut out = String::new();
    let _ = writeln!(out, "Delta: {:.4} (price change per 1.00 move in the underlying)", g.delta);
    let _ = writeln!(out, "Gamma: {:.4} (delta change per 1.00 move in the underlying)", g.gamma);
    let _ = writeln!(out, "Vega:  {:.4} (price change per 1% volatility change)", g.vega);
    let _ = writeln!(out, "Theta: {:.4} (price change per calendar day)", g.theta);
    let _ = writeln!(out, "Rho:   {:.4} (price change per 1% rate change)", g.rho);
    out
}

/// Run the greeks command
pub fn run(params: &OptionParams, option_type: OptionType, format: OutputFormat) -> Result<()> {
    info!(option_type = %option_type, "Computing Greeks...");
    emit(&compute(params, option_type)?, format, render_table)
}
