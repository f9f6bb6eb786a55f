//! Grid command implementation
//!
//! Writes sensitivity grids as long-format CSV
//! (`greek,option_type,volatility,spot,value`) or as JSON.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use pricer_core::types::{OptionParams, OptionType};
use pricer_models::analytical::Greek;
use pricer_risk::sensitivity::{GridSpec, SensitivityGrid};
use tracing::info;

use crate::Result;

/// Which Greeks to grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreekSelection {
    /// Delta, gamma, vega and theta
    Panels,
    /// A single Greek
    One(Greek),
}

impl FromStr for GreekSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "panels" => Ok(GreekSelection::Panels),
            other => other.parse().map(GreekSelection::One),
        }
    }
}

impl fmt::Display for GreekSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GreekSelection::Panels => f.write_str("all"),
            GreekSelection::One(greek) => write!(f, "{}", greek),
        }
    }
}

/// Output format for grids.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridFormat {
    /// One row per cell
    #[default]
    Csv,
    /// Grids with their axes
    Json,
}

/// Generates the selected grids.
pub fn compute(
    base: &OptionParams,
    option_type: OptionType,
    selection: GreekSelection,
    layout: &GridSpec,
) -> Result<Vec<SensitivityGrid>> {
    let grids = match selection {
        GreekSelection::Panels => SensitivityGrid::generate_all(base, option_type, layout)?,
        GreekSelection::One(greek) => {
            vec![SensitivityGrid::generate(base, option_type, greek, layout)?]
        }
    };
    Ok(grids)
}

/// Writes grids as long-format CSV.
pub fn write_csv<W: Write>(grids: &[SensitivityGrid], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["greek", "option_type", "volatility", "spot", "value"])?;
    for grid in grids {
        for (vol, row) in grid.vols.iter().zip(&grid.values) {
            for (spot, value) in grid.spots.iter().zip(row) {
                csv.write_record([
                    grid.greek.as_str().to_string(),
                    grid.option_type.to_string(),
                    vol.to_string(),
                    spot.to_string(),
                    value.to_string(),
                ])?;
            }
        }
    }
    csv.flush()?;
    Ok(())
}

/// Writes grids as pretty-printed JSON.
pub fn write_json<W: Write>(grids: &[SensitivityGrid], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, grids)?;
    writeln!(writer)?;
    Ok(())
}

fn write_grids<W: Write>(grids: &[SensitivityGrid], format: GridFormat, writer: W) -> Result<()> {
    match format {
        GridFormat::Csv => write_csv(grids, writer),
        GridFormat::Json => write_json(grids, writer),
    }
}

/// Run the grid command
pub fn run(
    base: &OptionParams,
    option_type: OptionType,
    selection: GreekSelection,
    layout: &GridSpec,
    format: GridFormat,
    output: Option<&Path>,
) -> Result<()> {
    info!(greeks = %selection, option_type = %option_type, "Generating sensitivity grid...");
    let grids = compute(base, option_type, selection, layout)?;

    match output {
        Some(path) => {
            write_grids(&grids, format, File::create(path)?)?;
            info!(path = %path.display(), "Grid written");
        }
        None => write_grids(&grids, format, io::stdout().lock())?,
    }
    Ok(())
}
