//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Shared pieces live
//! here: the market flags every command accepts and the output format.

pub mod greeks;
pub mod grid;
pub mod implied_vol;
pub mod price;
pub mod report;

use clap::{Args, ValueEnum};
use pricer_core::types::{OptionParams, OptionType};
use serde::Serialize;

use crate::Result;

/// Contract and market inputs shared by every command.
#[derive(Args, Debug, Clone, Copy)]
pub struct MarketArgs {
    /// Underlying spot price
    #[arg(long, global = true, default_value_t = 100.0)]
    pub spot: f64,

    /// Strike price
    #[arg(long, global = true, default_value_t = 100.0)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(long, global = true, default_value_t = 1.0)]
    pub expiry: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, global = true, default_value_t = 0.05, allow_hyphen_values = true)]
    pub rate: f64,

    /// Annualised volatility
    #[arg(long, global = true, default_value_t = 0.2)]
    pub vol: f64,

    /// Option style (call or put)
    #[arg(long, global = true, default_value_t = OptionType::Call)]
    pub style: OptionType,
}

impl MarketArgs {
    /// Validated option parameters.
    pub fn params(&self) -> Result<OptionParams> {
        Ok(OptionParams::new(
            self.spot,
            self.strike,
            self.expiry,
            self.rate,
            self.vol,
        )?)
    }
}

/// Output format for scalar results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Renders `value` as a table or JSON on stdout.
pub(crate) fn emit<T: Serialize>(
    value: &T,
    format: OutputFormat,
    table: impl FnOnce(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Table => print!("{}", table(value)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
