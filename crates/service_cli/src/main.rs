//! optionlab - Command Line Operations for European Option Pricing
//!
//! # Commands
//!
//! - `optionlab price` - Analytical and Monte Carlo prices with timings
//! - `optionlab greeks` - Delta, gamma, vega, theta and rho
//! - `optionlab implied-vol --market-price <P>` - Solve for volatility
//! - `optionlab grid` - Sensitivity grids as CSV or JSON
//! - `optionlab report` - Everything above as a plain-text report
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Other failure (I/O, numerical instability) |
//! | 2 | Invalid parameters or configuration |
//! | 3 | Implied volatility fell back |
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate orchestrates the pricer
//! crates and is the only place a tracing subscriber is installed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use commands::grid::{GreekSelection, GridFormat};
use commands::report::ReportRequest;
use commands::{MarketArgs, OutputFormat};
use config::{CliConfig, LogLevel};
pub use error::{CliError, Result};

/// European option pricing: Black-Scholes, Monte Carlo, Greeks and implied volatility
#[derive(Parser)]
#[command(name = "optionlab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    market: MarketArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price with Black-Scholes and Monte Carlo
    Price {
        /// Number of Monte Carlo paths
        #[arg(short = 'n', long)]
        paths: Option<usize>,

        /// Monte Carlo seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Compute all five Greeks
    Greeks {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Solve for the volatility matching a market price
    ImpliedVol {
        /// Observed option price
        #[arg(short, long)]
        market_price: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Generate sensitivity grids over spot and volatility
    Grid {
        /// Greek to grid (delta, gamma, vega, theta, rho, or all)
        #[arg(short, long, default_value_t = GreekSelection::Panels)]
        greek: GreekSelection,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = GridFormat::Csv)]
        format: GridFormat,
    },

    /// Run pricing, Greeks, implied volatility and grids as one report
    Report {
        /// Observed option price for the implied volatility section
        #[arg(short, long, default_value_t = 10.45)]
        market_price: f64,

        /// Number of Monte Carlo paths
        #[arg(short = 'n', long)]
        paths: Option<usize>,

        /// Monte Carlo seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory
        #[arg(short, long, default_value = "./reports")]
        output_dir: PathBuf,
    },
}

fn init_tracing(level: LogLevel) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str())),
        )
        .init();
}

fn run(cli: Cli, config: &CliConfig) -> Result<()> {
    let params = cli.market.params()?;
    let style = cli.market.style;

    match cli.command {
        Commands::Price {
            paths,
            seed,
            format,
        } => {
            let mc = config.monte_carlo.to_config(paths, seed)?;
            commands::price::run(&params, style, mc, format)
        }
        Commands::Greeks { format } => commands::greeks::run(&params, style, format),
        Commands::ImpliedVol {
            market_price,
            format,
        } => commands::implied_vol::run(
            &params,
            style,
            market_price,
            config.implied_vol.to_config()?,
            format,
        ),
        Commands::Grid {
            greek,
            output,
            format,
        } => commands::grid::run(&params, style, greek, &config.grid, format, output.as_deref()),
        Commands::Report {
            market_price,
            paths,
            seed,
            output_dir,
        } => {
            let request = ReportRequest {
                params,
                option_type: style,
                market_price,
                monte_carlo: config.monte_carlo.to_config(paths, seed)?,
                implied_vol: config.implied_vol.to_config()?,
                grid: config.grid,
            };
            commands::report::run(&request, &output_dir)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let err = CliError::from(err);
            eprintln!("error: {}", err);
            return ExitCode::from(err.exit_code());
        }
    };

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config.log_level
    };
    init_tracing(level);
    debug!(config_file = ?cli.config, log_level = %level, "Configuration loaded");

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(exit_code = err.exit_code(), error = ?err, "Command failed");
            eprintln!("error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
