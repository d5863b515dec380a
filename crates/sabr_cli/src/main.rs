//! SABR CLI - Command Line Operations for Hagan SABR Volatility
//!
//! # Commands
//!
//! - `sabr price --strike <K>... --spot <S>` - Price a European option strip
//! - `sabr vol --strike <K>... --spot <S>` - Print the equivalent volatility smile
//! - `sabr calibrate --price <P> --strike <K> --spot <S>` - Solve sigma for one quote
//! - `sabr check` - Validate and print the resolved configuration
//!
//! Model and solver settings come from a TOML file (`--config`, default
//! `sabr.toml`) overridden by `SABR_*` environment variables.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sabr_core::types::PayoffType;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod model;
mod output;

pub use error::{CliError, Result};

use commands::check::ConfigFormat;
use config::CliConfig;
use output::OutputFormat;

/// Hagan SABR volatility and pricing CLI
#[derive(Parser)]
#[command(name = "sabr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "sabr.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price European options across a strike strip
    Price {
        /// Strike prices
        #[arg(short = 'k', long = "strike", required = true, num_args = 1..)]
        strikes: Vec<f64>,

        /// Spot price
        #[arg(short, long)]
        spot: f64,

        /// Option type (call, put)
        #[arg(short, long, default_value = "call")]
        payoff: PayoffType,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print the equivalent volatility smile
    Vol {
        /// Strike prices
        #[arg(short = 'k', long = "strike", required = true, num_args = 1..)]
        strikes: Vec<f64>,

        /// Spot price
        #[arg(short, long)]
        spot: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Calibrate sigma to a single option quote
    Calibrate {
        /// Quoted option price
        #[arg(long)]
        price: f64,

        /// Strike price
        #[arg(short = 'k', long)]
        strike: f64,

        /// Spot price
        #[arg(short, long)]
        spot: f64,

        /// Option type (call, put)
        #[arg(short, long, default_value = "call")]
        payoff: PayoffType,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Validate and print the resolved configuration
    Check {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = CliConfig::load(&cli.config)?;
    debug!(path = %cli.config.display(), ?config, "Configuration loaded");

    match cli.command {
        Commands::Price {
            strikes,
            spot,
            payoff,
            format,
        } => commands::price::run(&config, &strikes, spot, payoff, format),
        Commands::Vol {
            strikes,
            spot,
            format,
        } => commands::vol::run(&config, &strikes, spot, format),
        Commands::Calibrate {
            price,
            strike,
            spot,
            payoff,
            format,
        } => commands::calibrate::run(&config, price, strike, spot, payoff, format),
        Commands::Check { format } => commands::check::run(&config, format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
