//! bs-price - interactive Black-Scholes pricer
//!
//! Prompts for strike, spot, time to expiration, payoff type, rate, dividend
//! yield and volatility, then prints the price. Repeats until input ends or
//! the payoff type is not one of `Call`, `call`, `Put`, `put`.

use anyhow::Result;
use bs_pricer::{PricerConfig, PromptSession, Termination};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Interactive Black-Scholes pricer for European options
#[derive(Parser)]
#[command(name = "bs-price")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PricerConfig::from_path(path)?,
        None => PricerConfig::standard(),
    };
    config.session.verbosity = config.session.verbosity.saturating_add(cli.verbose);

    // RUST_LOG wins over the configured verbosity
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    info!(config = ?cli.config, "starting pricing session");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = PromptSession::new(stdin.lock(), stdout.lock(), config).run()?;

    if let Termination::UnrecognizedPayoffType(input) = &summary.termination {
        info!(%input, "session ended on unrecognized payoff type");
    }
    Ok(())
}
