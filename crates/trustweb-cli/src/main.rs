//! Trustweb CLI — Command-line interface for attestation trust propagation.
//!
//! Subcommands: init, simulate, graph, propagate.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::{LogFormat, LoggingConfig, TrustwebConfig};

/// Trustweb — Trust propagation over attestations.
#[derive(Parser, Debug)]
#[command(name = "trustweb", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, default_value = "trustweb.toml")]
    config: PathBuf,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Generate a synthetic scenario and propagate trust over it.
    Simulate(commands::simulate::SimulateArgs),
    /// Print the trust graph of a simulated scenario for one claim.
    Graph(commands::graph::GraphArgs),
    /// Propagate trust over identities and attestations read from a file.
    Propagate(commands::propagate::PropagateArgs),
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = TrustwebConfig::load(&cli.config)?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config.logging);

    match &cli.command {
        Commands::Init(args) => commands::init::run(args, &cli.config),
        Commands::Simulate(args) => commands::simulate::run(args, config),
        Commands::Graph(args) => commands::graph::run(args, config),
        Commands::Propagate(args) => commands::propagate::run(args, config),
    }
}
