//! # Specimen - Sample tracking for field collection agents
//!
//! This is the main entry point that wires everything together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Configuration, Logging & Dispatch        │
//! │    │                                                            │
//! │    ├── Creates: InMemoryStore (adapter, optional snapshot)      │
//! │    ├── Creates: SampleLifecycle / DirectoryService (use cases)  │
//! │    └── Runs: HTTP server or one-off seeding                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage:
//!   specimen serve [--port N] [--seed]   - Start the HTTP API
//!   specimen seed                        - Create the default hospital and agent

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{SeedCommand, ServeCommand};
use config::AppConfig;

#[derive(Parser)]
#[command(name = "specimen")]
#[command(about = "Specimen - Sample tracking API for hospital field agents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(short, long, global = true, env = "SPECIMEN_CONFIG")]
    config: Option<PathBuf>,

    /// Snapshot file for persistent storage (overrides the config file)
    #[arg(long, global = true, env = "SPECIMEN_SNAPSHOT_PATH")]
    snapshot: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve(ServeCommand),
    /// Create the default hospital and agent
    Seed(SeedCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(snapshot) = cli.snapshot {
        config.storage.snapshot_path = Some(snapshot);
    }

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve(cmd) => cmd.run(config).await,
        Commands::Seed(cmd) => cmd.run(config).await,
    }
}
