//! Tome CLI - documentation site pipeline.
//!
//! Provides commands for:
//! - `serve`: Start the documentation server
//! - `snapshot`: Capture the content tree into a registry snapshot
//! - `build`: Render every document to static HTML
//! - `stamp-version`: Write `version.json` into the data directory

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ServeArgs, SnapshotArgs, StampVersionArgs};
use error::CliError;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tome - slug-to-HTML documentation pipeline.
#[derive(Parser)]
#[command(name = "tome", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the documentation server.
    Serve(ServeArgs),
    /// Capture the content tree into a deterministic registry snapshot.
    Snapshot(SnapshotArgs),
    /// Render every document of every section to static files.
    Build(BuildArgs),
    /// Stamp the VERSION file into the data directory.
    StampVersion(StampVersionArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute(VERSION))),
        Commands::Snapshot(args) => args.execute(),
        Commands::Build(args) => args.execute(),
        Commands::StampVersion(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
