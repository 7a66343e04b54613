//! `tome build` command implementation.

use std::path::PathBuf;

use clap::Args;
use tome_config::{CliSettings, Config};
use tome_site::build_site;

use crate::commands::{open_registry, site_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover tome.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Build from a registry snapshot instead of the live tree (overrides config).
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Output directory.
    #[arg(short, long)]
    out_dir: PathBuf,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a document cannot be built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            registry: self.registry,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config = ?config.config_path, "Loaded configuration");

        let site = site_from_config(&config, open_registry(&config)?);
        let report = build_site(&site, &self.out_dir)?;

        output.success(&format!(
            "Built {} documents in {} sections to {}",
            report.documents,
            report.sections,
            self.out_dir.display()
        ));
        Ok(())
    }
}
