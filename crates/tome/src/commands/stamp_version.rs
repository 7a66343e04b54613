//! `tome stamp-version` command implementation.

use std::path::PathBuf;

use clap::Args;
use tome_config::Config;
use tome_site::stamp_version;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the stamp-version command.
#[derive(Args)]
pub(crate) struct StampVersionArgs {
    /// Path to configuration file (default: auto-discover tome.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Plain-text file holding the version (overrides config).
    #[arg(long)]
    version_file: Option<PathBuf>,

    /// Data directory to write into (overrides config).
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl StampVersionArgs {
    /// Execute the stamp-version command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the version file is missing,
    /// or the data directory cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        tracing::debug!(config = ?config.config_path, "Loaded configuration");
        let version_file = self
            .version_file
            .unwrap_or_else(|| config.content_resolved.version_file.clone());
        let data_dir = self
            .data_dir
            .unwrap_or_else(|| config.content_resolved.data_dir.clone());

        tracing::debug!(version_file = %version_file.display(), "Reading version");
        let version = stamp_version(&version_file, &data_dir)?;

        output.success(&format!(
            "Stamped version {version} into {}",
            data_dir.display()
        ));
        Ok(())
    }
}
