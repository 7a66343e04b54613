//! `tome serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use tome_config::{CliSettings, Config};
use tome_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover tome.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long, env = "TOME_HOST")]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "TOME_PORT")]
    port: Option<u16>,

    /// Serve from a registry snapshot instead of the live tree (overrides config).
    #[arg(long)]
    registry: Option<PathBuf>,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.source_dir,
            registry: self.registry,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config = ?config.config_path, "Loaded configuration");
        let content = &config.content_resolved;

        output.highlight(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        match &content.registry {
            Some(path) => output.info(&format!("Registry snapshot: {}", path.display())),
            None => output.info(&format!(
                "Source directory: {}",
                content.source_dir.display()
            )),
        }
        output.info(&format!("Data directory: {}", content.data_dir.display()));
        for section in &config.sections {
            output.info(&format!(
                "Section {}: {} -> {}/",
                section.name, section.mount, section.root
            ));
        }

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
