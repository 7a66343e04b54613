//! `tome snapshot` command implementation.

use std::path::PathBuf;

use clap::Args;
use tome_config::{CliSettings, Config};
use tome_registry::{FsRegistry, Snapshot};

use crate::commands::document_patterns;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the snapshot command.
#[derive(Args)]
pub(crate) struct SnapshotArgs {
    /// Path to configuration file (default: auto-discover tome.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output JSON file.
    #[arg(short, long)]
    out: PathBuf,
}

impl SnapshotArgs {
    /// Execute the snapshot command.
    ///
    /// Always reads the live tree, even when config points at a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the tree cannot be captured.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config = ?config.config_path, "Loaded configuration");

        let source_dir = config.content_resolved.source_dir.clone();
        output.info(&format!("Scanning {}", source_dir.display()));

        let registry = FsRegistry::with_patterns(source_dir, &document_patterns(&config));
        let snapshot = Snapshot::capture(&registry)?;

        if let Some(parent) = self.out.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        snapshot.write(&self.out)?;
        tracing::info!(
            documents = snapshot.documents.len(),
            out = %self.out.display(),
            "Registry snapshot written"
        );

        output.success(&format!(
            "Wrote {} documents to {}",
            snapshot.documents.len(),
            self.out.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tome_registry::{ContentRegistry, MapRegistry};

    use super::*;

    #[test]
    fn test_snapshot_writes_loadable_registry() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("tome.toml");
        fs::write(&config, "[content]\nsource_dir = \"site\"\n").unwrap();
        fs::create_dir_all(dir.path().join("site/markdown/_drafts")).unwrap();
        fs::write(dir.path().join("site/markdown/introduction.md"), "# Intro").unwrap();
        fs::write(dir.path().join("site/markdown/legacy.markdown"), "# Old").unwrap();
        fs::write(dir.path().join("site/markdown/_drafts/wip.md"), "# WIP").unwrap();
        fs::write(dir.path().join("site/markdown/notes.txt"), "skip").unwrap();
        let out = dir.path().join("build/registry.json");

        SnapshotArgs {
            config: Some(config),
            source_dir: None,
            out: out.clone(),
        }
        .execute()
        .unwrap();

        let registry = MapRegistry::load(&out).unwrap();
        assert_eq!(
            registry.keys().unwrap(),
            vec!["markdown/introduction.md", "markdown/legacy.markdown"]
        );
    }

    #[test]
    fn test_snapshot_missing_source_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("tome.toml");
        fs::write(&config, "[content]\nsource_dir = \"missing\"\n").unwrap();
        let out = dir.path().join("registry.json");

        let result = SnapshotArgs {
            config: Some(config),
            source_dir: None,
            out: out.clone(),
        }
        .execute();

        assert!(matches!(result, Err(CliError::Registry(_))));
        assert!(!out.exists());
    }
}
