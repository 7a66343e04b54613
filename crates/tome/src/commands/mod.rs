//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod serve;
pub(crate) mod snapshot;
pub(crate) mod stamp_version;

use std::sync::Arc;

use tome_config::Config;
use tome_registry::{ContentRegistry, FsRegistry, MapRegistry};
use tome_site::{PRIMARY_EXTENSION, Section, Site};

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use snapshot::SnapshotArgs;
pub(crate) use stamp_version::StampVersionArgs;

/// File patterns for every extension the resolver can match.
pub(crate) fn document_patterns(config: &Config) -> Vec<String> {
    std::iter::once(PRIMARY_EXTENSION)
        .chain(
            config
                .content_resolved
                .alternate_extensions
                .iter()
                .map(String::as_str),
        )
        .map(|ext| format!("*.{ext}"))
        .collect()
}

/// Open the configured registry: the snapshot if set, the live tree otherwise.
pub(crate) fn open_registry(config: &Config) -> Result<Arc<dyn ContentRegistry>, CliError> {
    let content = &config.content_resolved;
    Ok(match &content.registry {
        Some(path) => Arc::new(MapRegistry::load(path)?),
        None => Arc::new(FsRegistry::with_patterns(
            content.source_dir.clone(),
            &document_patterns(config),
        )),
    })
}

/// Build a [`Site`] for the configured sections.
pub(crate) fn site_from_config(config: &Config, registry: Arc<dyn ContentRegistry>) -> Site {
    Site::new(registry)
        .with_sections(config.sections.iter().map(Section::from).collect())
        .with_alternate_extensions(config.content_resolved.alternate_extensions.clone())
}
