//! Static export of every document.
//!
//! Writes `<out>/<section>/<slug>.html` and `<out>/<section>/<slug>.toc.json`
//! for each document of each section.

use std::path::{Path, PathBuf};

use crate::loader::LoadError;
use crate::site::Site;

/// Error raised during a static build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Listing or loading a document failed.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Writing an output file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Serializing the table of contents failed.
    #[error("Failed to serialize TOC: {0}")]
    Json(#[from] serde_json::Error),
}

/// Summary of a static build.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Documents written.
    pub documents: usize,
    /// Sections processed.
    pub sections: usize,
}

/// Render every document of every section into `out_dir`.
///
/// # Errors
///
/// Returns [`BuildError`] on the first document that fails to load or write.
pub fn build_site(site: &Site, out_dir: &Path) -> Result<BuildReport, BuildError> {
    let mut report = BuildReport::default();

    for section in site.sections() {
        let section_dir = out_dir.join(&section.name);
        for slug in site.documents(&section.name)? {
            let doc = site.render(&section.name, &slug, "")?;

            let html_path = section_dir.join(format!("{slug}.html"));
            let toc_path = section_dir.join(format!("{slug}.toc.json"));
            if let Some(parent) = html_path.parent() {
                create_dir(parent)?;
            }
            write(&html_path, &doc.html)?;
            write(&toc_path, &serde_json::to_string_pretty(&doc.toc)?)?;

            tracing::debug!(section = %section.name, slug = %slug, "Wrote document");
            report.documents += 1;
        }
        report.sections += 1;
    }

    tracing::info!(
        documents = report.documents,
        sections = report.sections,
        out_dir = %out_dir.display(),
        "Static build complete"
    );
    Ok(report)
}

fn create_dir(path: &Path) -> Result<(), BuildError> {
    std::fs::create_dir_all(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, content: &str) -> Result<(), BuildError> {
    std::fs::write(path, content).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}
