//! Sections, content loading and rendering combined.
//!
//! [`Site`] is built once per process and shared behind an `Arc`. It holds no
//! mutable state: the registry is immutable and every render uses its own
//! heading registry.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tome_registry::ContentRegistry;
use tome_renderer::{Heading, MarkdownRenderer};

use crate::loader::{ContentLoader, LoadError, LoadedDocument};
use crate::resolver::{PRIMARY_EXTENSION, SlugResolver};
use crate::section::{Section, default_sections};

/// Rendered document ready for display.
#[derive(Clone, Debug, Serialize)]
pub struct RenderedDocument {
    /// Slug the document was resolved for.
    pub slug: String,
    /// Section name (display routing only).
    pub section: String,
    /// HTML with heading anchors.
    pub html: String,
    /// Title from frontmatter or the first H1.
    pub title: Option<String>,
    /// Level 2-3 headings in document order.
    pub toc: Vec<Heading>,
}

/// Documentation site: sections over a shared content registry.
pub struct Site {
    sections: Vec<Section>,
    loader: ContentLoader,
    renderer: MarkdownRenderer,
}

impl Site {
    /// Create a site with the default `docs` and `api` sections.
    #[must_use]
    pub fn new(registry: Arc<dyn ContentRegistry>) -> Self {
        Self {
            sections: default_sections(),
            loader: ContentLoader::new(registry),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Replace the configured sections.
    #[must_use]
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    /// Replace the alternate extensions tried by the resolver.
    #[must_use]
    pub fn with_alternate_extensions(mut self, extensions: Vec<String>) -> Self {
        self.loader = self
            .loader
            .with_resolver(SlugResolver::new().with_alternate_extensions(extensions));
        self
    }

    /// Replace the renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: MarkdownRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Configured sections.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Look up a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Load a raw document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the section is unknown, the slug does not
    /// resolve or the document cannot be read.
    pub fn load(
        &self,
        section: &str,
        slug: &str,
        url_path: &str,
    ) -> Result<LoadedDocument, LoadError> {
        let section = self
            .section(section)
            .ok_or_else(|| LoadError::UnknownSection(section.to_owned()))?;
        self.loader.load(section, slug, url_path)
    }

    /// Load and render a document.
    ///
    /// Conversion failures are not errors: the document renders as an
    /// inline error fragment.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the document cannot be loaded.
    pub fn render(
        &self,
        section: &str,
        slug: &str,
        url_path: &str,
    ) -> Result<RenderedDocument, LoadError> {
        let document = self.load(section, slug, url_path)?;
        let result = self.renderer.render(&document.content);

        for warning in &result.warnings {
            tracing::warn!(key = %document.key, warning = %warning, "Render warning");
        }

        Ok(RenderedDocument {
            slug: document.slug,
            section: document.section,
            html: result.html,
            title: result.title,
            toc: result.toc,
        })
    }

    /// Slugs of every document under a section root, sorted.
    ///
    /// Documents belonging to another section nested inside this one (e.g.
    /// `markdown/api/` inside `markdown/`) are left to that section.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnknownSection`] for an unknown section and
    /// [`LoadError::Internal`] if the registry cannot be listed.
    pub fn documents(&self, section: &str) -> Result<Vec<String>, LoadError> {
        let section = self
            .section(section)
            .ok_or_else(|| LoadError::UnknownSection(section.to_owned()))?;
        let keys = self
            .loader
            .registry()
            .keys()
            .map_err(|e| LoadError::Internal {
                key: section.root.clone(),
                message: e.to_string(),
            })?;

        let nested: Vec<&Section> = self
            .sections
            .iter()
            .filter(|other| {
                other.name != section.name
                    && other.root.len() > section.root.len()
                    && section.relative(&other.root).is_some()
            })
            .collect();

        let slugs: BTreeSet<String> = keys
            .iter()
            .filter(|key| !nested.iter().any(|other| other.relative(key).is_some()))
            .filter_map(|key| section.relative(key))
            .filter_map(|relative| self.slug_for(relative))
            .collect();

        Ok(slugs.into_iter().collect())
    }

    /// Slug served by a document path relative to its section root.
    fn slug_for(&self, relative: &str) -> Option<String> {
        let (stem, ext) = relative.rsplit_once('.')?;
        let known = ext == PRIMARY_EXTENSION
            || self
                .loader
                .resolver()
                .alternate_extensions()
                .iter()
                .any(|alt| alt == ext);
        if !known || stem.is_empty() {
            return None;
        }

        // Only `<slug>/index.md` is a resolver convention; an index file with
        // an alternate extension keeps its full path as the slug.
        let slug = match stem.strip_suffix("/index") {
            Some(parent) if ext == PRIMARY_EXTENSION => parent,
            _ => stem,
        };
        Some(slug.to_owned())
    }
}
