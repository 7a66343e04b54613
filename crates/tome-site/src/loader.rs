//! Content loading: slug resolution followed by a registry read.

use std::sync::Arc;

use serde::Serialize;
use tome_registry::ContentRegistry;

use crate::resolver::{SlugResolver, normalize_slug};
use crate::section::Section;

/// Error returned when a document cannot be loaded.
///
/// `NotFound` and `UnknownSection` are normal outcomes (404-class);
/// `Internal` means a resolved key could not be read (500-class).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No document exists for the slug.
    #[error("Document not found: {section}/{slug}")]
    NotFound {
        /// Normalized slug that failed to resolve.
        slug: String,
        /// Section the slug was looked up in.
        section: String,
    },
    /// Section is not configured.
    #[error("Unknown section: {0}")]
    UnknownSection(String),
    /// Reading a resolved key failed.
    #[error("Failed to read {key}: {message}")]
    Internal {
        /// Storage key that failed to read.
        key: String,
        /// Underlying error message.
        message: String,
    },
}

impl LoadError {
    /// Whether this is a 404-class error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::UnknownSection(_))
    }
}

/// Raw document copied out of the registry for one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoadedDocument {
    /// Slug the document was resolved for (after default-slug rewriting).
    pub slug: String,
    /// Raw document text, frontmatter included.
    pub content: String,
    /// Section name.
    pub section: String,
    /// Storage key that matched.
    pub key: String,
}

/// Orchestrates [`SlugResolver`] against a shared [`ContentRegistry`].
#[derive(Clone)]
pub struct ContentLoader {
    registry: Arc<dyn ContentRegistry>,
    resolver: SlugResolver,
}

impl ContentLoader {
    /// Create a loader with the default resolver.
    #[must_use]
    pub fn new(registry: Arc<dyn ContentRegistry>) -> Self {
        Self {
            registry,
            resolver: SlugResolver::new(),
        }
    }

    /// Replace the resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: SlugResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Registry documents are read from.
    #[must_use]
    pub fn registry(&self) -> &Arc<dyn ContentRegistry> {
        &self.registry
    }

    /// Resolver in use.
    #[must_use]
    pub fn resolver(&self) -> &SlugResolver {
        &self.resolver
    }

    /// Load the document for `slug` in `section`.
    ///
    /// A request for the bare mount path (`url_path == section.mount`) or an
    /// empty slug loads the section's default slug.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if no candidate key exists and
    /// [`LoadError::Internal`] if reading the resolved key fails.
    pub fn load(
        &self,
        section: &Section,
        slug: &str,
        url_path: &str,
    ) -> Result<LoadedDocument, LoadError> {
        let slug = if section.is_mount(url_path)
            || normalize_slug(slug).is_some_and(|s| s.is_empty())
        {
            section.default_slug.as_str()
        } else {
            slug
        };

        let key = self
            .resolver
            .resolve(slug, section, self.registry.as_ref())
            .map_err(|e| {
                tracing::debug!(slug = %e.slug, section = %section.name, "Document not found");
                LoadError::NotFound {
                    slug: e.slug,
                    section: section.name.clone(),
                }
            })?;

        let content = self.registry.read(&key).map_err(|e| {
            tracing::error!(key = %key, error = %e, "Failed to read document");
            LoadError::Internal {
                key: key.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(LoadedDocument {
            slug: normalize_slug(slug).unwrap_or_default(),
            content,
            section: section.name.clone(),
            key,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tome_registry::{MapRegistry, RegistryError, RegistryErrorKind};

    use super::*;

    /// Registry that lists a key but fails to read it.
    struct BrokenRegistry;

    impl ContentRegistry for BrokenRegistry {
        fn contains(&self, _key: &str) -> bool {
            true
        }

        fn read(&self, key: &str) -> Result<String, RegistryError> {
            Err(RegistryError::new(RegistryErrorKind::PermissionDenied).with_key(key))
        }

        fn keys(&self) -> Result<Vec<String>, RegistryError> {
            Ok(Vec::new())
        }
    }

    fn loader() -> ContentLoader {
        let registry = MapRegistry::new()
            .with_document("markdown/introduction.md", "# Intro")
            .with_document("markdown/setup.md", "# Setup")
            .with_document("markdown/api/overview.md", "# API");
        ContentLoader::new(Arc::new(registry))
    }

    #[test]
    fn test_load_slug() {
        let doc = loader().load(&Section::docs(), "setup", "/docs/setup").unwrap();

        assert_eq!(
            doc,
            LoadedDocument {
                slug: "setup".to_owned(),
                content: "# Setup".to_owned(),
                section: "docs".to_owned(),
                key: "markdown/setup.md".to_owned(),
            }
        );
    }

    #[test]
    fn test_bare_mount_loads_default() {
        let doc = loader().load(&Section::docs(), "setup", "/docs").unwrap();

        assert_eq!(doc.slug, "introduction");
        assert_eq!(doc.content, "# Intro");
    }

    #[test]
    fn test_empty_slug_loads_default() {
        let docs = loader().load(&Section::docs(), "", "").unwrap();
        let api = loader().load(&Section::api(), "/", "/api/").unwrap();

        assert_eq!(docs.slug, "introduction");
        assert_eq!(api.slug, "overview");
        assert_eq!(api.content, "# API");
    }

    #[test]
    fn test_not_found() {
        let err = loader()
            .load(&Section::docs(), "/missing/", "/docs/missing/")
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Document not found: docs/missing");
    }

    #[test]
    fn test_traversal_is_not_found() {
        let err = loader()
            .load(&Section::api(), "../introduction", "/api/../introduction")
            .unwrap_err();

        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn test_read_failure_is_internal() {
        let loader = ContentLoader::new(Arc::new(BrokenRegistry));

        let err = loader.load(&Section::docs(), "setup", "/docs/setup").unwrap_err();

        assert!(!err.is_not_found());
        match err {
            LoadError::Internal { key, message } => {
                assert_eq!(key, "markdown/setup.md");
                assert!(message.contains("Permission denied"));
            }
            other => panic!("expected Internal, got {other:?}"),
        }
    }
}
