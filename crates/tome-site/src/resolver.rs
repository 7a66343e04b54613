//! Slug to storage key resolution.
//!
//! A slug is resolved by trying a fixed, ordered list of path conventions
//! against the registry. The first candidate whose key exists wins:
//!
//! 1. `<root>/<slug>.md`
//! 2. `<root>/<slug>/index.md`
//! 3. `<root>/<slug with '/' replaced by '-'>.md`
//! 4. `<root>/index.md` (empty slug only)
//! 5. `<root>/<parent>/<last>.md` (nested slugs only)
//! 6. `<root>/<slug>.<alt>` for each alternate extension
//!
//! Identical candidates are tried once, at their first position.

use tome_registry::ContentRegistry;

use crate::section::Section;

/// Primary document extension.
pub const PRIMARY_EXTENSION: &str = "md";

/// No candidate key exists for the slug (or the slug escapes the section root).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no document for slug '{slug}'")]
pub struct NotFound {
    /// Normalized slug that failed to resolve.
    pub slug: String,
}

/// Normalize a slug.
///
/// Strips leading/trailing slashes and drops empty and `.` segments.
/// Returns `None` if any segment is `..`.
///
/// # Examples
///
/// ```
/// use tome_site::normalize_slug;
///
/// assert_eq!(normalize_slug("/metrics//quick-start/").as_deref(), Some("metrics/quick-start"));
/// assert_eq!(normalize_slug("./setup").as_deref(), Some("setup"));
/// assert_eq!(normalize_slug("../secrets"), None);
/// ```
#[must_use]
pub fn normalize_slug(slug: &str) -> Option<String> {
    let mut segments = Vec::new();
    for segment in slug.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s => segments.push(s),
        }
    }
    Some(segments.join("/"))
}

/// Resolves slugs to storage keys.
#[derive(Clone, Debug)]
pub struct SlugResolver {
    alternate_extensions: Vec<String>,
}

impl Default for SlugResolver {
    fn default() -> Self {
        Self {
            alternate_extensions: vec!["markdown".to_owned()],
        }
    }
}

impl SlugResolver {
    /// Create a resolver with the default alternate extension (`markdown`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the alternate extensions tried after the primary conventions.
    #[must_use]
    pub fn with_alternate_extensions(mut self, extensions: Vec<String>) -> Self {
        self.alternate_extensions = extensions;
        self
    }

    /// Alternate extensions in the order they are tried.
    #[must_use]
    pub fn alternate_extensions(&self) -> &[String] {
        &self.alternate_extensions
    }

    /// Candidate keys for an already normalized slug, in resolution order.
    #[must_use]
    pub fn candidates(&self, slug: &str, section: &Section) -> Vec<String> {
        let ext = PRIMARY_EXTENSION;
        let mut relative = Vec::with_capacity(5 + self.alternate_extensions.len());

        if !slug.is_empty() {
            relative.push(format!("{slug}.{ext}"));
            relative.push(format!("{slug}/index.{ext}"));
            relative.push(format!("{}.{ext}", slug.replace('/', "-")));
        }
        if slug.is_empty() {
            relative.push(format!("index.{ext}"));
        }
        if let Some((parent, last)) = slug.rsplit_once('/') {
            relative.push(format!("{parent}/{last}.{ext}"));
        }
        if !slug.is_empty() {
            for alt in &self.alternate_extensions {
                relative.push(format!("{slug}.{alt}"));
            }
        }

        let mut candidates: Vec<String> = Vec::with_capacity(relative.len());
        for key in relative.iter().map(|r| section.key(r)) {
            if !candidates.contains(&key) {
                candidates.push(key);
            }
        }
        candidates
    }

    /// Resolve `slug` within `section` to the first existing storage key.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if the slug contains a `..` segment or no
    /// candidate exists in the registry.
    pub fn resolve(
        &self,
        slug: &str,
        section: &Section,
        registry: &dyn ContentRegistry,
    ) -> Result<String, NotFound> {
        let Some(normalized) = normalize_slug(slug) else {
            tracing::debug!(slug, section = %section.name, "Rejected slug outside section root");
            return Err(NotFound {
                slug: slug.trim_matches('/').to_owned(),
            });
        };

        self.candidates(&normalized, section)
            .into_iter()
            .find(|key| registry.contains(key))
            .ok_or(NotFound { slug: normalized })
    }
}
