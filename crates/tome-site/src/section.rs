//! Documentation sections.

use serde::Serialize;
use tome_config::SectionConfig;

/// Content root mounted under a URL prefix.
///
/// Sections share one resolver; they differ only in root prefix, default slug
/// and mount path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Section identifier (e.g. `docs`).
    pub name: String,
    /// Content root, `/`-separated, relative to the registry root.
    pub root: String,
    /// Slug served for the bare mount path or an empty slug.
    pub default_slug: String,
    /// URL prefix (e.g. `/docs`).
    pub mount: String,
}

impl Section {
    /// Create a section, normalizing slashes on `root` and `mount`.
    #[must_use]
    pub fn new(name: &str, root: &str, default_slug: &str, mount: &str) -> Self {
        Self {
            name: name.to_owned(),
            root: root.trim_matches('/').to_owned(),
            default_slug: default_slug.to_owned(),
            mount: format!("/{}", mount.trim_matches('/')),
        }
    }

    /// Narrative documentation: `markdown/`, default `introduction`, mounted at `/docs`.
    #[must_use]
    pub fn docs() -> Self {
        Self::new("docs", "markdown", "introduction", "/docs")
    }

    /// API reference: `markdown/api/`, default `overview`, mounted at `/api`.
    #[must_use]
    pub fn api() -> Self {
        Self::new("api", "markdown/api", "overview", "/api")
    }

    /// Whether `url_path` is the bare mount path (trailing slash ignored).
    #[must_use]
    pub fn is_mount(&self, url_path: &str) -> bool {
        let path = url_path.trim_end_matches('/');
        !path.is_empty() && path == self.mount.trim_end_matches('/')
    }

    /// Storage key for `relative` under the section root.
    pub(crate) fn key(&self, relative: &str) -> String {
        if self.root.is_empty() {
            relative.to_owned()
        } else {
            format!("{}/{relative}", self.root)
        }
    }

    /// Key relative to the section root, if `key` lies under it.
    pub(crate) fn relative<'a>(&self, key: &'a str) -> Option<&'a str> {
        if self.root.is_empty() {
            return Some(key);
        }
        key.strip_prefix(self.root.as_str())?.strip_prefix('/')
    }
}

impl From<&SectionConfig> for Section {
    fn from(config: &SectionConfig) -> Self {
        Self::new(
            &config.name,
            &config.root,
            &config.default_slug,
            &config.mount,
        )
    }
}

/// The built-in `docs` and `api` sections.
#[must_use]
pub fn default_sections() -> Vec<Section> {
    vec![Section::docs(), Section::api()]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let docs = Section::docs();
        let api = Section::api();

        assert_eq!(docs.root, "markdown");
        assert_eq!(docs.default_slug, "introduction");
        assert_eq!(api.root, "markdown/api");
        assert_eq!(api.default_slug, "overview");
        assert_eq!(api.mount, "/api");
    }

    #[test]
    fn test_new_normalizes_slashes() {
        let section = Section::new("guides", "/content/guides/", "start", "guides/");

        assert_eq!(section.root, "content/guides");
        assert_eq!(section.mount, "/guides");
    }

    #[test]
    fn test_is_mount() {
        let docs = Section::docs();

        assert!(docs.is_mount("/docs"));
        assert!(docs.is_mount("/docs/"));
        assert!(!docs.is_mount("/docs/setup"));
        assert!(!docs.is_mount("/api"));
        assert!(!docs.is_mount(""));
    }

    #[test]
    fn test_key_and_relative() {
        let api = Section::api();

        assert_eq!(api.key("overview.md"), "markdown/api/overview.md");
        assert_eq!(api.relative("markdown/api/overview.md"), Some("overview.md"));
        assert_eq!(api.relative("markdown/apix/overview.md"), None);
        assert_eq!(api.relative("markdown/intro.md"), None);
    }

    #[test]
    fn test_from_config() {
        let config = SectionConfig::new("docs", "markdown", "introduction", "/docs");

        assert_eq!(Section::from(&config), Section::docs());
    }
}
