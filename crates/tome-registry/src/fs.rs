//! Filesystem registry implementation.
//!
//! Provides [`FsRegistry`] for reading documents straight from the content tree.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::registry::{ContentRegistry, RegistryError, validate_key};
use crate::scan::{DEFAULT_PATTERNS, scan_keys};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem-backed registry.
///
/// Every storage key is resolved relative to the root directory. Keys are
/// validated before touching the filesystem, so a key can never reach outside
/// the root.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use tome_registry::{ContentRegistry, FsRegistry};
///
/// let registry = FsRegistry::new(PathBuf::from("static"));
/// let text = registry.read("markdown/introduction.md")?;
/// # Ok::<(), tome_registry::RegistryError>(())
/// ```
#[derive(Debug)]
pub struct FsRegistry {
    root: PathBuf,
    patterns: Vec<Pattern>,
}

impl FsRegistry {
    /// Create a registry over `root` recognizing `*.md` and `*.markdown` files.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        let patterns = DEFAULT_PATTERNS
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect();
        Self { root, patterns }
    }

    /// Create a registry with custom file name patterns (e.g. `["*.md"]`).
    ///
    /// Invalid patterns are skipped with a warning.
    #[must_use]
    pub fn with_patterns(root: PathBuf, patterns: &[String]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!(pattern = %p, error = %e, "Ignoring invalid document pattern");
                    None
                }
            })
            .collect();
        Self { root, patterns }
    }

    /// Root directory of the content tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File name patterns recognized as documents.
    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    fn full_path(&self, key: &str) -> Result<PathBuf, RegistryError> {
        validate_key(key).map_err(|e| e.with_backend(BACKEND))?;
        Ok(self.root.join(key))
    }
}

impl ContentRegistry for FsRegistry {
    fn contains(&self, key: &str) -> bool {
        self.full_path(key).is_ok_and(|path| path.is_file())
    }

    fn read(&self, key: &str) -> Result<String, RegistryError> {
        let path = self.full_path(key)?;
        fs::read_to_string(&path).map_err(|e| RegistryError::io(e, Some(key)).with_backend(BACKEND))
    }

    fn keys(&self) -> Result<Vec<String>, RegistryError> {
        scan_keys(&self.root, &self.patterns)
            .map_err(|e| RegistryError::io(e, None).with_backend(BACKEND))
    }
}
