//! Precompiled in-memory registry.
//!
//! [`Snapshot`] is the deterministic build-time artifact: every document of a
//! content tree captured into a sorted key → content map and serialized as JSON.
//! [`MapRegistry`] serves documents from such a map.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::registry::{ContentRegistry, RegistryError, RegistryErrorKind, validate_key};

/// Backend identifier for error messages.
const BACKEND: &str = "Map";

/// Serialized registry contents.
///
/// Keys are kept in a [`BTreeMap`] so that capturing the same tree twice
/// produces byte-identical JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Storage key → raw document text.
    pub documents: BTreeMap<String, String>,
}

impl Snapshot {
    /// Capture every document of `registry`.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError`] raised while listing or reading.
    pub fn capture(registry: &dyn ContentRegistry) -> Result<Self, RegistryError> {
        let mut documents = BTreeMap::new();
        for key in registry.keys()? {
            let content = registry.read(&key)?;
            documents.insert(key, content);
        }
        tracing::debug!(documents = documents.len(), "Captured registry snapshot");
        Ok(Self { documents })
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryErrorKind::InvalidData`] if serialization fails.
    pub fn to_json(&self) -> Result<String, RegistryError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            RegistryError::new(RegistryErrorKind::InvalidData)
                .with_backend(BACKEND)
                .with_source(e)
        })
    }

    /// Parse a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryErrorKind::InvalidData`] for malformed JSON or
    /// [`RegistryErrorKind::InvalidKey`] if a key escapes the content root.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let snapshot: Self = serde_json::from_str(json).map_err(|e| {
            RegistryError::new(RegistryErrorKind::InvalidData)
                .with_backend(BACKEND)
                .with_source(e)
        })?;
        for key in snapshot.documents.keys() {
            validate_key(key).map_err(|e| e.with_backend(BACKEND))?;
        }
        Ok(snapshot)
    }

    /// Write the snapshot as JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if serialization or the write fails.
    pub fn write(&self, path: &Path) -> Result<(), RegistryError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| RegistryError::io(e, None).with_backend(BACKEND))
    }

    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::io(e, None).with_backend(BACKEND))?;
        Self::from_json(&json)
    }
}

/// Registry backed by a precompiled key → content map.
///
/// # Example
///
/// ```
/// use tome_registry::{ContentRegistry, MapRegistry};
///
/// let registry = MapRegistry::new()
///     .with_document("markdown/api/overview.md", "# API");
///
/// assert_eq!(registry.keys().unwrap(), vec!["markdown/api/overview.md".to_owned()]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MapRegistry {
    documents: BTreeMap<String, String>,
}

impl MapRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    #[must_use]
    pub fn with_document(mut self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.documents.insert(key.into(), content.into());
        self
    }

    /// Load a registry from a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the snapshot cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        Snapshot::load(path).map(Self::from)
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the registry holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl From<Snapshot> for MapRegistry {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            documents: snapshot.documents,
        }
    }
}

impl ContentRegistry for MapRegistry {
    fn contains(&self, key: &str) -> bool {
        self.documents.contains_key(key)
    }

    fn read(&self, key: &str) -> Result<String, RegistryError> {
        validate_key(key).map_err(|e| e.with_backend(BACKEND))?;
        self.documents
            .get(key)
            .cloned()
            .ok_or_else(|| RegistryError::not_found(key).with_backend(BACKEND))
    }

    fn keys(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.documents.keys().cloned().collect())
    }
}
