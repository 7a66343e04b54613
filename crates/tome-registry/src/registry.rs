//! Registry trait and error types.
//!
//! Provides the core [`ContentRegistry`] trait along with [`RegistryError`]
//! for unified error handling across backends.

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryErrorKind {
    /// Key does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Key escapes the content root or is otherwise malformed.
    InvalidKey,
    /// Stored data could not be decoded (e.g. a corrupt snapshot).
    InvalidData,
    /// Other/unknown error category.
    Other,
}

/// Registry error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct RegistryError {
    /// Semantic error category.
    pub kind: RegistryErrorKind,
    /// Storage key context (if applicable).
    pub key: Option<String>,
    /// Backend identifier (e.g., "Fs", "Map").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RegistryError {
    /// Create a new registry error.
    #[must_use]
    pub fn new(kind: RegistryErrorKind) -> Self {
        Self {
            kind,
            key: None,
            backend: None,
            source: None,
        }
    }

    /// Attach storage key context.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error for a key.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::new(RegistryErrorKind::NotFound).with_key(key)
    }

    /// Create a registry error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, key: Option<&str>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => RegistryErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => RegistryErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => RegistryErrorKind::InvalidData,
            _ => RegistryErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(k) = key {
            error = error.with_key(k);
        }
        error
    }
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (key: markdown/foo.md)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            RegistryErrorKind::NotFound => "Not found",
            RegistryErrorKind::PermissionDenied => "Permission denied",
            RegistryErrorKind::InvalidKey => "Invalid key",
            RegistryErrorKind::InvalidData => "Invalid data",
            RegistryErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(key) = &self.key {
            write!(f, " (key: {key})")?;
        }

        Ok(())
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Immutable mapping from storage key to raw document text.
///
/// Implementations must be safe to read concurrently; nothing in the trait
/// mutates the registry after construction.
pub trait ContentRegistry: Send + Sync {
    /// Check whether a document exists under `key`.
    ///
    /// Returns `false` for invalid keys and on backend errors.
    fn contains(&self, key: &str) -> bool;

    /// Read raw document text.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the key is invalid, missing, or unreadable.
    fn read(&self, key: &str) -> Result<String, RegistryError>;

    /// List every storage key, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the backend cannot be enumerated.
    fn keys(&self) -> Result<Vec<String>, RegistryError>;
}

/// Validate that a storage key stays inside the content root.
///
/// Rejects empty keys, absolute keys, backslashes and any `.`/`..` segment.
///
/// # Errors
///
/// Returns [`RegistryErrorKind::InvalidKey`] describing the rejected key.
pub fn validate_key(key: &str) -> Result<(), RegistryError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if invalid {
        return Err(RegistryError::new(RegistryErrorKind::InvalidKey).with_key(key));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_new() {
        let err = RegistryError::new(RegistryErrorKind::NotFound);

        assert_eq!(err.kind, RegistryErrorKind::NotFound);
        assert!(err.key.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_registry_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RegistryError::new(RegistryErrorKind::NotFound).with_source(io_err);

        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_registry_error_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = RegistryError::io(io_err, Some("markdown/a.md"));

        assert_eq!(err.kind, RegistryErrorKind::PermissionDenied);
        assert_eq!(err.key.as_deref(), Some("markdown/a.md"));
    }

    #[test]
    fn test_registry_error_display_simple() {
        let err = RegistryError::new(RegistryErrorKind::NotFound);

        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_registry_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RegistryError::new(RegistryErrorKind::NotFound)
            .with_backend("Fs")
            .with_key("markdown/guide.md")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: file not found (key: markdown/guide.md)"
        );
    }

    #[test]
    fn test_registry_error_is_send_sync() {
        static_assertions::assert_impl_all!(RegistryError: Send, Sync);
    }

    #[test]
    fn test_validate_key_accepts_nested() {
        assert!(validate_key("markdown/metrics/quick-start.md").is_ok());
        assert!(validate_key("index.md").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_traversal() {
        let err = validate_key("markdown/../secret.md").unwrap_err();

        assert_eq!(err.kind, RegistryErrorKind::InvalidKey);
        assert_eq!(err.key.as_deref(), Some("markdown/../secret.md"));
    }

    #[test]
    fn test_validate_key_rejects_absolute_and_empty() {
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("").is_err());
        assert!(validate_key("markdown//a.md").is_err());
        assert!(validate_key("markdown\\a.md").is_err());
    }
}
