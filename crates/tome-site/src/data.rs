//! Navigation data: contributors, releases and the site version.
//!
//! The data directory holds JSON caches produced outside the request path:
//!
//! - `contributors.json` / `releases.json`: arrays of plain objects
//! - `version.json`: `{"version": "..."}`, written by [`stamp_version`]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contributors cache filename.
pub const CONTRIBUTORS_FILE: &str = "contributors.json";
/// Releases cache filename.
pub const RELEASES_FILE: &str = "releases.json";
/// Version descriptor filename.
pub const VERSION_JSON_FILE: &str = "version.json";
/// Raw version copy written next to `version.json`.
pub const VERSION_FILE: &str = "VERSION";

/// Error loading or writing site data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// I/O error.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed JSON.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// Version source file does not exist.
    #[error("Version file not found: {}", .0.display())]
    MissingVersionFile(PathBuf),
}

/// Contents of `version.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Site version string.
    pub version: String,
}

/// Navigation data loaded from the data directory.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SiteData {
    /// Contributor records.
    pub contributors: Vec<Map<String, Value>>,
    /// Release records.
    pub releases: Vec<Map<String, Value>>,
    /// Site version, if stamped.
    pub version: Option<VersionInfo>,
}

impl SiteData {
    /// Load all data files from `data_dir`.
    ///
    /// Missing files yield empty data; malformed files are errors.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if a present file cannot be read or parsed.
    pub fn load(data_dir: &Path) -> Result<Self, DataError> {
        let data = Self {
            contributors: read_json(&data_dir.join(CONTRIBUTORS_FILE))?.unwrap_or_default(),
            releases: read_json(&data_dir.join(RELEASES_FILE))?.unwrap_or_default(),
            version: read_json(&data_dir.join(VERSION_JSON_FILE))?,
        };
        tracing::debug!(
            data_dir = %data_dir.display(),
            contributors = data.contributors.len(),
            releases = data.releases.len(),
            "Loaded site data"
        );
        Ok(data)
    }

    /// Version string, or an empty string if not stamped.
    #[must_use]
    pub fn version_str(&self) -> &str {
        self.version.as_ref().map_or("", |v| v.version.as_str())
    }
}

/// Read and parse a JSON file, returning `None` if it does not exist.
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, DataError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "Data file not found, using empty data");
            return Ok(None);
        }
        Err(source) => {
            return Err(DataError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Stamp the site version into the data directory.
///
/// Reads the trimmed contents of `version_file` and writes `version.json`
/// (pretty-printed) and a raw `VERSION` copy into `data_dir`, creating the
/// directory if needed. Returns the version.
///
/// # Errors
///
/// Returns [`DataError::MissingVersionFile`] if `version_file` does not exist,
/// or [`DataError::Io`] if reading or writing fails.
pub fn stamp_version(version_file: &Path, data_dir: &Path) -> Result<String, DataError> {
    let raw = std::fs::read_to_string(version_file).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            DataError::MissingVersionFile(version_file.to_path_buf())
        } else {
            DataError::Io {
                path: version_file.to_path_buf(),
                source,
            }
        }
    })?;
    let version = raw.trim().to_owned();

    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| DataError::Io { path, source }
    };

    std::fs::create_dir_all(data_dir).map_err(io_err(data_dir))?;

    let info = VersionInfo {
        version: version.clone(),
    };
    let json_path = data_dir.join(VERSION_JSON_FILE);
    let json = serde_json::to_string_pretty(&info).map_err(|source| DataError::Json {
        path: json_path.clone(),
        source,
    })?;
    std::fs::write(&json_path, json).map_err(io_err(&json_path))?;

    let copy_path = data_dir.join(VERSION_FILE);
    std::fs::write(&copy_path, &version).map_err(io_err(&copy_path))?;

    tracing::info!(version = %version, data_dir = %data_dir.display(), "Stamped version");
    Ok(version)
}
