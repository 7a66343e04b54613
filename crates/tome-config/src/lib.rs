//! Configuration management for Tome.
//!
//! Parses `tome.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//!
//! ## Example
//!
//! ```toml
//! [server]
//! host = "${TOME_HOST:-127.0.0.1}"
//! port = 7979
//!
//! [content]
//! source_dir = "static"
//! alternate_extensions = ["markdown"]
//!
//! [[sections]]
//! name = "docs"
//! root = "markdown"
//! default_slug = "introduction"
//! mount = "/docs"
//! ```

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Serve from a registry snapshot instead of the live tree.
    pub registry: Option<PathBuf>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "tome.toml";

/// Default content source directory, relative to the config file.
const DEFAULT_SOURCE_DIR: &str = "static";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Documentation sections.
    pub sections: Vec<SectionConfig>,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    data_dir: Option<String>,
    version_file: Option<String>,
    alternate_extensions: Option<Vec<String>>,
    registry: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Root of the content tree (section roots are relative to it).
    pub source_dir: PathBuf,
    /// Directory holding `contributors.json`, `releases.json` and `version.json`.
    pub data_dir: PathBuf,
    /// Plain-text `VERSION` file read by `stamp-version`.
    pub version_file: PathBuf,
    /// Extensions tried after the primary `md` conventions fail.
    pub alternate_extensions: Vec<String>,
    /// Registry snapshot to serve instead of the live tree.
    pub registry: Option<PathBuf>,
}

/// Documentation section: a content root mounted under a URL prefix.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SectionConfig {
    /// Section identifier (e.g. `docs`).
    pub name: String,
    /// Content root relative to the source directory, `/`-separated.
    pub root: String,
    /// Slug served for the bare mount path or an empty slug.
    pub default_slug: String,
    /// URL prefix (e.g. `/docs`).
    pub mount: String,
}

impl SectionConfig {
    /// Create a section.
    #[must_use]
    pub fn new(name: &str, root: &str, default_slug: &str, mount: &str) -> Self {
        Self {
            name: name.to_owned(),
            root: root.to_owned(),
            default_slug: default_slug.to_owned(),
            mount: mount.to_owned(),
        }
    }
}

/// Default sections: `docs` and `api`.
#[must_use]
pub fn default_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig::new("docs", "markdown", "introduction", "/docs"),
        SectionConfig::new("api", "markdown/api", "overview", "/api"),
    ]
}

fn default_alternate_extensions() -> Vec<String> {
    vec!["markdown".to_owned()]
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`TOME_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tome.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(registry) = &settings.registry {
            self.content_resolved.registry = Some(registry.clone());
        }
    }

    /// Look up a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let source_dir = base.join(DEFAULT_SOURCE_DIR);
        Self {
            server: ServerConfig::default(),
            content: ContentConfigRaw::default(),
            sections: default_sections(),
            content_resolved: ContentConfig {
                data_dir: source_dir.join("data"),
                source_dir,
                version_file: base.join("VERSION"),
                alternate_extensions: default_alternate_extensions(),
                registry: None,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_content()?;
        self.validate_sections()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate content configuration.
    fn validate_content(&self) -> Result<(), ConfigError> {
        for ext in &self.content_resolved.alternate_extensions {
            if ext.is_empty() || ext.starts_with('.') || ext.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "content.alternate_extensions: invalid extension {ext:?}"
                )));
            }
        }
        Ok(())
    }

    /// Validate section definitions.
    fn validate_sections(&self) -> Result<(), ConfigError> {
        if self.sections.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[sections]] entry is required".to_owned(),
            ));
        }

        let mut names = HashSet::new();
        let mut mounts = HashSet::new();
        for section in &self.sections {
            require_non_empty(&section.name, "sections.name")?;
            let field = |key: &str| format!("sections.{}.{key}", section.name);

            require_non_empty(&section.default_slug, &field("default_slug"))?;
            if section.root.starts_with('/')
                || section.root.split('/').any(|segment| segment == "..")
            {
                return Err(ConfigError::Validation(format!(
                    "{} must be a relative path inside the source directory",
                    field("root")
                )));
            }
            if !section.mount.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{} must start with /",
                    field("mount")
                )));
            }
            if !names.insert(section.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate section name: {}",
                    section.name
                )));
            }
            if !mounts.insert(section.mount.trim_end_matches('/')) {
                return Err(ConfigError::Validation(format!(
                    "duplicate section mount: {}",
                    section.mount
                )));
            }
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = config_dir.join(
            self.content
                .source_dir
                .as_deref()
                .unwrap_or(DEFAULT_SOURCE_DIR),
        );
        let data_dir = self
            .content
            .data_dir
            .as_deref()
            .map_or_else(|| source_dir.join("data"), |dir| config_dir.join(dir));

        self.content_resolved = ContentConfig {
            data_dir,
            version_file: config_dir.join(self.content.version_file.as_deref().unwrap_or("VERSION")),
            alternate_extensions: self
                .content
                .alternate_extensions
                .clone()
                .unwrap_or_else(default_alternate_extensions),
            registry: self.content.registry.as_deref().map(|p| config_dir.join(p)),
            source_dir,
        };
    }
}
