//! HTTP server for Tome documentation sites.
//!
//! This crate provides an axum server exposing:
//! - `GET /api/sections`: configured sections
//! - `GET /api/pages/{section}` and `GET /api/pages/{section}/{*slug}`:
//!   rendered documents with title and table of contents
//! - `GET /api/data/{contributors,releases,version}`: navigation data
//!
//! # Quick Start
//!
//! ```ignore
//! use tome_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         port: 8080,
//!         ..Default::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (tome-server)
//!                        │
//!                        └─► handlers ──► Site (resolve + render)
//!                                            │
//!                                            └─► ContentRegistry (Fs or Map)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use state::AppState;
use tome_registry::{ContentRegistry, FsRegistry, MapRegistry};
use tome_site::{Section, Site, SiteData, default_sections};

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content tree root.
    pub source_dir: PathBuf,
    /// Navigation data directory.
    pub data_dir: PathBuf,
    /// Registry snapshot to serve instead of the live tree.
    pub registry: Option<PathBuf>,
    /// Documentation sections.
    pub sections: Vec<Section>,
    /// Extensions tried after the primary conventions.
    pub alternate_extensions: Vec<String>,
    /// Version used when the data directory has no `version.json`.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            source_dir: PathBuf::from("static"),
            data_dir: PathBuf::from("static/data"),
            registry: None,
            sections: default_sections(),
            alternate_extensions: vec!["markdown".to_owned()],
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the registry or data cannot be loaded, or the server
/// fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry: Arc<dyn ContentRegistry> = match &config.registry {
        Some(path) => {
            let registry = MapRegistry::load(path)?;
            tracing::info!(
                path = %path.display(),
                documents = registry.len(),
                "Serving registry snapshot"
            );
            Arc::new(registry)
        }
        None => {
            tracing::info!(source_dir = %config.source_dir.display(), "Serving content tree");
            Arc::new(FsRegistry::new(config.source_dir.clone()))
        }
    };

    let site = Arc::new(
        Site::new(registry)
            .with_sections(config.sections.clone())
            .with_alternate_extensions(config.alternate_extensions.clone()),
    );

    let data = SiteData::load(&config.data_dir)?;
    let version = data
        .version
        .as_ref()
        .map_or_else(|| config.version.clone(), |v| v.version.clone());

    let state = Arc::new(AppState {
        site,
        data,
        version,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Tome config.
///
/// # Arguments
///
/// * `config` - Tome configuration
/// * `version` - Fallback version for `ETag` computation
#[must_use]
pub fn server_config_from_config(config: &tome_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.content_resolved.source_dir.clone(),
        data_dir: config.content_resolved.data_dir.clone(),
        registry: config.content_resolved.registry.clone(),
        sections: config.sections.iter().map(Section::from).collect(),
        alternate_extensions: config.content_resolved.alternate_extensions.clone(),
        version,
    }
}
