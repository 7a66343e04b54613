//! Application state.
//!
//! Shared state for all request handlers. Everything here is immutable after
//! startup, so handlers read it without locking.

use std::sync::Arc;

use tome_site::{Site, SiteData};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Site for document loading and rendering.
    pub(crate) site: Arc<Site>,
    /// Navigation data loaded from the data directory.
    pub(crate) data: SiteData,
    /// Site version for `ETag` computation.
    pub(crate) version: String,
}
