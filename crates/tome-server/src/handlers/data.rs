//! Navigation data endpoints.
//!
//! Serve the contributor, release and version caches loaded at startup.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Map, Value, json};

use crate::state::AppState;

/// Handle GET /api/data/contributors.
pub(crate) async fn get_contributors(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<Map<String, Value>>> {
    Json(state.data.contributors.clone())
}

/// Handle GET /api/data/releases.
pub(crate) async fn get_releases(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<Map<String, Value>>> {
    Json(state.data.releases.clone())
}

/// Handle GET /api/data/version.
///
/// Falls back to the server's own version when no `version.json` was stamped.
pub(crate) async fn get_version(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({"version": state.version}))
}
