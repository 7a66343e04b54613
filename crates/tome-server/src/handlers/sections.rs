//! Sections API endpoint.
//!
//! Returns the configured documentation sections.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/sections.
#[derive(Serialize)]
pub(crate) struct SectionsResponse {
    /// List of sections.
    sections: Vec<SectionResponse>,
}

/// Section item for JSON response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SectionResponse {
    /// Section identifier.
    name: String,
    /// URL prefix.
    mount: String,
    /// Slug served for the bare mount path.
    default_slug: String,
}

/// Handle GET /api/sections.
pub(crate) async fn get_sections(State(state): State<Arc<AppState>>) -> Json<SectionsResponse> {
    let sections = state
        .site
        .sections()
        .iter()
        .map(|s| SectionResponse {
            name: s.name.clone(),
            mount: s.mount.clone(),
            default_slug: s.default_slug.clone(),
        })
        .collect();

    Json(SectionsResponse { sections })
}
