//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tome_site::LoadError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No document for the slug.
    #[error("Document not found: {section}/{slug}")]
    NotFound {
        /// Section name.
        section: String,
        /// Unresolved (normalized) slug.
        slug: String,
    },

    /// Section is not configured.
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// Resolved document could not be read.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<LoadError> for ServerError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::NotFound { slug, section } => Self::NotFound { section, slug },
            LoadError::UnknownSection(name) => Self::UnknownSection(name),
            LoadError::Internal { .. } => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NotFound { section, slug } => (
                StatusCode::NOT_FOUND,
                json!({"error": "Document not found", "section": section, "slug": slug}),
            ),
            Self::UnknownSection(name) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Unknown section", "section": name}),
            ),
            Self::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": message}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
