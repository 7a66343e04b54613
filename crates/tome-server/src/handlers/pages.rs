//! Pages API endpoint.
//!
//! Renders a document of a section and returns JSON with the title, table of
//! contents and HTML content.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use md5::{Digest, Md5};
use serde::Serialize;
use tome_renderer::Heading;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/pages/{section}/{slug}.
#[derive(Serialize)]
struct PageResponse {
    /// Slug the document was resolved for.
    slug: String,
    /// Section name.
    section: String,
    /// Title from frontmatter or the first H1.
    title: Option<String>,
    /// Level 2-3 headings.
    toc: Vec<Heading>,
    /// Rendered HTML content.
    content: String,
}

/// Handle GET /api/pages/{section} (section default document).
pub(crate) async fn get_section_page(
    Path(section): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let url_path = state
        .site
        .section(&section)
        .map(|s| s.mount.clone())
        .unwrap_or_default();
    get_page_impl(&section, "", &url_path, &state, &headers)
}

/// Handle GET /api/pages/{section}/{*slug}.
pub(crate) async fn get_page(
    Path((section, slug)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let url_path = state
        .site
        .section(&section)
        .map(|s| format!("{}/{slug}", s.mount))
        .unwrap_or_default();
    get_page_impl(&section, &slug, &url_path, &state, &headers)
}

/// Shared implementation for page rendering.
fn get_page_impl(
    section: &str,
    slug: &str,
    url_path: &str,
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let doc = state.site.render(section, slug, url_path)?;

    let response = PageResponse {
        slug: doc.slug,
        section: doc.section,
        title: doc.title,
        toc: doc.toc,
        content: doc.html,
    };
    // The tag covers the whole body: a frontmatter title can change while
    // the HTML stays the same.
    let body = serde_json::to_string(&response)
        .map_err(|e| ServerError::Internal(format!("Failed to serialize page: {e}")))?;
    let etag = compute_etag(&state.version, &body);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        body,
    )
        .into_response())
}

/// Compute `ETag` from version and serialized response body.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars) - sufficient for
/// cache invalidation with negligible collision probability.
pub(crate) fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_etag_includes_version() {
        let etag1 = compute_etag("1.0.0", "content");
        let etag2 = compute_etag("1.0.1", "content");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_includes_content() {
        let etag1 = compute_etag("1.0.0", "content1");
        let etag2 = compute_etag("1.0.0", "content2");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag("1.0.0", "content");

        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        // 16 hex chars + 2 quotes = 18 total
        assert_eq!(etag.len(), 18);
    }

    #[test]
    fn test_page_response_serialization() {
        let response = PageResponse {
            slug: "setup".to_owned(),
            section: "docs".to_owned(),
            title: Some("Setup".to_owned()),
            toc: vec![Heading {
                id: "install".to_owned(),
                text: "Install".to_owned(),
                level: 2,
            }],
            content: "<h1>Setup</h1>".to_owned(),
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["slug"], "setup");
        assert_eq!(json["section"], "docs");
        assert_eq!(json["title"], "Setup");
        assert_eq!(json["toc"][0]["id"], "install");
        assert_eq!(json["toc"][0]["level"], 2);
        assert_eq!(json["content"], "<h1>Setup</h1>");
    }
}
