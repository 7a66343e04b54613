//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/sections", get(handlers::sections::get_sections))
        .route(
            "/api/pages/{section}",
            get(handlers::pages::get_section_page),
        )
        .route("/api/pages/{section}/{*slug}", get(handlers::pages::get_page))
        .route(
            "/api/data/contributors",
            get(handlers::data::get_contributors),
        )
        .route("/api/data/releases", get(handlers::data::get_releases))
        .route("/api/data/version", get(handlers::data::get_version));

    Router::new()
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use serde_json::{Map, Value, json};
    use tome_registry::{ContentRegistry, MapRegistry, RegistryError, RegistryErrorKind};
    use tome_site::{Site, SiteData};
    use tower::ServiceExt;

    use super::*;

    fn registry() -> MapRegistry {
        MapRegistry::new()
            .with_document(
                "markdown/introduction.md",
                "---\ntitle: Welcome\n---\n# Introduction\n\n## Install\n\n## Install\n",
            )
            .with_document("markdown/metrics-quick-start.md", "# Quick Start\n")
            .with_document("markdown/api/overview.md", "# API\n\n## Auth\n")
    }

    fn app_with(registry: Arc<dyn ContentRegistry>) -> Router {
        let mut contributor = Map::new();
        contributor.insert("login".to_owned(), json!("ada"));
        let data = SiteData {
            contributors: vec![contributor],
            ..Default::default()
        };
        create_router(Arc::new(AppState {
            site: Arc::new(Site::new(registry)),
            data,
            version: "1.0.0".to_owned(),
        }))
    }

    fn app() -> Router {
        app_with(Arc::new(registry()))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    #[tokio::test]
    async fn test_get_page() {
        let (status, headers, body) = get(app(), "/api/pages/docs/introduction").await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers.contains_key(header::ETAG));
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(body["slug"], "introduction");
        assert_eq!(body["section"], "docs");
        assert_eq!(body["title"], "Welcome");
        assert_eq!(
            body["toc"],
            json!([
                {"id": "install", "text": "Install", "level": 2},
                {"id": "install-1", "text": "Install", "level": 2},
            ])
        );
        assert!(
            body["content"]
                .as_str()
                .unwrap()
                .contains(r#"<h2 id="install-1" data-nav-heading>Install</h2>"#)
        );
    }

    #[tokio::test]
    async fn test_get_section_default() {
        let (status, _, docs) = get(app(), "/api/pages/docs").await;
        let (_, _, api) = get(app(), "/api/pages/api").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(docs["slug"], "introduction");
        assert_eq!(api["slug"], "overview");
    }

    #[tokio::test]
    async fn test_get_nested_slug_fallback() {
        let (status, _, body) = get(app(), "/api/pages/docs/metrics/quick-start").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Quick Start");
    }

    #[tokio::test]
    async fn test_get_page_not_found() {
        let (status, _, body) = get(app(), "/api/pages/docs/missing/page/").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["slug"], "missing/page");
        assert_eq!(body["section"], "docs");
    }

    #[tokio::test]
    async fn test_get_unknown_section() {
        let (status, _, body) = get(app(), "/api/pages/blog/post").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["section"], "blog");
    }

    #[tokio::test]
    async fn test_get_page_internal_error() {
        struct Unreadable;

        impl ContentRegistry for Unreadable {
            fn contains(&self, _key: &str) -> bool {
                true
            }

            fn read(&self, key: &str) -> Result<String, RegistryError> {
                Err(RegistryError::new(RegistryErrorKind::Other).with_key(key))
            }

            fn keys(&self) -> Result<Vec<String>, RegistryError> {
                Ok(Vec::new())
            }
        }

        let (status, _, body) = get(app_with(Arc::new(Unreadable)), "/api/pages/docs/a").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("markdown/a.md"));
    }

    #[tokio::test]
    async fn test_if_none_match_returns_not_modified() {
        let (_, headers, _) = get(app(), "/api/pages/api/overview").await;
        let etag = headers[header::ETAG].clone();

        let response = app()
            .oneshot(
                Request::get("/api/pages/api/overview")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_title_change_invalidates_etag() {
        let page = |title: &str| {
            let registry = MapRegistry::new().with_document(
                "markdown/introduction.md",
                format!("---\ntitle: {title}\n---\n## Install\n"),
            );
            app_with(Arc::new(registry))
        };
        let (_, headers, _) = get(page("Old"), "/api/pages/docs/introduction").await;
        let etag = headers[header::ETAG].clone();

        let response = page("New")
            .oneshot(
                Request::get("/api/pages/docs/introduction")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["title"], "New");
    }

    #[tokio::test]
    async fn test_get_sections() {
        let (status, _, body) = get(app(), "/api/sections").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sections"][0]["name"], "docs");
        assert_eq!(body["sections"][1]["mount"], "/api");
    }

    #[tokio::test]
    async fn test_get_data() {
        let (_, _, contributors) = get(app(), "/api/data/contributors").await;
        let (_, _, releases) = get(app(), "/api/data/releases").await;
        let (_, _, version) = get(app(), "/api/data/version").await;

        assert_eq!(contributors, json!([{"login": "ada"}]));
        assert_eq!(releases, json!([]));
        assert_eq!(version, json!({"version": "1.0.0"}));
    }

    #[tokio::test]
    async fn test_security_headers() {
        let (_, headers, _) = get(app(), "/api/sections").await;

        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["content-security-policy"], security::CSP);
    }
}
