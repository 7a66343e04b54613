//! Response headers for the JSON API.
//!
//! Every route returns JSON, so the content policy denies all fetches and
//! framing. Rendered page HTML travels inside the JSON body and is subject to
//! the embedding site's own policy, not this one.

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Content-Security-Policy for API responses.
pub(crate) const CSP: &str = "default-src 'none'; frame-ancestors 'none'";

fn header_layer(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

/// Content-Security-Policy with [`CSP`].
pub(crate) fn csp_layer() -> SetResponseHeaderLayer<HeaderValue> {
    header_layer("content-security-policy", CSP)
}

/// `X-Content-Type-Options: nosniff`, so page JSON is never sniffed as HTML.
pub(crate) fn content_type_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    header_layer("x-content-type-options", "nosniff")
}

/// `X-Frame-Options: DENY` for clients that ignore `frame-ancestors`.
pub(crate) fn frame_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    header_layer("x-frame-options", "DENY")
}
