//! Cross-origin headers and path normalization.
//!
//! # Responsibilities
//! - Attach permissive CORS headers to every response, preflight included
//! - Lowercase the request path before routing
//!
//! # Design Decisions
//! - Header values are static; no origin reflection
//! - Query strings are left untouched by path normalization

use axum::{
    extract::Request,
    http::{header, uri::PathAndQuery, HeaderValue, Uri},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// Wrap every route (and the fallback) with the CORS response headers.
pub fn with_cors<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
}

/// Lowercase the path component of the request URI.
///
/// Runs outside the router, since routing has already happened by the
/// time router-level middleware sees the request.
pub fn lowercase_path(mut req: Request) -> Request {
    let uri = req.uri();
    if !uri.path().bytes().any(|b| b.is_ascii_uppercase()) {
        return req;
    }

    let path = uri.path().to_ascii_lowercase();
    let lowered = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };

    let mut parts = uri.clone().into_parts();
    match PathAndQuery::try_from(lowered) {
        Ok(pq) => parts.path_and_query = Some(pq),
        Err(_) => return req,
    }
    if let Ok(uri) = Uri::from_parts(parts) {
        *req.uri_mut() = uri;
    }
    req
}
