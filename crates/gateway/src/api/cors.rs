//! Permissive CORS headers for the session endpoint.
//!
//! `tower_http::cors::CorsLayer` refuses to combine a wildcard origin with
//! `Access-Control-Allow-Credentials: true`, and only decorates requests
//! that carry an `Origin`.  The widget contract wants the same four headers
//! on every response, so they are stamped on directly.

use axum::http::{header, HeaderValue};
use axum::response::Response;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const ALLOW_CREDENTIALS: &str = "true";

/// `axum::middleware::map_response` hook.
pub async fn with_cors_headers(mut resp: Response) -> Response {
    let headers = resp.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static(ALLOW_CREDENTIALS),
    );
    resp
}
