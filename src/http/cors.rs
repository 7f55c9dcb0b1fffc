//! CORS headers and preflight handling.
//!
//! The relay grants every origin the same fixed policy. The three headers are
//! set by a response layer wrapping the whole router, so relayed replies,
//! preflight answers, error bodies and method rejections all carry them, and
//! any upstream-supplied values of the same names are replaced.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, StatusCode};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

/// `Access-Control-Allow-Origin` value.
pub const ALLOW_ORIGIN: &str = "*";

/// `Access-Control-Allow-Methods` value. POST is advertised but not relayed.
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// `Access-Control-Allow-Headers` value.
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Requested-With, apikey";

/// Wrap a router so every response carries the CORS headers.
pub fn with_cors_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
}

/// Answer a preflight request locally: 200 with an empty body.
pub async fn preflight() -> StatusCode {
    tracing::debug!("Answering preflight request");
    StatusCode::OK
}
