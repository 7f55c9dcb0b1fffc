//! Relay error definitions.
//!
//! Every variant is a failure to obtain an upstream response. Upstream
//! responses themselves, whatever their status, are never errors here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while relaying a request.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Connection refused, DNS failure, protocol error and the like.
    #[error("{0}")]
    Transport(String),

    /// The configured outbound timeout elapsed.
    #[error("upstream did not respond within {0} seconds")]
    Timeout(u64),

    /// The upstream started responding but the body could not be read.
    #[error("failed to read upstream body: {0}")]
    Body(String),

    /// The inbound path could not be joined onto the upstream base.
    #[error("invalid target URL {url:?}: {reason}")]
    InvalidTarget { url: String, reason: String },
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

impl RelayError {
    /// Build a transport error from any error, keeping its source chain.
    pub fn transport(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::Transport(error_chain(err))
    }
}

/// Render an error and all of its sources as `outer: inner: root`.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// JSON body written for relay failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    #[derive(Debug, Error)]
    #[error("client error (Connect)")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn test_error_display() {
        let err = RelayError::Timeout(10);
        assert_eq!(err.to_string(), "upstream did not respond within 10 seconds");

        let err = RelayError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_transport_keeps_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let err = RelayError::transport(&Outer(io));
        assert_eq!(err.to_string(), "client error (Connect): Connection refused");
    }

    #[tokio::test]
    async fn test_into_response_is_json_500() {
        let response = RelayError::Transport("connection refused".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "connection refused");
    }
}
