//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! OutboundRequest (absolute URI + headers, built by http::request)
//!     → Upstream::forward
//!     → client.rs (hyper-util client, one connection per call)
//!     → UpstreamResponse (status + headers + fully buffered body)
//! ```
//!
//! # Design Decisions
//! - The handler only sees the `Upstream` trait, so tests can swap in a double
//! - Bodies are buffered in full; nothing is streamed through
//! - Connections are not pooled or reused

pub mod client;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode, Uri};

use crate::error::RelayResult;

pub use client::HttpUpstream;

/// A request ready to be sent upstream.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// Absolute target URI: upstream base + inbound path and query.
    pub uri: Uri,
    /// Inbound headers minus `Host`.
    pub headers: HeaderMap,
}

/// A complete upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Something that can carry an outbound GET to the upstream.
#[async_trait]
pub trait Upstream: Send + Sync + 'static {
    /// Send the request and buffer the full response.
    ///
    /// Only transport failures are errors; any HTTP status is a response.
    async fn forward(&self, request: OutboundRequest) -> RelayResult<UpstreamResponse>;
}
