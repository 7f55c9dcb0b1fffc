//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Build the outbound request from the inbound one
//!
//! # Design Decisions
//! - Request ID lives in request extensions only; it is never added to the
//!   headers forwarded upstream
//! - Target URL is a plain string join of base and path+query, so the query
//!   is passed through byte-for-byte
//! - `Host` is the only inbound header that is dropped

use std::fmt;
use std::task::{Context, Poll};

use axum::http::{header, HeaderMap, Request, Uri};
use tower::{Layer, Service};
use uuid::Uuid;

use crate::error::{RelayError, RelayResult};
use crate::upstream::OutboundRequest;

/// Unique identifier for one inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a new random request ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Access to the request ID attached by [`RequestIdLayer`].
pub trait RequestIdExt {
    fn request_id(&self) -> Option<RequestId>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<RequestId> {
        self.extensions().get::<RequestId>().copied()
    }
}

/// Layer that tags every request with a fresh [`RequestId`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        req.extensions_mut().insert(RequestId::new());
        self.inner.call(req)
    }
}

/// Join the upstream base and the inbound path+query into the target URI.
pub fn target_uri(upstream_base: &str, inbound: &Uri) -> RelayResult<Uri> {
    let path_and_query = inbound
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!("{}{}", upstream_base.trim_end_matches('/'), path_and_query);

    url.parse::<Uri>().map_err(|e| RelayError::InvalidTarget {
        reason: e.to_string(),
        url,
    })
}

/// Copy every inbound header except `Host`, keeping repeated headers.
pub fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound.iter() {
        if name != header::HOST {
            headers.append(name.clone(), value.clone());
        }
    }
    headers
}

/// Build the outbound request for an inbound one.
pub fn outbound_request<B>(upstream_base: &str, inbound: &Request<B>) -> RelayResult<OutboundRequest> {
    Ok(OutboundRequest {
        uri: target_uri(upstream_base, inbound.uri())?,
        headers: forwarded_headers(inbound.headers()),
    })
}
