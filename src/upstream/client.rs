//! HTTP upstream client.
//!
//! # Responsibilities
//! - Send GET requests to the upstream over plain HTTP
//! - Buffer the complete response body
//! - Map transport failures to `RelayError`
//! - Apply the optional outbound timeout

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::UpstreamConfig;
use crate::error::{RelayError, RelayResult};
use crate::upstream::{OutboundRequest, Upstream, UpstreamResponse};

/// Upstream reached over HTTP/1.1 with hyper-util's client.
#[derive(Clone, Debug)]
pub struct HttpUpstream {
    client: Client<HttpConnector, Body>,
    timeout: Option<Duration>,
}

impl HttpUpstream {
    /// Create a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Self {
        // No idle connections are kept, so every call opens a fresh one.
        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(HttpConnector::new());

        Self {
            client,
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    async fn send(&self, request: OutboundRequest) -> RelayResult<UpstreamResponse> {
        let mut builder = Request::builder().method(Method::GET).uri(request.uri);
        if let Some(headers) = builder.headers_mut() {
            *headers = request.headers;
        }
        let outbound = builder
            .body(Body::empty())
            .map_err(|e| RelayError::transport(&e))?;

        let response = self
            .client
            .request(outbound)
            .await
            .map_err(|e| RelayError::transport(&e))?;

        let (parts, body): (_, hyper::body::Incoming) = response.into_parts();
        let body = axum::body::to_bytes(Body::new(body), usize::MAX)
            .await
            .map_err(|e| RelayError::Body(crate::error::error_chain(&e)))?;

        Ok(UpstreamResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn forward(&self, request: OutboundRequest) -> RelayResult<UpstreamResponse> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.send(request))
                .await
                .map_err(|_| RelayError::Timeout(limit.as_secs()))?,
            None => self.send(request).await,
        }
    }
}
