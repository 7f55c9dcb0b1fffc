//! Response handling and transformation.
//!
//! # Responsibilities
//! - Turn a buffered upstream response into the reply for the client
//! - Keep status, every header (including repeats) and body bytes as-is
//!
//! # Design Decisions
//! - Upstream 4xx/5xx statuses are replies, not errors
//! - CORS headers are applied afterwards by the router layer (see `cors`)

use axum::body::Body;
use axum::response::{IntoResponse, Response};

use crate::upstream::UpstreamResponse;

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
