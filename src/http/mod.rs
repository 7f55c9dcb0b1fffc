//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, method dispatch)
//!     → request.rs (tag request ID, build outbound request)
//!     → upstream (forward, buffer response)
//!     → response.rs (status/headers/body copied for the client)
//!     → cors.rs (CORS headers set on every reply)
//!     → Send to client
//! ```

pub mod cors;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, RequestIdExt, RequestIdLayer};
pub use server::{AppState, RelayServer};
