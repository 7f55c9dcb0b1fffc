//! CORS-injecting HTTP relay library.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::schema::RelayConfig;
pub use error::RelayError;
pub use http::RelayServer;
pub use lifecycle::{Shutdown, ShutdownSignal};
