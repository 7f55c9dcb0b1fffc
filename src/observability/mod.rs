//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Relay handler, server, lifecycle
//!     → tracing events (request_id, target_url, error fields)
//!     → logging.rs subscriber (EnvFilter + fmt)
//!     → stdout
//! ```

pub mod logging;

pub use logging::init_logging;
