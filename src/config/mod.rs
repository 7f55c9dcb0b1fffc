//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! --config file (TOML), optional
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → handed to RelayServer at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload
//! - All fields have defaults, so no file means the fixed 3001 → 54323 relay
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, RelayConfig, UpstreamConfig};
pub use validation::ValidationError;
