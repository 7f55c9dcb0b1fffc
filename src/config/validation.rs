//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the bind address and upstream base URL are usable
//! - Validate value ranges (timeout > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Bind address is not a socket address.
    #[error("invalid bind address {0:?}")]
    BindAddress(String),

    /// Upstream base URL does not parse.
    #[error("invalid upstream base URL {url:?}: {reason}")]
    UpstreamUrl { url: String, reason: String },

    /// Only plain HTTP upstreams are supported.
    #[error("unsupported upstream scheme {0:?} (expected \"http\")")]
    UpstreamScheme(String),

    /// Base URL carries a query or fragment, which would corrupt appended paths.
    #[error("upstream base URL must not contain a query or fragment")]
    UpstreamSuffix,

    /// A zero timeout would fail every request.
    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) => {
            if url.scheme() != "http" {
                errors.push(ValidationError::UpstreamScheme(url.scheme().to_string()));
            }
            if url.host_str().is_none() {
                errors.push(ValidationError::UpstreamUrl {
                    url: config.upstream.base_url.clone(),
                    reason: "missing host".to_string(),
                });
            }
            if url.query().is_some() || url.fragment().is_some() {
                errors.push(ValidationError::UpstreamSuffix);
            }
        }
        Err(e) => errors.push(ValidationError::UpstreamUrl {
            url: config.upstream.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RelayConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.base_url = "https://example.com/?x=1".into();
        config.upstream.timeout_secs = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("not-an-address".into()),
                ValidationError::UpstreamScheme("https".into()),
                ValidationError::UpstreamSuffix,
                ValidationError::ZeroTimeout,
            ]
        );
    }

    #[test]
    fn test_unparseable_upstream() {
        let mut config = RelayConfig::default();
        config.upstream.base_url = "localhost without scheme".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::UpstreamUrl { .. }));
    }

    #[test]
    fn test_base_url_with_path_prefix_is_allowed() {
        let mut config = RelayConfig::default();
        config.upstream.base_url = "http://127.0.0.1:8000/api".into();
        assert!(validate_config(&config).is_ok());
    }
}
