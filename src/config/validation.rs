//! Configuration validation.
//!
//! Semantic validation on top of what serde already guarantees
//! syntactically. Runs once, before the config is accepted into the system;
//! a config that fails here never brings the handler online. Returns all
//! validation errors, not just the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::duration::{parse_duration, DurationParseError};
use crate::config::schema::GatewayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// No function name configured. The gateway has nothing to invoke.
    #[error("function.name is required and must be non-empty")]
    MissingFunctionName,

    /// The timeout text does not parse as a duration.
    #[error("function.timeout: {0}")]
    InvalidTimeout(DurationParseError),

    /// The invoke endpoint is not a valid URL.
    #[error("function.endpoint {value:?} is not a valid URL: {reason}")]
    InvalidEndpoint { value: String, reason: String },

    /// The listener bind address does not parse as a socket address.
    #[error("listener.bind_address {value:?} is not a valid socket address")]
    InvalidBindAddress { value: String },
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.function.name.is_empty() {
        errors.push(ValidationError::MissingFunctionName);
    }

    // Empty timeout text means "use the default"; anything else must parse.
    if !config.function.timeout.is_empty() {
        if let Err(e) = parse_duration(&config.function.timeout) {
            errors.push(ValidationError::InvalidTimeout(e));
        }
    }

    if let Err(e) = Url::parse(&config.function.endpoint) {
        errors.push(ValidationError::InvalidEndpoint {
            value: config.function.endpoint.clone(),
            reason: e.to_string(),
        });
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            value: config.listener.bind_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
