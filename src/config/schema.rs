//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Remote function the gateway invokes.
    pub function: FunctionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Remote function configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FunctionConfig {
    /// Name or ARN of the function to invoke. Required.
    pub name: String,

    /// Base URL of the compute provider's invoke endpoint.
    pub endpoint: String,

    /// Per-call timeout as duration text (e.g., "10s", "500ms").
    /// Empty means the 10s default.
    pub timeout: String,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            endpoint: "http://127.0.0.1:9001".to_string(),
            timeout: "10s".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.function.timeout, "10s");
        assert!(config.function.name.is_empty());
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_partial_toml() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [function]
            name = "resize-images"
            "#,
        )
        .unwrap();
        assert_eq!(config.function.name, "resize-images");
        assert_eq!(config.function.timeout, "10s");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
