//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! gateway.toml
//!     → loader.rs (read + deserialize)
//!     → validation.rs (semantic checks, all errors reported)
//!     → schema.rs types consumed by the rest of the system
//! ```
//!
//! # Design Decisions
//! - Defaults for everything except the function name, which is required
//! - Timeout is kept as text in the schema and parsed once at startup
//! - Configuration problems are fatal at startup, never per-request

pub mod duration;
pub mod loader;
pub mod schema;
pub mod validation;

use std::time::Duration;

pub use duration::parse_duration;
pub use loader::{load_config, ConfigError};
pub use schema::{FunctionConfig, GatewayConfig, ListenerConfig, ObservabilityConfig};
pub use validation::{validate_config, ValidationError};

/// Default per-call invocation timeout, used when the config leaves the
/// timeout text empty.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

impl FunctionConfig {
    /// Resolve the configured timeout text to a [`Duration`].
    ///
    /// Call after [`validate_config`]; on a validated config this cannot
    /// fail.
    pub fn invoke_timeout(&self) -> Result<Duration, duration::DurationParseError> {
        if self.timeout.is_empty() {
            return Ok(DEFAULT_TIMEOUT);
        }
        parse_duration(&self.timeout)
    }
}
