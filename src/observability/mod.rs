//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate
//! - Every invocation attempt produces exactly one log entry with the
//!   function identifier and wall-clock latency (see `invoke::client`)
//! - Log level configurable via config and `RUST_LOG`

pub mod logging;

pub use logging::init_logging;
