//! HTTP → remote-function gateway.
//!
//! Converts each inbound HTTP request into a synchronous call to a remote,
//! stateless compute function and converts the function's reply back into
//! the HTTP response.
//!
//! # Architecture Overview
//!
//! ```text
//!  Client Request                  ┌──────────────────────────────────┐
//!  ───────────────────────────────▶│ http::server (Axum handler)      │
//!                                  │   envelope::request  build       │
//!                                  │   invoke::client     round trip ─┼──▶ compute
//!                                  │   envelope::reply    decode      │◀── provider
//!  Client Response                 │   http::response     translate   │
//!  ◀───────────────────────────────┤                                  │
//!                                  └──────────────────────────────────┘
//!
//!  Cross-cutting: config (toml, validated at startup),
//!                 observability (tracing), error (per-request taxonomy)
//! ```
//!
//! A function may reply with a structured Reply Envelope to control status,
//! headers, and body, or with any opaque payload, which is served verbatim
//! with default metadata.

pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod invoke;
pub mod observability;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use http::HttpServer;
