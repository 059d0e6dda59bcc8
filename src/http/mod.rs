//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, gateway handler, pipeline)
//!     → [envelope + invoke layers do the round trip]
//!     → response.rs (Reply Envelope → status/headers/body)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use response::{write_reply, ReplySink, ResponseSink};
pub use server::HttpServer;
