//! Remote invocation subsystem.
//!
//! # Data Flow
//! ```text
//! Request Envelope
//!     → client.rs (serialize, deadline, classify outcome, log once)
//!     → invoker.rs (provider seam: HTTP invoke call)
//!     → raw response bytes back to the pipeline
//! ```
//!
//! # Design Decisions
//! - One invocation per request, no retries; retrying is a caller decision
//! - Timeout expiry is a distinct error from transport failure
//! - The invoker is a trait object so tests and other providers can plug in

pub mod client;
pub mod invoker;

pub use client::InvocationClient;
pub use invoker::{FunctionOutput, HttpInvoker, InvokeError, Invoker};
