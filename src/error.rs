//! Per-request error taxonomy for the gateway pipeline.
//!
//! Configuration problems are not represented here; they are caught once at
//! startup by [`crate::config`] and keep the handler from coming online at
//! all. Every variant below is scoped to a single request.

use std::time::Duration;

use thiserror::Error;

/// Errors that can abort a single request's trip through the pipeline.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The inbound request body could not be drained to completion.
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// The request envelope could not be encoded to its wire JSON form.
    #[error("failed to encode request envelope: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The per-call deadline expired before the remote call completed.
    /// Kept distinct from [`GatewayError::InvocationTransport`] so operators
    /// can tell "didn't respond in time" from "could not reach provider".
    #[error("invocation timed out after {0:?}")]
    InvocationTimeout(Duration),

    /// The remote call could not complete for any reason other than the
    /// deadline: network failure, provider-side fault, bad endpoint.
    #[error("invocation transport error: {0}")]
    InvocationTransport(String),

    /// The remote call completed, but the provider reports that the function
    /// itself raised an error. `kind` is the provider's error marker,
    /// `message` the remote error's string representation.
    #[error("function error: {kind}: {message}")]
    FunctionReported { kind: String, message: String },

    /// The reply declared `bodyEncoding: "base64"` but its body is not
    /// valid base64.
    #[error("invalid base64 reply body: {0}")]
    ReplyDecode(#[from] base64::DecodeError),

    /// Writing the translated response failed. Suppressed by the translator
    /// when the chosen status is an error status (>= 400).
    #[error("failed to write response: {0}")]
    ResponseWrite(String),
}

/// Result type for the gateway pipeline.
pub type GatewayResult<T> = Result<T, GatewayError>;
