//! The invoke boundary: how the gateway reaches the compute provider.
//!
//! [`Invoker`] is the narrow seam the protocol core consumes. The provider
//! implementation owns authentication and connection setup; the core only
//! ever calls `invoke` with a function identifier and a payload.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use url::Url;

/// Response header carrying the provider's function-error marker.
const FUNCTION_ERROR_HEADER: &str = "x-amz-function-error";

/// What a completed invoke call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionOutput {
    /// The function completed; these are its raw response bytes.
    Payload(Bytes),
    /// The function's own execution raised an error. `kind` is the
    /// provider's marker (e.g. `Unhandled`), `payload` describes the error.
    Error { kind: String, payload: Bytes },
}

/// Failure to complete an invoke call at all.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The endpoint and function name do not combine into a request URL.
    #[error("invalid invoke URL: {0}")]
    Endpoint(String),

    /// The HTTP round trip to the provider failed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// A synchronous "invoke function by identifier" operation.
///
/// Implementations must be safe for concurrent use by many in-flight
/// requests; the gateway shares one invoker across its handlers. The
/// returned future must abort the underlying call promptly when dropped,
/// which is how the per-call deadline and client disconnects cancel it.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(&self, function: &str, payload: Vec<u8>) -> Result<FunctionOutput, InvokeError>;
}

/// Invoker speaking the Lambda-style synchronous invoke REST surface:
/// `POST {endpoint}/2015-03-31/functions/{name}/invocations`, with a
/// function-reported error signalled by the `X-Amz-Function-Error` response
/// header. Local emulators expose the same surface.
pub struct HttpInvoker {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpInvoker {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Invoker for HttpInvoker {
    async fn invoke(&self, function: &str, payload: Vec<u8>) -> Result<FunctionOutput, InvokeError> {
        let url = self
            .endpoint
            .join(&format!("2015-03-31/functions/{function}/invocations"))
            .map_err(|e| InvokeError::Endpoint(e.to_string()))?;

        let response = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .body(payload)
            .send()
            .await?;

        let kind = response
            .headers()
            .get(FUNCTION_ERROR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let payload = response.bytes().await?;
        match kind {
            Some(kind) => Ok(FunctionOutput::Error { kind, payload }),
            None => Ok(FunctionOutput::Payload(payload)),
        }
    }
}
