//! Invocation client: one remote call per request, under a deadline.
//!
//! # Responsibilities
//! - Serialize the Request Envelope to its wire JSON form
//! - Perform exactly one invoke per call, no retries
//! - Bound the call with `tokio::time::timeout` so the deadline composes
//!   with ambient cancellation: when the HTTP layer drops the handler
//!   future (client disconnect, server timeout), the in-flight invoke is
//!   dropped with it and the transport is released
//! - Classify the outcome: timeout, transport failure, function-reported
//!   failure, or success
//! - Emit exactly one structured log per invocation attempt

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::envelope::RequestEnvelope;
use crate::error::{GatewayError, GatewayResult};
use crate::invoke::invoker::{FunctionOutput, Invoker};

/// Client for the remote function, shared by all in-flight requests.
pub struct InvocationClient {
    invoker: Arc<dyn Invoker>,
    function: String,
    timeout: Duration,
}

impl InvocationClient {
    /// Create a client for one function. The function name must already be
    /// validated non-empty and the timeout parsed; both happen at startup.
    pub fn new(invoker: Arc<dyn Invoker>, function: String, timeout: Duration) -> Self {
        Self {
            invoker,
            function,
            timeout,
        }
    }

    /// The configured function identifier.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Invoke the function once with the given envelope, returning the raw
    /// response payload on success.
    pub async fn call(&self, envelope: &RequestEnvelope) -> GatewayResult<Vec<u8>> {
        let payload = serde_json::to_vec(envelope)?;

        let start = Instant::now();
        let outcome = tokio::time::timeout(
            self.timeout,
            self.invoker.invoke(&self.function, payload),
        )
        .await;
        let elapsed = start.elapsed();

        match outcome {
            Err(_) => {
                tracing::error!(
                    function = %self.function,
                    duration = ?elapsed,
                    timeout = ?self.timeout,
                    "invocation deadline exceeded"
                );
                Err(GatewayError::InvocationTimeout(self.timeout))
            }
            Ok(Err(e)) => {
                tracing::error!(
                    function = %self.function,
                    duration = ?elapsed,
                    error = %e,
                    "invocation failed"
                );
                Err(GatewayError::InvocationTransport(e.to_string()))
            }
            Ok(Ok(FunctionOutput::Error { kind, payload })) => {
                let message = String::from_utf8_lossy(&payload).into_owned();
                tracing::error!(
                    function = %self.function,
                    duration = ?elapsed,
                    error_kind = %kind,
                    error = %message,
                    "function reported an error"
                );
                Err(GatewayError::FunctionReported { kind, message })
            }
            Ok(Ok(FunctionOutput::Payload(bytes))) => {
                tracing::info!(
                    function = %self.function,
                    duration = ?elapsed,
                    response_bytes = bytes.len(),
                    "invocation completed"
                );
                Ok(bytes.to_vec())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{RequestMeta, REQUEST_ENVELOPE_TYPE};
    use crate::invoke::invoker::InvokeError;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::collections::HashMap;

    fn envelope() -> RequestEnvelope {
        RequestEnvelope {
            kind: REQUEST_ENVELOPE_TYPE.to_string(),
            meta: RequestMeta {
                method: "GET".into(),
                path: "/".into(),
                query: String::new(),
                host: "example.com".into(),
                proto: "HTTP/1.1".into(),
                headers: HashMap::new(),
            },
            body: String::new(),
        }
    }

    struct FixedInvoker(FunctionOutput);

    #[async_trait]
    impl Invoker for FixedInvoker {
        async fn invoke(
            &self,
            _function: &str,
            _payload: Vec<u8>,
        ) -> Result<FunctionOutput, InvokeError> {
            Ok(self.0.clone())
        }
    }

    struct SlowInvoker(Duration);

    #[async_trait]
    impl Invoker for SlowInvoker {
        async fn invoke(
            &self,
            _function: &str,
            _payload: Vec<u8>,
        ) -> Result<FunctionOutput, InvokeError> {
            tokio::time::sleep(self.0).await;
            Ok(FunctionOutput::Payload(Bytes::from_static(b"late")))
        }
    }

    struct EchoPayloadInvoker;

    #[async_trait]
    impl Invoker for EchoPayloadInvoker {
        async fn invoke(
            &self,
            _function: &str,
            payload: Vec<u8>,
        ) -> Result<FunctionOutput, InvokeError> {
            Ok(FunctionOutput::Payload(Bytes::from(payload)))
        }
    }

    #[tokio::test]
    async fn test_success_returns_raw_payload() {
        let client = InvocationClient::new(
            Arc::new(FixedInvoker(FunctionOutput::Payload(Bytes::from_static(
                b"ok",
            )))),
            "fn".into(),
            Duration::from_secs(1),
        );
        assert_eq!(client.call(&envelope()).await.unwrap(), b"ok");
    }

    #[tokio::test]
    async fn test_serialized_envelope_is_the_wire_payload() {
        let client = InvocationClient::new(
            Arc::new(EchoPayloadInvoker),
            "fn".into(),
            Duration::from_secs(1),
        );
        let raw = client.call(&envelope()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value["type"], "HTTPJSON-REQ");
        assert_eq!(value["meta"]["host"], "example.com");
    }

    #[tokio::test]
    async fn test_function_error_carries_remote_message() {
        let client = InvocationClient::new(
            Arc::new(FixedInvoker(FunctionOutput::Error {
                kind: "Unhandled".into(),
                payload: Bytes::from_static(b"stack trace here"),
            })),
            "fn".into(),
            Duration::from_secs(1),
        );
        match client.call(&envelope()).await {
            Err(GatewayError::FunctionReported { kind, message }) => {
                assert_eq!(kind, "Unhandled");
                assert_eq!(message, "stack trace here");
            }
            other => panic!("expected FunctionReported, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_call_is_timeout_not_transport() {
        let client = InvocationClient::new(
            Arc::new(SlowInvoker(Duration::from_secs(5))),
            "fn".into(),
            Duration::from_millis(20),
        );
        match client.call(&envelope()).await {
            Err(GatewayError::InvocationTimeout(after)) => {
                assert_eq!(after, Duration::from_millis(20));
            }
            other => panic!("expected InvocationTimeout, got {other:?}"),
        }
    }

    struct FailingInvoker;

    #[async_trait]
    impl Invoker for FailingInvoker {
        async fn invoke(
            &self,
            _function: &str,
            _payload: Vec<u8>,
        ) -> Result<FunctionOutput, InvokeError> {
            Err(InvokeError::Endpoint("no route to provider".into()))
        }
    }

    #[tokio::test]
    async fn test_invoker_failure_is_transport_error() {
        let client = InvocationClient::new(
            Arc::new(FailingInvoker),
            "fn".into(),
            Duration::from_secs(1),
        );
        match client.call(&envelope()).await {
            Err(GatewayError::InvocationTransport(detail)) => {
                assert!(detail.contains("no route to provider"));
            }
            other => panic!("expected InvocationTransport, got {other:?}"),
        }
    }
}
