//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;

use axum::body::{Body, Bytes};
use axum::http::{HeaderValue, Response};
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;

/// What the mock function returns for one invocation.
pub struct FunctionReply {
    /// When set, reported as a function error via `X-Amz-Function-Error`.
    pub function_error: Option<String>,
    /// Raw response payload bytes.
    pub payload: Vec<u8>,
}

impl FunctionReply {
    pub fn payload(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            function_error: None,
            payload: bytes.into(),
        }
    }

    pub fn error(kind: &str, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            function_error: Some(kind.to_string()),
            payload: payload.into(),
        }
    }
}

/// Start a programmable mock compute endpoint speaking the invoke REST
/// surface. The closure receives each invocation payload.
pub async fn start_mock_function<F, Fut>(addr: SocketAddr, f: F)
where
    F: Fn(Bytes) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = FunctionReply> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();

    let app = Router::new().route(
        "/2015-03-31/functions/{name}/invocations",
        post(move |body: Bytes| {
            let f = f.clone();
            async move {
                let reply = f(body).await;
                let mut response = Response::new(Body::from(reply.payload));
                if let Some(kind) = reply.function_error {
                    response
                        .headers_mut()
                        .insert("x-amz-function-error", HeaderValue::from_str(&kind).unwrap());
                }
                response
            }
        }),
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}
