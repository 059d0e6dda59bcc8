//! HTTP server setup and the gateway handler.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all gateway handler
//! - Wire up middleware (tracing)
//! - Run the per-request pipeline: build envelope → invoke → decode →
//!   translate
//! - Surface pipeline failures as generic error responses; the protocol
//!   core never chooses an HTTP status for its own errors
//!
//! Each request runs the pipeline independently; the only shared state is
//! the invocation client (and its transport pool underneath).

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::{Request, Response, StatusCode},
    response::IntoResponse,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::config::{ConfigError, GatewayConfig, ValidationError};
use crate::envelope::{build_envelope, decode_reply};
use crate::error::{GatewayError, GatewayResult};
use crate::http::response::{write_reply, ResponseSink};
use crate::invoke::{HttpInvoker, InvocationClient, Invoker};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<InvocationClient>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server around an already-constructed invoker. Fails if the
    /// configured timeout text does not parse; the config should have been
    /// validated first.
    pub fn new(config: GatewayConfig, invoker: Arc<dyn Invoker>) -> Result<Self, ConfigError> {
        let timeout = config
            .function
            .invoke_timeout()
            .map_err(|e| ConfigError::Validation(vec![ValidationError::InvalidTimeout(e)]))?;

        let client = Arc::new(InvocationClient::new(
            invoker,
            config.function.name.clone(),
            timeout,
        ));

        let router = Self::build_router(AppState { client });
        Ok(Self { router, config })
    }

    /// Create a server with the production HTTP invoker from the config's
    /// endpoint.
    pub fn from_config(config: GatewayConfig) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(&config.function.endpoint).map_err(|e| {
            ConfigError::Validation(vec![ValidationError::InvalidEndpoint {
                value: config.function.endpoint.clone(),
                reason: e.to_string(),
            }])
        })?;
        Self::new(config, Arc::new(HttpInvoker::new(endpoint)))
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            // The protocol reads request bodies whole, with no cap.
            .layer(DefaultBodyLimit::disable())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            function = %self.config.function.name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Gateway handler: one pipeline pass per request.
async fn gateway_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response<Body> {
    match run_pipeline(&state, request).await {
        Ok(response) => response,
        Err(err) => failure_response(err),
    }
}

/// The straight pipeline: envelope → invocation → decode → translate.
///
/// Dropping this future (client disconnect) cancels an in-flight invocation
/// along with it.
async fn run_pipeline(state: &AppState, request: Request<Body>) -> GatewayResult<Response<Body>> {
    let envelope = build_envelope(request).await?;
    let raw = state.client.call(&envelope).await?;
    let reply = decode_reply(&raw);

    let mut sink = ResponseSink::new();
    write_reply(reply, &mut sink)?;
    Ok(sink.into_response())
}

/// Map a pipeline failure to a generic error response.
///
/// Invocation outcomes were already logged by the client, once per attempt;
/// everything else gets its one error log here.
fn failure_response(err: GatewayError) -> Response<Body> {
    let status = match &err {
        GatewayError::InvocationTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        GatewayError::InvocationTransport(_) | GatewayError::FunctionReported { .. } => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    match &err {
        GatewayError::InvocationTimeout(_)
        | GatewayError::InvocationTransport(_)
        | GatewayError::FunctionReported { .. } => {
            tracing::debug!(error = %err, status = %status, "invocation failure surfaced");
        }
        _ => {
            tracing::error!(error = %err, status = %status, "request pipeline failed");
        }
    }

    (status, "function gateway error").into_response()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
