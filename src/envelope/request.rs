//! Request Envelope: the structured form of an inbound HTTP request.
//!
//! # Responsibilities
//! - Mirror the inbound request exactly: method, path, query, host,
//!   protocol version, headers, full body
//! - Lower-case header names; preserve multi-value order
//! - Read the body to completion (no size cap; the function sees it whole)
//!
//! # Design Decisions
//! - No validation of method, path, or header content: the envelope is a
//!   structural mirror, the remote function decides what it accepts
//! - Header names arrive from hyper already lower-cased, so duplicates that
//!   differed only in case on the wire are a single multi-valued entry in
//!   arrival order; the builder folds case anyway rather than rely on that

use std::collections::HashMap;

use axum::body::Body;
use axum::http::{header, request::Parts, Request, Version};
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, GatewayResult};

/// Discriminant carried by every request envelope.
pub const REQUEST_ENVELOPE_TYPE: &str = "HTTPJSON-REQ";

/// Wire form of an inbound HTTP request, sent as the invocation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Always [`REQUEST_ENVELOPE_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
    pub meta: RequestMeta,
    /// Full request body as text.
    pub body: String,
}

/// Request metadata mirrored from the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestMeta {
    /// HTTP verb.
    pub method: String,
    /// URL path with no query string.
    pub path: String,
    /// Raw query string, no leading `?`.
    pub query: String,
    /// Host as presented by the client, may include a port.
    pub host: String,
    /// HTTP version string, e.g. `HTTP/1.1`.
    pub proto: String,
    /// Lower-cased header name → values in original order.
    pub headers: HashMap<String, Vec<String>>,
}

// http's Debug for Version prints the wire form ("HTTP/1.1").
fn proto_string(version: Version) -> String {
    format!("{version:?}")
}

/// Build a [`RequestEnvelope`] from an inbound request, draining its body.
///
/// Fails only if the body stream cannot be read to completion; the body is
/// consumed on every path.
pub async fn build_envelope(request: Request<Body>) -> GatewayResult<RequestEnvelope> {
    let (parts, body) = request.into_parts();

    // The whole body, unbounded. Known gap: nothing caps adversarially
    // large bodies.
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| GatewayError::BodyRead(e.to_string()))?;
    let body = String::from_utf8_lossy(&bytes).into_owned();

    Ok(RequestEnvelope {
        kind: REQUEST_ENVELOPE_TYPE.to_string(),
        meta: meta_from_parts(&parts),
        body,
    })
}

fn meta_from_parts(parts: &Parts) -> RequestMeta {
    let mut headers: HashMap<String, Vec<String>> = HashMap::new();
    for name in parts.headers.keys() {
        let values = parts
            .headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        headers.insert(name.as_str().to_ascii_lowercase(), values);
    }

    let host = parts
        .headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| parts.uri.authority().map(|a| a.to_string()))
        .unwrap_or_default();

    RequestMeta {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().unwrap_or("").to_string(),
        host,
        proto: proto_string(parts.version),
        headers,
    }
}
