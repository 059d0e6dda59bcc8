//! Response translation: applying a Reply Envelope to the outgoing
//! HTTP response.
//!
//! # Responsibilities
//! - Write reply headers additively, then default content-type and status
//! - Decode base64 bodies before anything is committed to the wire
//! - Swallow body-write failures once an error status (>= 400) has been
//!   chosen; the error status is the primary signal and has already gone
//!   out, so the write failure is secondary noise
//!
//! The suppression rule is an explicit conditional here on purpose: it is
//! part of the protocol contract, not a logging accident.

use std::io;

use axum::body::Body;
use axum::http::{header::HeaderName, HeaderMap, HeaderValue, Response, StatusCode};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::envelope::{default_reply_meta, ReplyEnvelope, BODY_ENCODING_BASE64};
use crate::error::{GatewayError, GatewayResult};

/// Write target for a translated reply.
///
/// The production implementation is [`ResponseSink`]; tests use sinks with
/// injected write failures to pin down the suppression rule.
pub trait ReplySink {
    /// Append one header value; existing values for the name are kept.
    fn append_header(&mut self, name: &str, value: &str) -> io::Result<()>;

    /// Commit the status line.
    fn write_status(&mut self, status: u16) -> io::Result<()>;

    /// Write the response body bytes.
    fn write_body(&mut self, body: &[u8]) -> io::Result<()>;
}

/// Apply a decoded Reply Envelope onto a sink.
///
/// Headers first (additively), then content-type and status defaulting,
/// then the body. The base64 decode is validated before the status line is
/// committed, so a bad body aborts with nothing written.
pub fn write_reply(reply: ReplyEnvelope, sink: &mut dyn ReplySink) -> GatewayResult<()> {
    let meta = reply.meta.unwrap_or_else(default_reply_meta);

    let mut has_content_type = false;
    for (name, values) in &meta.headers {
        for value in values {
            sink.append_header(name, value)
                .map_err(|e| GatewayError::ResponseWrite(e.to_string()))?;
        }
        if name.eq_ignore_ascii_case("content-type") {
            has_content_type = true;
        }
    }
    if !has_content_type {
        sink.append_header("content-type", "application/json")
            .map_err(|e| GatewayError::ResponseWrite(e.to_string()))?;
    }

    let status = if meta.status <= 0 {
        200
    } else {
        u16::try_from(meta.status)
            .map_err(|_| GatewayError::ResponseWrite(format!("invalid status {}", meta.status)))?
    };

    // Decode before the status is committed: a malformed body must abort
    // the call with no body bytes emitted.
    let body = if reply.body_encoding == BODY_ENCODING_BASE64 && !reply.body.is_empty() {
        BASE64.decode(reply.body.as_bytes())?
    } else {
        reply.body.into_bytes()
    };

    sink.write_status(status)
        .map_err(|e| GatewayError::ResponseWrite(e.to_string()))?;

    if let Err(e) = sink.write_body(&body) {
        // Once an error status has gone out, a failed body write is
        // deliberately not reported back to the caller.
        if status >= 400 {
            return Ok(());
        }
        return Err(GatewayError::ResponseWrite(e.to_string()));
    }

    Ok(())
}

/// [`ReplySink`] that assembles the outgoing axum response.
#[derive(Debug, Default)]
pub struct ResponseSink {
    headers: HeaderMap,
    status: StatusCode,
    body: Vec<u8>,
}

impl ResponseSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the sink into the response to hand back to axum.
    pub fn into_response(self) -> Response<Body> {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl ReplySink for ResponseSink {
    fn append_header(&mut self, name: &str, value: &str) -> io::Result<()> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.headers.append(name, value);
        Ok(())
    }

    fn write_status(&mut self, status: u16) -> io::Result<()> {
        self.status = StatusCode::from_u16(status)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        Ok(())
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        self.body.extend_from_slice(body);
        Ok(())
    }
}
