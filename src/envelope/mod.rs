//! Envelope types exchanged with the remote function.
//!
//! # Data Flow
//! ```text
//! Inbound HTTP request
//!     → request.rs (build Request Envelope, drain body)
//!     → [invoke layer carries it over the wire]
//!     → reply.rs (raw response bytes → Reply Envelope, never fails)
//!     → [http layer translates the Reply Envelope onto the response]
//! ```
//!
//! Envelopes live for one pipeline pass; nothing here is shared across
//! requests.

pub mod reply;
pub mod request;

pub use reply::{
    classify_reply, decode_reply, default_reply_meta, DecodedReply, ReplyEnvelope, ReplyMeta,
    BODY_ENCODING_BASE64, REPLY_ENVELOPE_TYPE,
};
pub use request::{build_envelope, RequestEnvelope, RequestMeta, REQUEST_ENVELOPE_TYPE};
