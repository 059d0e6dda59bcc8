//! Reply Envelope: the structured form of a function response, and the
//! decoder that turns raw invocation bytes into one.
//!
//! The decoder never fails. A function may return a full Reply Envelope to
//! control status, headers, and body, or any opaque payload at all; opaque
//! payloads become the body of a synthesized envelope with default metadata.
//! This is what lets function authors ignore the envelope schema entirely.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Discriminant a reply must carry to be treated as structured.
pub const REPLY_ENVELOPE_TYPE: &str = "HTTPJSON-REP";

/// Body encoding marker for base64-encoded reply bodies.
pub const BODY_ENCODING_BASE64: &str = "base64";

/// Wire form of a function reply.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyEnvelope {
    /// Must equal [`REPLY_ENVELOPE_TYPE`] for the reply to be structured.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ReplyMeta>,
    /// Text payload, possibly base64-encoded.
    pub body: String,
    /// Either empty (body is literal text) or [`BODY_ENCODING_BASE64`].
    #[serde(rename = "bodyEncoding")]
    pub body_encoding: String,
}

/// Reply metadata: the status and headers the function wants on the
/// HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyMeta {
    /// HTTP status code; values <= 0 are defaulted to 200 by the translator.
    pub status: i32,
    /// Header name → values, written additively onto the response.
    pub headers: HashMap<String, Vec<String>>,
}

// Zero values, not the process-wide default: a partial `meta` on the wire
// keeps its absent fields empty and the translator does the defaulting.
impl Default for ReplyMeta {
    fn default() -> Self {
        Self {
            status: 0,
            headers: HashMap::new(),
        }
    }
}

/// The process-wide default reply metadata: status 200, content-type
/// application/json.
///
/// Built fresh on every call so no envelope ever aliases a shared value a
/// caller could observe being mutated.
pub fn default_reply_meta() -> ReplyMeta {
    ReplyMeta {
        status: 200,
        headers: HashMap::from([(
            "content-type".to_string(),
            vec!["application/json".to_string()],
        )]),
    }
}

/// Classification of raw invocation bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedReply {
    /// The bytes parsed as a Reply Envelope with the right discriminant.
    Structured(ReplyEnvelope),
    /// Anything else: the bytes are an opaque body, reinterpreted as text.
    Raw(String),
}

/// Classify raw response bytes as structured or opaque.
///
/// Structured requires: non-empty, first byte `{`, valid JSON for the
/// envelope shape, and `type` equal to [`REPLY_ENVELOPE_TYPE`]. Everything
/// else is opaque, including valid JSON objects with the wrong tag.
pub fn classify_reply(raw: &[u8]) -> DecodedReply {
    if raw.first() == Some(&b'{') {
        if let Ok(envelope) = serde_json::from_slice::<ReplyEnvelope>(raw) {
            if envelope.kind == REPLY_ENVELOPE_TYPE {
                return DecodedReply::Structured(envelope);
            }
        }
    }
    DecodedReply::Raw(String::from_utf8_lossy(raw).into_owned())
}

/// Decode raw invocation bytes into a Reply Envelope. Never fails.
///
/// Structured replies keep what they specify, with absent `meta` replaced
/// by [`default_reply_meta`]; opaque payloads become the body of a
/// synthesized envelope.
pub fn decode_reply(raw: &[u8]) -> ReplyEnvelope {
    match classify_reply(raw) {
        DecodedReply::Structured(mut envelope) => {
            if envelope.meta.is_none() {
                envelope.meta = Some(default_reply_meta());
            }
            envelope
        }
        DecodedReply::Raw(body) => ReplyEnvelope {
            kind: REPLY_ENVELOPE_TYPE.to_string(),
            meta: Some(default_reply_meta()),
            body,
            body_encoding: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_default_meta(meta: &ReplyMeta) {
        assert_eq!(meta.status, 200);
        assert_eq!(meta.headers["content-type"], vec!["application/json"]);
    }

    #[test]
    fn test_plain_text_falls_back_to_raw() {
        let reply = decode_reply(b"plain text");
        assert_eq!(reply.kind, REPLY_ENVELOPE_TYPE);
        assert_default_meta(reply.meta.as_ref().unwrap());
        assert_eq!(reply.body, "plain text");
        assert_eq!(reply.body_encoding, "");
    }

    #[test]
    fn test_empty_payload_falls_back_to_raw() {
        let reply = decode_reply(b"");
        assert_default_meta(reply.meta.as_ref().unwrap());
        assert_eq!(reply.body, "");
    }

    #[test]
    fn test_structured_without_meta_gets_default() {
        let reply = decode_reply(br#"{"type":"HTTPJSON-REP","body":"X"}"#);
        assert_eq!(reply.body, "X");
        assert_default_meta(reply.meta.as_ref().unwrap());
    }

    #[test]
    fn test_wrong_type_tag_is_opaque() {
        let raw = br#"{"foo":"bar"}"#;
        let reply = decode_reply(raw);
        assert_eq!(reply.body, r#"{"foo":"bar"}"#);
        assert_default_meta(reply.meta.as_ref().unwrap());
    }

    #[test]
    fn test_malformed_json_is_opaque() {
        let raw = br#"{"type":"HTTPJSON-REP","#;
        let reply = decode_reply(raw);
        assert_eq!(reply.body, String::from_utf8_lossy(raw));
    }

    #[test]
    fn test_structured_keeps_its_meta() {
        let reply = decode_reply(
            br#"{"type":"HTTPJSON-REP","meta":{"status":404,"headers":{"x-custom":["v"]}},"body":"not found"}"#,
        );
        let meta = reply.meta.unwrap();
        assert_eq!(meta.status, 404);
        assert_eq!(meta.headers["x-custom"], vec!["v"]);
        assert_eq!(reply.body, "not found");
    }

    #[test]
    fn test_partial_meta_keeps_absent_fields_empty() {
        let reply = decode_reply(br#"{"type":"HTTPJSON-REP","meta":{"status":404},"body":"x"}"#);
        let meta = reply.meta.unwrap();
        assert_eq!(meta.status, 404);
        assert!(meta.headers.is_empty());
    }

    #[test]
    fn test_decode_reencode_is_lossless() {
        let raw = br#"{"type":"HTTPJSON-REP","meta":{"status":201,"headers":{"x-a":["1","2"]}},"body":"QUJD","bodyEncoding":"base64"}"#;
        let reply = decode_reply(raw);
        let reencoded = serde_json::to_vec(&reply).unwrap();
        let again = decode_reply(&reencoded);
        assert_eq!(reply, again);
    }
}
