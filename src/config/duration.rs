//! Duration text parsing.
//!
//! Timeouts are written in the config as duration strings like `"10s"`,
//! `"500ms"`, or `"1m30s"`: one or more `<number><unit>` segments, where the
//! number may be fractional and the unit is one of `ns`, `us`, `ms`, `s`,
//! `m`, `h`. Parsed once at startup; malformed text is a configuration
//! error, never a per-request one.

use std::time::Duration;

use thiserror::Error;

/// Error produced when duration text cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid duration {input:?}: {reason}")]
pub struct DurationParseError {
    pub input: String,
    pub reason: String,
}

impl DurationParseError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

fn unit_nanos(unit: &str) -> Option<f64> {
    match unit {
        "ns" => Some(1.0),
        "us" => Some(1_000.0),
        "ms" => Some(1_000_000.0),
        "s" => Some(1_000_000_000.0),
        "m" => Some(60.0 * 1_000_000_000.0),
        "h" => Some(3600.0 * 1_000_000_000.0),
        _ => None,
    }
}

/// Parse duration text into a [`Duration`].
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    if input.is_empty() {
        return Err(DurationParseError::new(input, "empty string"));
    }

    let mut total_nanos = 0.0f64;
    let mut rest = input;
    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(digits_end);
        let value: f64 = number
            .parse()
            .map_err(|_| DurationParseError::new(input, "expected a number"))?;

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        let scale = unit_nanos(unit).ok_or_else(|| {
            DurationParseError::new(input, format!("unknown unit {unit:?}"))
        })?;

        total_nanos += value * scale;
        rest = tail;
    }

    Ok(Duration::from_nanos(total_nanos as u64))
}
