//! Conversion response classification
//!
//! Turns a raw HTTP status and body into a [`ConversionResult`]. The body is
//! always handled as text first so malformed payloads can still be reported.

use crate::core::error::ConversionError;
use serde_json::Value;

/// Longest body fragment carried in [`ConversionError::InvalidResponse`]
pub const MAX_RAW_FRAGMENT: usize = 200;

/// Message used when a business error carries no `msg`
pub const UNKNOWN_ERROR_MSG: &str = "unknown error";

/// HTML returned by a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedHtml(String);

impl ConvertedHtml {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ConvertedHtml {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one conversion attempt
pub type ConversionResult = Result<ConvertedHtml, ConversionError>;

/// Classify a received HTTP response
///
/// Order of checks:
/// 1. status >= 400 → [`ConversionError::Http`], with `msg`/`code` from the body when it parses
/// 2. body is not JSON, or not an object → [`ConversionError::InvalidResponse`]
/// 3. `code != 0` → [`ConversionError::Business`]
/// 4. no `data.html` string → [`ConversionError::MissingPayload`]
pub fn classify_response(status: u16, body: &str) -> ConversionResult {
    if status >= 400 {
        return Err(ConversionError::Http {
            status,
            message: error_message(body),
        });
    }

    let parsed: Value = serde_json::from_str(body).map_err(|_| invalid(body))?;
    let Value::Object(envelope) = parsed else {
        return Err(invalid(body));
    };

    let code = envelope.get("code").and_then(Value::as_i64);
    if code != Some(0) {
        let msg = envelope
            .get("msg")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(UNKNOWN_ERROR_MSG)
            .to_string();
        // A missing or non-integer code is reported as -1
        return Err(ConversionError::Business {
            code: code.unwrap_or(-1),
            msg,
        });
    }

    envelope
        .get("data")
        .and_then(|data| data.get("html"))
        .and_then(Value::as_str)
        .filter(|html| !html.is_empty())
        .map(ConvertedHtml::new)
        .ok_or(ConversionError::MissingPayload)
}

/// Extract `msg`/`code` from an error body, if it is a JSON object
fn error_message(body: &str) -> Option<String> {
    let Ok(Value::Object(envelope)) = serde_json::from_str::<Value>(body) else {
        return None;
    };

    let msg = envelope
        .get("msg")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty());
    let code = envelope.get("code").and_then(Value::as_i64);

    match (msg, code) {
        (Some(msg), Some(code)) => Some(format!("{} (code {})", msg, code)),
        (Some(msg), None) => Some(msg.to_string()),
        (None, Some(code)) => Some(format!("code {}", code)),
        (None, None) => None,
    }
}

fn invalid(body: &str) -> ConversionError {
    ConversionError::InvalidResponse {
        raw_fragment: raw_fragment(body),
    }
}

/// Leading part of a body, cut on a character boundary
pub fn raw_fragment(body: &str) -> String {
    let body = body.trim();
    if body.len() <= MAX_RAW_FRAGMENT {
        return body.to_string();
    }
    let mut end = MAX_RAW_FRAGMENT;
    while end > 0 && !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
