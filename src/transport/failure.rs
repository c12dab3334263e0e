//! Failure message composition for non-success responses.
//!
//! The service answers errors with `{"error": "..."}` bodies, but proxies and
//! crashed handlers may send plain text or nothing at all. This module folds
//! all of those into one display string starting with the status line.

use reqwest::StatusCode;
use serde_json::Value;

use crate::domain::CatalogError;

/// Builds the transport failure for a non-success response.
pub fn failure_from_status(status: StatusCode, body: &[u8]) -> CatalogError {
    CatalogError::transport(Some(status.as_u16()), compose_failure_message(status, body))
}

/// Composes `"<status> <reason>[: <detail>]"` for a non-success response.
///
/// The detail is the JSON body's `error` field when the body is JSON, and the
/// trimmed body text otherwise (invalid UTF-8 is replaced, not dropped). A JSON
/// body whose `error` field is missing, `null`, `false`, `0`, or `""`
/// contributes nothing.
///
/// # Examples
///
/// ```
/// use bookshelf::transport::compose_failure_message;
/// use reqwest::StatusCode;
///
/// let message = compose_failure_message(StatusCode::NOT_FOUND, br#"{"error":"not found"}"#);
/// assert_eq!(message, "404 Not Found: not found");
/// ```
#[must_use]
pub fn compose_failure_message(status: StatusCode, body: &[u8]) -> String {
    let status_line = status_line(status);

    let detail = match serde_json::from_slice::<Value>(body) {
        Ok(json) => json.get("error").and_then(error_field_text),
        Err(_) => body_text(body),
    };

    match detail {
        Some(detail) => format!("{status_line}: {detail}"),
        None => status_line,
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

fn error_field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn body_text(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}
