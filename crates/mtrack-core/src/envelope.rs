//! Backend response envelope
//!
//! The inspection backend answers `{success: true, data: ...}` on success
//! and `{success: false, error|message: "..."}` (or a bare `{error}`) on
//! failure. Some endpoints skip the envelope entirely.
use serde_json::Value;

use crate::error::MtrackError;

/// Strip the envelope, turning a reported failure into an upstream error.
/// Payloads without an envelope pass through unchanged.
pub fn unwrap_envelope(value: Value) -> Result<Value, MtrackError> {
    let Value::Object(mut map) = value else {
        return Ok(value);
    };

    match map.get("success") {
        Some(Value::Bool(true)) => Ok(map.remove("data").unwrap_or(Value::Null)),
        Some(_) => Err(MtrackError::UpstreamError(failure_message(&map))),
        None if map.contains_key("error") && !map.contains_key("data") => {
            Err(MtrackError::UpstreamError(failure_message(&map)))
        }
        None => Ok(Value::Object(map)),
    }
}

fn failure_message(map: &serde_json::Map<String, Value>) -> String {
    ["error", "message"]
        .iter()
        .filter_map(|key| map.get(*key))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Object(inner) => inner
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
        .unwrap_or_else(|| "backend request failed".to_string())
}
