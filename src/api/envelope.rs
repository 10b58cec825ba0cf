// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::Value;

/// Strip the `{success, message, code, data}` wrapper. Bodies without a
/// boolean `success` are bare payloads and pass through untouched.
/// `Err` carries the user-facing message of a `success: false` body.
pub fn unwrap_envelope(body: Value) -> Result<Value, Option<String>> {
    let success = body.get("success").and_then(Value::as_bool);
    match success {
        Some(true) => Ok(match body {
            Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
            other => other,
        }),
        Some(false) => Err(error_message(&body)),
        None => Ok(body),
    }
}

/// Build "Validation failed (amount: must be positive; name: required)"
/// from an error body. `None` when the body says nothing useful.
pub fn error_message(body: &Value) -> Option<String> {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| body.pointer("/error/message").and_then(Value::as_str))
        .or_else(|| body.get("error").and_then(Value::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty());

    let details = body
        .pointer("/error/details")
        .or_else(|| body.get("details"))
        .and_then(Value::as_array);
    let parts: Vec<String> = details
        .map(|items| items.iter().filter_map(detail_text).collect())
        .unwrap_or_default();

    match (message, parts.is_empty()) {
        (Some(m), true) => Some(m.to_string()),
        (Some(m), false) => Some(format!("{} ({})", m, parts.join("; "))),
        (None, false) => Some(parts.join("; ")),
        (None, true) => None,
    }
}

fn detail_text(detail: &Value) -> Option<String> {
    let msg = detail
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())?;
    let path = match detail.get("path") {
        Some(Value::Array(segments)) => segments
            .iter()
            .filter_map(|s| match s {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("."),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    if path.is_empty() {
        Some(msg.to_string())
    } else {
        Some(format!("{}: {}", path, msg))
    }
}

pub fn fallback_message(status: u16) -> String {
    format!("Request failed with status {}", status)
}
