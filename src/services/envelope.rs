//! Response Envelopes
//!
//! The backend wraps payloads inconsistently: `{success, data}`, doubly
//! nested `data`, paginated `items`/`results`/`rows`/`docs`, or a list under
//! a resource-named key. These helpers peel the wrappers off and turn
//! failures into [`ApiError`].

use crate::error::ApiError;
use serde_json::Value;

/// Keys that hold a list inside a paginated envelope
const LIST_KEYS: [&str; 5] = ["items", "results", "rows", "docs", "records"];

/// Metadata keys that never hold the payload itself
const META_KEYS: [&str; 9] = [
    "success", "message", "status", "total", "count", "page", "limit", "pages", "meta",
];

/// Whether the envelope explicitly reports failure
pub fn reports_failure(body: &Value) -> bool {
    matches!(body.get("success"), Some(Value::Bool(false)))
}

fn is_wrapper(map: &serde_json::Map<String, Value>) -> bool {
    map.contains_key("data") && !map.contains_key("id") && !map.contains_key("_id")
}

/// Strip `data` wrappers until the payload is reached
pub fn unwrap_data(body: Value) -> Value {
    let mut current = body;
    loop {
        match current {
            Value::Object(mut map) if is_wrapper(&map) => {
                let inner = map.remove("data").unwrap_or(Value::Null);
                if inner.is_null() {
                    return Value::Null;
                }
                current = inner;
            }
            other => return other,
        }
    }
}

/// Extract a list payload
///
/// `resource_keys` are the camelCase names the backend may use for the list,
/// e.g. `["ratePlans", "plans"]`.
pub fn unwrap_list(body: Value, resource_keys: &[&str]) -> Value {
    let payload = unwrap_data(body);
    match payload {
        Value::Array(_) => payload,
        Value::Object(mut map) => {
            for key in LIST_KEYS.iter().chain(resource_keys.iter()) {
                if let Some(inner) = map.remove(*key) {
                    return match inner {
                        Value::Array(_) => inner,
                        nested @ Value::Object(_) => unwrap_list(nested, resource_keys),
                        _ => Value::Array(Vec::new()),
                    };
                }
            }
            // A single remaining array-valued key is the list
            let mut arrays = map
                .into_iter()
                .filter(|(key, value)| value.is_array() && !META_KEYS.contains(&key.as_str()));
            match (arrays.next(), arrays.next()) {
                (Some((_, list)), None) => list,
                _ => Value::Array(Vec::new()),
            }
        }
        _ => Value::Array(Vec::new()),
    }
}

/// Extract a single-entity payload, also peeling a resource-named key
/// (`{data: {ratePlan: {...}}}`)
pub fn unwrap_entity(body: Value, resource_keys: &[&str]) -> Value {
    let payload = unwrap_data(body);
    if let Value::Object(map) = &payload {
        for key in resource_keys {
            if let Some(inner @ Value::Object(_)) = map.get(*key) {
                if !map.contains_key("id") && !map.contains_key("_id") {
                    return inner.clone();
                }
            }
        }
    }
    payload
}

/// Best message from a server payload
///
/// Priority: `message`, `error` (string or `{message}`), first of
/// `errors[]` (string or `{msg|message}`). Nested `data` is searched too.
pub fn extract_message(payload: &Value) -> Option<String> {
    let text = |v: &Value| v.as_str().map(str::trim).filter(|s| !s.is_empty()).map(String::from);

    if let Some(message) = payload.get("message").and_then(text) {
        return Some(message);
    }
    match payload.get("error") {
        Some(v @ Value::String(_)) => {
            if let Some(message) = text(v) {
                return Some(message);
            }
        }
        Some(Value::Object(err)) => {
            if let Some(message) = err.get("message").and_then(text) {
                return Some(message);
            }
        }
        _ => {}
    }
    if let Some(Value::Array(errors)) = payload.get("errors") {
        if let Some(first) = errors.first() {
            let message = text(first)
                .or_else(|| first.get("msg").and_then(text))
                .or_else(|| first.get("message").and_then(text));
            if message.is_some() {
                return message;
            }
        }
    }
    match payload.get("data") {
        Some(inner @ Value::Object(_)) => extract_message(inner),
        _ => None,
    }
}

/// Canonical reason phrase for a status code
pub fn reason_phrase(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Request Failed")
}

/// Map a failed response to the normalized error
pub fn to_api_error(method: &str, url: &str, status: Option<u16>, body: &str) -> ApiError {
    let payload = parse_payload(body);
    let message = payload
        .as_ref()
        .and_then(extract_message)
        .unwrap_or_else(|| match status {
            Some(code) => format!("{} ({code})", reason_phrase(code)),
            None => "Request failed".to_string(),
        });

    ApiError {
        message,
        status,
        url: url.to_string(),
        method: method.to_string(),
        payload,
    }
}

/// JSON when the body parses, the raw text otherwise, nothing when empty
pub fn parse_payload(body: &str) -> Option<Value> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string())))
}
