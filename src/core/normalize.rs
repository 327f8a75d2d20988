//! Response normalization: map an arbitrary chatbot response body to one display string.
//!
//! Shared by the chat client and the proxy so both hops render identical text.

use serde_json::Value;

/// Field names consulted, in priority order, when the body is a JSON object.
pub const ANSWER_FIELDS: &[&str] = &["message", "response", "answer"];

/// Text used when the body parses as JSON but carries nothing displayable.
pub const NO_DATA_FALLBACK: &str = "No response data received";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("Empty response received from server")]
    EmptyResponse,
}

/// Result of looking up the answer field in a parsed body.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldLookup<'a> {
    Found(&'a Value),
    NotFound,
}

/// JavaScript-style truthiness: null, false, 0 and "" are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First truthy candidate field of `value`, by `ANSWER_FIELDS` priority.
pub fn lookup_answer_field(value: &Value) -> FieldLookup<'_> {
    ANSWER_FIELDS
        .iter()
        .find_map(|name| value.get(*name).filter(|v| is_truthy(v)))
        .map_or(FieldLookup::NotFound, FieldLookup::Found)
}

/// Rewrite integral floats (`1.0`, `1e3`) as integers, the way JSON.stringify prints them.
fn integral_numbers(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Value::from(f as i64),
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(integral_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), integral_numbers(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Serialize a non-string value for display.
fn to_json_text(value: &Value) -> String {
    integral_numbers(value).to_string()
}

fn value_to_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => to_json_text(other),
    }
}

/// Normalize a raw response body.
///
/// Empty or whitespace-only bodies fail with [`NormalizeError::EmptyResponse`].
/// Bodies that are not JSON are returned unchanged.
pub fn normalize(raw: &str) -> Result<String, NormalizeError> {
    if raw.trim().is_empty() {
        return Err(NormalizeError::EmptyResponse);
    }

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            log::debug!("Body is not JSON ({}), using as text", e);
            return Ok(raw.to_string());
        }
    };

    let text = match lookup_answer_field(&parsed) {
        FieldLookup::Found(v) => value_to_display(v),
        FieldLookup::NotFound => match &parsed {
            Value::String(s) => s.clone(),
            other if is_truthy(other) => to_json_text(other),
            _ => NO_DATA_FALLBACK.to_string(),
        },
    };

    if text.is_empty() {
        Ok(NO_DATA_FALLBACK.to_string())
    } else {
        Ok(text)
    }
}
