//! Presence check for JSON request bodies.

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse a request body, rejecting bodies that carry no data.
///
/// An empty body and any "empty" JSON value (`null`, `false`, `0`, `""`, `[]`,
/// `{}`) count as no data. Field-level checks are left to the handlers.
pub fn require_payload(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::NoData);
    }

    let payload: Value = serde_json::from_slice(body).map_err(ApiError::MalformedBody)?;

    if is_empty_value(&payload) {
        return Err(ApiError::NoData);
    }

    Ok(payload)
}

/// Decode a query from a payload that must be a JSON object.
///
/// Derived deserializers also accept sequences and fill fields by position, so
/// anything but an object is refused before the fields are read.
pub fn parse_query<T: DeserializeOwned>(payload: Value) -> Result<T, String> {
    match payload {
        Value::Object(_) => serde_json::from_value(payload).map_err(|e| e.to_string()),
        other => Err(format!(
            "request body must be a JSON object, found {}",
            value_kind(&other)
        )),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DietQuery, ExerciseQuery};
    use serde_json::json;

    #[test]
    fn empty_bodies_have_no_data() {
        for body in ["", "  \n", "null", "{}", "[]", "\"\"", "0", "false"] {
            assert!(
                matches!(require_payload(body.as_bytes()), Err(ApiError::NoData)),
                "{body:?} should be rejected as empty"
            );
        }
    }

    #[test]
    fn malformed_json_is_not_a_validation_error() {
        assert!(matches!(
            require_payload(b"{\"Age\": "),
            Err(ApiError::MalformedBody(_))
        ));
    }

    #[test]
    fn non_empty_payloads_pass_through() {
        let payload = require_payload(br#"{"Gender": "Male"}"#).unwrap();
        assert_eq!(payload["Gender"], "Male");

        assert!(require_payload(b"[1]").is_ok());
        assert!(require_payload(b"true").is_ok());
    }

    #[test]
    fn queries_must_be_objects() {
        let positional = json!(["Male", 28, 75, 70, 23.1]);
        let err = parse_query::<ExerciseQuery>(positional).unwrap_err();
        assert_eq!(err, "request body must be a JSON object, found an array");

        let err = parse_query::<DietQuery>(json!("vegan")).unwrap_err();
        assert_eq!(err, "request body must be a JSON object, found a string");
    }

    #[test]
    fn object_queries_are_decoded_by_name() {
        let query: DietQuery = parse_query(json!({ "favorite_foods": ["rice"] })).unwrap();
        assert_eq!(query.favorite_foods, vec!["rice".to_string()]);

        let err = parse_query::<ExerciseQuery>(json!({ "Gender": "Male" })).unwrap_err();
        assert!(err.starts_with("missing field"), "{err}");
    }
}
