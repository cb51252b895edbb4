//! Decoding of single-record, count and error bodies.

use serde::de::DeserializeOwned;
use serde_json::Value;

use shopadmin_core::{ApiError, ApiResult, ResourceKind};

use crate::envelope::json_type;

/// Extract the human message from an error body.
///
/// Both `{ "message": .. }` and `{ "error": .. }` are in use; `message` wins.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let obj = value.as_object()?;
    ["message", "error"].iter().find_map(|key| {
        obj.get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    })
}

/// Peel `{ "product": {..} }` / `{ "data": {..} }` wrappers off a record body.
pub fn unwrap_record(value: Value, kind: ResourceKind) -> Value {
    match value {
        Value::Object(mut obj) if !obj.contains_key("id") => {
            for key in [kind.singular_key(), "data"] {
                if matches!(obj.get(key), Some(Value::Object(_))) {
                    if let Some(inner) = obj.remove(key) {
                        return inner;
                    }
                }
            }
            Value::Object(obj)
        }
        other => other,
    }
}

pub fn decode_record<R: DeserializeOwned>(value: Value, kind: ResourceKind) -> ApiResult<R> {
    serde_json::from_value(unwrap_record(value, kind))
        .map_err(|e| ApiError::decode(format!("{}: {e}", kind.label())))
}

/// Accept `{ "count": n }`, `{ "total": n }` or a bare number.
pub fn decode_count(value: Value) -> ApiResult<u64> {
    let number = match &value {
        Value::Object(obj) => obj.get("count").or_else(|| obj.get("total")),
        other => Some(other),
    };
    match number {
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| ApiError::decode(format!("count must be a non-negative integer, got {n}"))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| ApiError::decode(format!("count `{s}` is not a number"))),
        _ => Err(ApiError::decode(format!(
            "count response must be a number or {{ count }}, got {}",
            json_type(&value)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_then_error_keys() {
        assert_eq!(error_message(r#"{"message":"Name taken","error":"Bad Request"}"#).as_deref(), Some("Name taken"));
        assert_eq!(error_message(r#"{"error":"Seller not found"}"#).as_deref(), Some("Seller not found"));
        assert_eq!(error_message(r#"{"message":""}"#), None);
        assert_eq!(error_message("<html>502</html>"), None);
    }

    #[test]
    fn unwraps_named_and_data_wrappers() {
        let named = unwrap_record(json!({"product": {"id": 1}}), ResourceKind::Product);
        assert_eq!(named, json!({"id": 1}));
        let data = unwrap_record(json!({"data": {"id": 2}, "success": true}), ResourceKind::Order);
        assert_eq!(data, json!({"id": 2}));
        let plain = unwrap_record(json!({"id": 3, "data": {"x": 1}}), ResourceKind::Order);
        assert_eq!(plain["id"], 3);
    }

    #[test]
    fn count_shapes() {
        assert_eq!(decode_count(json!({"count": 4})).unwrap(), 4);
        assert_eq!(decode_count(json!({"total": "9"})).unwrap(), 9);
        assert_eq!(decode_count(json!(12)).unwrap(), 12);
        assert!(decode_count(json!({"n": 1})).is_err());
        assert!(decode_count(json!(-1)).is_err());
    }
}
