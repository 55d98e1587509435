//! Conversion between `serde_json::Value` and the wire-level
//! `dubbo_types::Value`, and the "multi-parameter rule" for splitting
//! `parameterValues` into one argument per declared type (`spec.md`
//! §4.F, §6).

use dubbo_types::{NamedObject, Value};

use crate::InvokeError;

/// Splits `json` into the call's argument list against `declared_count`
/// declared types: `N >= 2` requires a JSON array of exactly `N`
/// elements; `N == 1` (or no declared types) passes `json` through as
/// a single argument even if it is itself a JSON array.
pub fn parameter_values(
    json: Option<&serde_json::Value>,
    declared_count: usize,
) -> Result<Vec<Value>, InvokeError> {
    let Some(json) = json else {
        return Ok(Vec::new());
    };

    if declared_count >= 2 {
        let Some(items) = json.as_array() else {
            return Err(InvokeError::BadJsonValues(format!(
                "declared {declared_count} parameter types but parameterValues is not a JSON array"
            )));
        };
        if items.len() != declared_count {
            return Err(InvokeError::Client(dubbo_client::ClientError::Type(
                dubbo_types::TypeError::TypeCountMismatch {
                    declared: declared_count,
                    received: items.len(),
                },
            )));
        }
        return Ok(items.iter().map(json_to_value).collect());
    }

    Ok(vec![json_to_value(json)])
}

fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => json_number_to_value(n),
        serde_json::Value::String(s) => Value::Str(s.clone()),
        serde_json::Value::Array(items) => Value::List(items.iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => {
            // Anonymous: no class path yet. `dubbo_client::coercion` gives
            // it one against the argument's declared type, if any.
            let mut object = NamedObject::new("");
            for (key, value) in map {
                object = object.with_field(key.clone(), json_to_value(value));
            }
            Value::Object(object)
        }
    }
}

fn json_number_to_value(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        return match i32::try_from(i) {
            Ok(i32_value) => Value::Int32(i32_value),
            Err(_) => Value::Int64(i),
        };
    }
    Value::F64(n.as_f64().unwrap_or_default())
}

/// The inverse conversion for a decoded reply, so the host-facing
/// `CallResult::result` is plain JSON.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int32(v) => serde_json::Value::from(*v),
        Value::Int64(v) => serde_json::Value::from(*v),
        Value::F64(v) => serde_json::Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::Null => serde_json::Value::Null,
        Value::List(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Object(object) => {
            let mut map = serde_json::Map::new();
            for (key, field_value) in &object.fields {
                map.insert(key.clone(), value_to_json(field_value));
            }
            serde_json::Value::Object(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_declared_types_treats_the_whole_value_as_one_argument() {
        let json = serde_json::json!(["lisi", "zhangsan"]);
        let args = parameter_values(Some(&json), 0).unwrap();
        assert_eq!(args.len(), 1);
        assert!(matches!(args[0], Value::List(_)));
    }

    #[test]
    fn single_declared_type_also_takes_the_whole_value() {
        let json = serde_json::json!([1, 2, 3]);
        let args = parameter_values(Some(&json), 1).unwrap();
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn multi_param_splits_a_matching_array() {
        let json = serde_json::json!(["张三", 25]);
        let args = parameter_values(Some(&json), 2).unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0], Value::Str("张三".into()));
        assert_eq!(args[1], Value::Int32(25));
    }

    #[test]
    fn multi_param_rejects_a_non_array() {
        let json = serde_json::json!({"a": 1});
        assert!(parameter_values(Some(&json), 2).is_err());
    }

    #[test]
    fn multi_param_rejects_a_length_mismatch() {
        let json = serde_json::json!([1, 2, 3]);
        assert!(parameter_values(Some(&json), 2).is_err());
    }

    #[test]
    fn json_object_becomes_an_anonymous_mapping() {
        let json = serde_json::json!({"name": "lisi", "age": 25});
        let value = json_to_value(&json);
        match value {
            Value::Object(object) => assert!(object.path.is_empty()),
            other => panic!("expected an object, got {other:?}"),
        }
    }

    #[test]
    fn value_to_json_round_trips_primitives() {
        assert_eq!(value_to_json(&Value::Int32(5)), serde_json::json!(5));
        assert_eq!(value_to_json(&Value::Str("x".into())), serde_json::json!("x"));
        assert_eq!(value_to_json(&Value::Null), serde_json::Value::Null);
    }
}
