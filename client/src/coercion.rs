//! Value coercion against a declared type (`spec.md` §4.F). Anonymous
//! mappings decoded from caller-supplied JSON arrive as
//! `Value::Object(NamedObject { path: String::new(), .. })` — an object
//! with no class path yet. Coercion is what gives them one.

use dubbo_types::{generic_argument, NamedObject, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclaredKind {
    Map,
    List,
    Object,
    Other,
}

fn classify(declared: &str) -> DeclaredKind {
    let base = declared.split('<').next().unwrap_or(declared).trim();
    if base.starts_with('[') || base.starts_with('L') && base.ends_with(';') {
        return DeclaredKind::Other;
    }
    let simple_name = base.rsplit('.').next().unwrap_or(base);
    if simple_name.ends_with("Map") {
        DeclaredKind::Map
    } else if matches!(simple_name, "List" | "ArrayList" | "LinkedList" | "Collection" | "Set") {
        DeclaredKind::List
    } else if is_primitive(simple_name) {
        DeclaredKind::Other
    } else {
        DeclaredKind::Object
    }
}

fn is_primitive(name: &str) -> bool {
    matches!(
        name,
        "boolean" | "byte" | "char" | "short" | "int" | "long" | "float" | "double" | "void"
    )
}

/// Coerces `value` against `declared`, applying the Map-like / Object-like
/// / List-like wrapping rules. `None` declared type passes the value
/// through unchanged — the wire type is then inferred from its shape.
pub fn coerce_value(value: Value, declared: Option<&str>) -> Value {
    let Some(declared) = declared else {
        return value;
    };

    match (classify(declared), value) {
        (DeclaredKind::Map, Value::Object(object)) if object.path.is_empty() => {
            Value::Object(NamedObject {
                path: declared.to_owned(),
                fields: object.fields,
            })
        }
        (DeclaredKind::Object, Value::Object(object)) if object.path.is_empty() => {
            let fields = object
                .fields
                .into_iter()
                .map(|(name, field_value)| (name, wrap_nested_mapping(field_value)))
                .collect();
            Value::Object(NamedObject {
                path: declared.to_owned(),
                fields,
            })
        }
        (DeclaredKind::List, Value::List(items)) => {
            let element_type = generic_argument(declared);
            let coerced = items
                .into_iter()
                .map(|item| match element_type {
                    Some(element_type) => coerce_value(item, Some(element_type)),
                    None => wrap_nested_mapping(item),
                })
                .collect();
            Value::Object(NamedObject::array_list(coerced))
        }
        (_, value) => value,
    }
}

/// Recursively wraps anonymous mappings encountered inside an
/// already-coerced value with `path = "java.lang.Object"`, per
/// `spec.md` §4.F's "nested mappings ... recursively wrapped".
fn wrap_nested_mapping(value: Value) -> Value {
    match value {
        Value::Object(object) if object.path.is_empty() => {
            let fields = object
                .fields
                .into_iter()
                .map(|(name, field_value)| (name, wrap_nested_mapping(field_value)))
                .collect();
            Value::Object(NamedObject {
                path: "java.lang.Object".to_owned(),
                fields,
            })
        }
        Value::List(items) => Value::List(items.into_iter().map(wrap_nested_mapping).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous_mapping(fields: Vec<(&str, Value)>) -> Value {
        let mut object = NamedObject::new("");
        for (name, value) in fields {
            object = object.with_field(name, value);
        }
        Value::Object(object)
    }

    #[test]
    fn passes_through_when_no_declared_type() {
        let value = Value::Int32(5);
        assert_eq!(coerce_value(value.clone(), None), value);
    }

    #[test]
    fn wraps_anonymous_mapping_as_declared_object() {
        let value = anonymous_mapping(vec![
            ("name", Value::Str("lisi".into())),
            ("age", Value::Int32(25)),
        ]);
        let coerced = coerce_value(value, Some("com.x.HelloRequest"));
        match coerced {
            Value::Object(object) => assert_eq!(object.path, "com.x.HelloRequest"),
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn wraps_sequence_as_array_list() {
        let value = Value::List(vec![Value::Str("lisi".into()), Value::Str("zhangsan".into())]);
        let coerced = coerce_value(value, Some("java.util.List<java.lang.String>"));
        match coerced {
            Value::Object(object) => assert!(object.is_array_list()),
            other => panic!("expected array list object, got {other:?}"),
        }
    }

    #[test]
    fn map_like_declared_type_wraps_without_recursing_into_fields() {
        let value = anonymous_mapping(vec![("k", Value::Str("v".into()))]);
        let coerced = coerce_value(value, Some("java.util.Map<String,String>"));
        match coerced {
            Value::Object(object) => assert_eq!(object.path, "java.util.Map<String,String>"),
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn unrelated_shapes_pass_through_unchanged() {
        let value = Value::Int32(1);
        assert_eq!(
            coerce_value(value.clone(), Some("com.x.HelloRequest")),
            value
        );
    }
}
