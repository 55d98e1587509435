//! Mapping between native [`crate::Value`]s / declared type names and the
//! remote language's method-descriptor grammar (`spec.md` §3 "Parameter
//! type descriptor", §4.A).

use crate::{TypeError, Value};

/// Primitive name -> single-letter descriptor, per `spec.md` §3.
const PRIMITIVES: &[(&str, &str)] = &[
    ("boolean", "Z"),
    ("byte", "B"),
    ("char", "C"),
    ("short", "S"),
    ("int", "I"),
    ("long", "J"),
    ("float", "F"),
    ("double", "D"),
    ("void", "V"),
];

/// The descriptor fragment for one inferred (undeclared) value.
///
/// - `Null` has no inferable wire type and fails with `UnsupportedType`,
///   matching `spec.md` §4.A which enumerates only bool/int/long/float/
///   string/object/list as inferable shapes.
pub fn infer_fragment(value: &Value) -> Result<String, TypeError> {
    match value {
        Value::Bool(_) => Ok("Z".to_owned()),
        Value::Int32(_) => Ok("I".to_owned()),
        Value::Int64(_) => Ok("J".to_owned()),
        Value::F64(_) => Ok("D".to_owned()),
        Value::Str(_) => Ok("Ljava/lang/String;".to_owned()),
        Value::Object(object) => Ok(format!("L{};", object.path.replace('.', "/"))),
        Value::List(items) => {
            let Some(first) = items.first() else {
                return Err(TypeError::UnresolvableEmptyList);
            };
            for (index, item) in items.iter().enumerate().skip(1) {
                if !item.same_shape(first) {
                    return Err(TypeError::HeterogeneousList {
                        first: first.shape_name(),
                        other: item.shape_name(),
                        index,
                    });
                }
            }
            Ok(format!("[{}", infer_fragment(first)?))
        }
        Value::Null => Err(TypeError::UnsupportedType {
            description: "null value has no type to infer".to_owned(),
        }),
    }
}

/// The full parameter-type descriptor inferred from an argument list: the
/// ordered concatenation of each argument's fragment, no separator.
pub fn infer_descriptor(values: &[Value]) -> Result<String, TypeError> {
    values.iter().map(infer_fragment).collect()
}

/// Splits the first `<...>` from `<end of string>` strictly as `find` gives.
/// Generics are erased, not parsed structurally — the remote side only
/// ever sees the erased descriptor.
fn strip_generic(name: &str) -> &str {
    match name.find('<') {
        Some(index) => &name[..index],
        None => name,
    }
}

/// The content of the first top-level `<...>` in a declared type name, if
/// any (e.g. `"java.lang.String"` for `"java.util.List<java.lang.String>"`).
/// Used by the coercion layer to pick an element type for wrapped lists.
pub fn generic_argument(name: &str) -> Option<&str> {
    let start = name.find('<')? + 1;
    let mut depth = 1i32;
    for (offset, ch) in name[start..].char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&name[start..start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Canonicalizes one declared type name into a descriptor fragment, per
/// `spec.md` §4.A:
/// - pre-formed descriptors (`[...`, `L...;`) pass through unchanged
/// - `T[]` recurses on `T` and prepends `[`
/// - generics are stripped before the remaining rules apply
/// - primitive names map via the table above
/// - anything else becomes `L<slashed>;`
pub fn canonicalize_declared(name: &str) -> String {
    let name = name.trim();
    if name.starts_with('[') {
        return name.to_owned();
    }
    if name.starts_with('L') && name.ends_with(';') {
        return name.to_owned();
    }
    if let Some(element) = name.strip_suffix("[]") {
        return format!("[{}", canonicalize_declared(element));
    }
    let erased = strip_generic(name);
    if let Some((_, descriptor)) = PRIMITIVES.iter().find(|(primitive, _)| *primitive == erased) {
        return (*descriptor).to_owned();
    }
    format!("L{};", erased.replace('.', "/"))
}

/// Splits a comma-separated declared-type list into individual type
/// names, treating a comma inside `<...>` as part of the generic
/// parameter rather than a separator (`spec.md` §8 scenario 6).
pub fn split_declared_types(list: &str) -> Vec<String> {
    let list = list.trim();
    if list.is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (index, ch) in list.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(list[start..index].trim().to_owned());
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(list[start..].trim().to_owned());
    parts
}

/// The full descriptor for a declared-type list: each entry canonicalized
/// independently and concatenated in order.
pub fn declared_descriptor(declared_types: &[String]) -> String {
    declared_types
        .iter()
        .map(|name| canonicalize_declared(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NamedObject;

    #[test]
    fn infers_primitive_fragments() {
        assert_eq!(infer_fragment(&Value::Bool(true)).unwrap(), "Z");
        assert_eq!(infer_fragment(&Value::Int32(1)).unwrap(), "I");
        assert_eq!(infer_fragment(&Value::Int64(1)).unwrap(), "J");
        assert_eq!(infer_fragment(&Value::F64(1.0)).unwrap(), "D");
        assert_eq!(
            infer_fragment(&Value::Str("x".into())).unwrap(),
            "Ljava/lang/String;"
        );
    }

    #[test]
    fn infers_object_fragment_with_slashed_path() {
        let object = NamedObject::new("com.x.Foo");
        assert_eq!(infer_fragment(&Value::Object(object)).unwrap(), "Lcom/x/Foo;");
    }

    #[test]
    fn infers_list_fragment_from_first_element() {
        let list = Value::List(vec![Value::Str("a".into()), Value::Str("b".into())]);
        assert_eq!(infer_fragment(&list).unwrap(), "[Ljava/lang/String;");
    }

    #[test]
    fn empty_list_is_unresolvable() {
        let list = Value::List(vec![]);
        assert!(matches!(
            infer_fragment(&list),
            Err(TypeError::UnresolvableEmptyList)
        ));
    }

    #[test]
    fn heterogeneous_list_fails() {
        let list = Value::List(vec![Value::Int32(1), Value::Str("x".into())]);
        assert!(matches!(
            infer_fragment(&list),
            Err(TypeError::HeterogeneousList { index: 1, .. })
        ));
    }

    #[test]
    fn null_is_unsupported_for_inference() {
        assert!(matches!(
            infer_fragment(&Value::Null),
            Err(TypeError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn canonicalizes_primitives_and_classes() {
        assert_eq!(canonicalize_declared("int"), "I");
        assert_eq!(canonicalize_declared("boolean"), "Z");
        assert_eq!(
            canonicalize_declared("java.lang.String"),
            "Ljava/lang/String;"
        );
        assert_eq!(
            canonicalize_declared("java.lang.Integer"),
            "Ljava/lang/Integer;"
        );
    }

    #[test]
    fn canonicalizes_arrays_recursively() {
        assert_eq!(canonicalize_declared("int[]"), "[I");
        assert_eq!(canonicalize_declared("com.x.Foo[]"), "[Lcom/x/Foo;");
    }

    #[test]
    fn strips_generics_before_mapping() {
        assert_eq!(
            canonicalize_declared("java.util.List<com.x.Foo>"),
            "Ljava/util/List;"
        );
    }

    #[test]
    fn passes_through_preformed_descriptors() {
        assert_eq!(canonicalize_declared("Ljava/lang/String;"), "Ljava/lang/String;");
        assert_eq!(canonicalize_declared("[I"), "[I");
    }

    #[test]
    fn extracts_generic_argument() {
        assert_eq!(
            generic_argument("java.util.List<com.x.User>"),
            Some("com.x.User")
        );
        assert_eq!(generic_argument("java.util.List"), None);
    }

    #[test]
    fn splits_generic_aware_comma_list() {
        let parts = split_declared_types("int,Map<String,Integer>,List<User>");
        assert_eq!(parts, vec!["int", "Map<String,Integer>", "List<User>"]);
    }

    #[test]
    fn splits_empty_list_to_nothing() {
        assert!(split_declared_types("").is_empty());
        assert!(split_declared_types("   ").is_empty());
    }

    #[test]
    fn declared_descriptor_concatenates_in_order() {
        let types = split_declared_types("java.lang.String,java.lang.Integer,java.lang.String");
        assert_eq!(
            declared_descriptor(&types),
            "Ljava/lang/String;Ljava/lang/Integer;Ljava/lang/String;"
        );
    }

    #[test_strategy::proptest]
    fn every_primitive_name_canonicalizes_to_one_letter(
        #[strategy(proptest::sample::select(&[
            "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
        ]))]
        name: &'static str,
    ) {
        let descriptor = canonicalize_declared(name);
        proptest::prop_assert_eq!(descriptor.len(), 1);
    }
}
