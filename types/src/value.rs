use crate::NamedObject;

/// The native argument/result shape this crate understands. Every value
/// exchanged with the wire codec is one of these variants; there is no
/// other representation in scope (`spec.md` §3 "Argument list").
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    F64(f64),
    Str(String),
    Null,
    Object(NamedObject),
    List(Vec<Value>),
}

impl Value {
    /// A short name for this value's shape, used in `TypeError` messages
    /// and in the homogeneous-list check.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::F64(_) => "f64",
            Value::Str(_) => "string",
            Value::Null => "null",
            Value::Object(_) => "object",
            Value::List(_) => "list",
        }
    }

    /// Two values are the "same native shape" for the homogeneous-list
    /// invariant if their top-level variant matches; nested element types
    /// are not compared further (mirrors the source behaviour, which only
    /// checks `type(value[0]) == type(v)`).
    pub fn same_shape(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<NamedObject> for Value {
    fn from(value: NamedObject) -> Self {
        Value::Object(value)
    }
}
