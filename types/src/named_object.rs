use indexmap::IndexMap;

use crate::Value;

/// A tagged record: a remote class name plus its fields in wire order.
///
/// `path` is the fully qualified remote class name using dots as
/// separators (e.g. `com.x.HelloRequest`). Field insertion order is
/// significant — it defines the wire order and must be stable across
/// every occurrence of this `path` within one request.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedObject {
    pub path: String,
    pub fields: IndexMap<String, Value>,
}

impl NamedObject {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// The canonical wire representation of a remote `java.util.List`: a
    /// named object whose path is `java.util.ArrayList` carrying an
    /// `elementData` list field and a `size` field, per the "Special
    /// collection object" rule.
    pub fn array_list(elements: Vec<Value>) -> Self {
        let size = elements.len() as i32;
        Self::new("java.util.ArrayList")
            .with_field("elementData", Value::List(elements))
            .with_field("size", Value::Int32(size))
    }

    /// True for the shape the encoder special-cases into a bare list: path
    /// `java.util.ArrayList` with an `elementData` field.
    pub fn is_array_list(&self) -> bool {
        self.path == "java.util.ArrayList" && self.fields.contains_key("elementData")
    }
}
