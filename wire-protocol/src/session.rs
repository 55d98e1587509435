//! Per-request reference tables (`spec.md` §3 "Encoder session state",
//! §5 "Encoder session state"). These are owned by a single request and
//! must never be shared across requests — a back-reference from one
//! request would name a class the peer never received in that frame.

/// Tracks object paths and list element-type tags already emitted in the
/// current request, so repeats can use the compact reference form.
#[derive(Debug, Default)]
pub struct EncoderSession {
    class_defs: Vec<String>,
    list_types: Vec<String>,
}

impl EncoderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` if this is its first occurrence in the request.
    /// Returns `(index, is_new)`: `is_new` tells the caller whether to
    /// emit a full class definition or the compact reference form.
    pub fn register_class(&mut self, path: &str) -> (usize, bool) {
        if let Some(index) = self.class_defs.iter().position(|p| p == path) {
            (index, false)
        } else {
            self.class_defs.push(path.to_owned());
            (self.class_defs.len() - 1, true)
        }
    }

    /// Registers `tag` if this is its first occurrence in the request.
    /// Returns `(index, is_new)`: `is_new` tells the caller whether to
    /// emit the literal tag string or its table index.
    pub fn register_list_type(&mut self, tag: &str) -> (usize, bool) {
        if let Some(index) = self.list_types.iter().position(|t| t == tag) {
            (index, false)
        } else {
            self.list_types.push(tag.to_owned());
            (self.list_types.len() - 1, true)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.class_defs.is_empty() && self.list_types.is_empty()
    }
}

/// The decoder's mirror of [`EncoderSession`]: tables populated as class
/// definitions and list-type tags are observed on the wire, consulted
/// when a compact reference is seen later in the same frame.
#[derive(Debug, Default)]
pub struct DecoderSession {
    pub class_defs: Vec<(String, Vec<String>)>,
    pub list_types: Vec<String>,
}

impl DecoderSession {
    pub fn new() -> Self {
        Self::default()
    }
}
