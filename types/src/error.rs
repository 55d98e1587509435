/// Errors raised while resolving a [`crate::Value`] or a declared type string
/// to a wire type descriptor.
///
/// These map 1:1 to the *UnresolvableEmptyList*, *UnsupportedType*,
/// *HeterogeneousList* and *TypeCountMismatch* error kinds.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    #[error("cannot infer a wire type from an empty list")]
    UnresolvableEmptyList,

    #[error("value has no supported wire representation: {description}")]
    UnsupportedType { description: String },

    #[error(
        "list elements are not homogeneous: first element is {first}, found {other} at index {index}"
    )]
    HeterogeneousList {
        first: &'static str,
        other: &'static str,
        index: usize,
    },

    #[error("declared {declared} parameter types but received {received} arguments")]
    TypeCountMismatch { declared: usize, received: usize },
}
