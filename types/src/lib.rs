//! Value and type-descriptor model shared by the Dubbo wire codec and
//! client crates.
//!
//! This crate owns the pure, allocation-light mapping described in
//! `spec.md` §3 and §4.A: the native [`Value`] shape, [`NamedObject`]
//! records, and the functions that turn either a runtime value or a
//! caller-declared type name into the remote method-descriptor grammar.
//! It has no knowledge of bytes, sockets, or registries.

mod descriptor;
mod error;
mod named_object;
mod value;

pub use descriptor::{
    canonicalize_declared, declared_descriptor, generic_argument, infer_descriptor,
    infer_fragment, split_declared_types,
};
pub use error::TypeError;
pub use named_object::NamedObject;
pub use value::Value;
