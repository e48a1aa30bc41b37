//! Construction and access errors.
//!
//! These are distinct from validation failures, which are plain data on the
//! nodes.

use super::path::FormPath;
use thiserror::Error;

/// A schema that cannot be turned into a node tree
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("duplicate child name `{name}` in group `{group}`")]
    DuplicateName { group: FormPath, name: String },

    #[error("empty child name in group `{group}`")]
    EmptyName { group: FormPath },

    #[error("invalid child name `{name}` in group `{group}`: no '.' and not all digits")]
    InvalidName { group: FormPath, name: String },

    #[error("invalid range {min}..={max} on `{field}`")]
    InvalidRange { field: FormPath, min: f64, max: f64 },

    #[error("minimum length {min} exceeds maximum length {max} on `{field}`")]
    ConflictingLength {
        field: FormPath,
        min: usize,
        max: usize,
    },

    #[error("match rule in group `{group}` refers to `{name}`, which is not a field of that group")]
    MatchTarget { group: FormPath, name: String },
}

/// A path-based operation that could not be applied
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("no node at path `{0}`")]
    UnknownPath(FormPath),

    #[error("`{path}` is a {found}, not a field")]
    NotAField { path: FormPath, found: &'static str },

    #[error("`{path}` is a {found}, not an array")]
    NotAnArray { path: FormPath, found: &'static str },

    #[error("index {index} out of bounds for array `{path}` of length {len}")]
    IndexOutOfBounds {
        path: FormPath,
        index: usize,
        len: usize,
    },

    #[error("cannot write to `{path}`: expected {expected}")]
    TypeMismatch {
        path: FormPath,
        expected: &'static str,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}
