//! Form domain layer
//!
//! A form is a tree of field, group and array nodes built from a schema.
//! All access goes through [`FormState`] by dot separated path.

mod array;
mod errors;
mod field;
mod form_state;
mod group;
mod node;
mod path;
mod schema;
mod value;

pub use array::ArrayNode;
pub use errors::{FormError, SchemaError};
pub use field::FieldNode;
pub use form_state::{FormSnapshot, FormState};
pub use group::GroupNode;
pub use node::{Control, Node, NodeId, NodeRef};
pub use path::FormPath;
pub use schema::{ArraySchema, FieldSchema, GroupSchema, Schema};
pub use value::{FieldValue, NotAScalar};
