//! Validator library
//!
//! Pure field and group rules plus the failure kinds they report. Rules never
//! touch node state; nodes run them and store the outcome.

mod errors;
mod messages;
mod validators;

pub use errors::{ErrorKind, ValidationErrors};
pub use messages::MessageCatalog;
pub use validators::{GroupValidator, Validator};
