//! Customer sign-up form

mod controller;
mod schema;

pub use controller::CustomerForm;
pub use schema::{address_schema, customer_schema, paths};
