//! formstate - reactive form state with validation, change notification and
//! debounced feedback
//!
//! The form is a tree of fields, groups and arrays addressed by dot separated
//! paths. See [`state::FormState`] for the engine and
//! [`customer::CustomerForm`] for a complete form built on it.

pub mod config;
pub mod customer;
pub mod events;
pub mod sink;
pub mod state;
pub mod validation;
