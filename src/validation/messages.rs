//! Error key to message lookup

use super::{ErrorKind, ValidationErrors};
use std::collections::HashMap;

/// Messages for validation failures.
///
/// Overrides are looked up by error key; anything not overridden falls back
/// to [`ErrorKind::default_message`].
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    overrides: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the message for one error key
    pub fn with_override(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), message.into());
        self
    }

    /// Layer another set of overrides on top of this catalog
    pub fn merged<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, message) in overrides {
            self.overrides.insert(key.into(), message.into());
        }
        self
    }

    pub fn message(&self, kind: ErrorKind) -> &str {
        self.overrides
            .get(kind.key())
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_message())
    }

    /// One message per failure, space separated, in recorded order
    pub fn describe(&self, errors: &ValidationErrors) -> String {
        errors
            .iter()
            .map(|kind| self.message(*kind))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
