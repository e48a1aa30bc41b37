//! Validation failure kinds and the per-node error set

use serde::{Serialize, Serializer};
use std::fmt;

/// A named validation failure attached to a field or group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Required,
    MinLength,
    MaxLength,
    Email,
    Range,
    Match,
    Min,
    Max,
    Pattern,
    /// Failure reported by a custom validator under its own key
    Custom(&'static str),
}

impl ErrorKind {
    /// The key this failure is reported under (e.g. "required")
    pub fn key(&self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::MinLength => "minlength",
            ErrorKind::MaxLength => "maxlength",
            ErrorKind::Email => "email",
            ErrorKind::Range => "range",
            ErrorKind::Match => "match",
            ErrorKind::Min => "min",
            ErrorKind::Max => "max",
            ErrorKind::Pattern => "pattern",
            ErrorKind::Custom(key) => *key,
        }
    }

    /// Built-in human readable message for this failure
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::Required => "This field is required.",
            ErrorKind::MinLength => "The value is too short.",
            ErrorKind::MaxLength => "The value is too long.",
            ErrorKind::Email => "Please enter a valid email address.",
            ErrorKind::Range => "The value is out of range.",
            ErrorKind::Match => "The values do not match.",
            ErrorKind::Min => "The value is too small.",
            ErrorKind::Max => "The value is too large.",
            ErrorKind::Pattern => "The value has an invalid format.",
            ErrorKind::Custom(_) => "The value is invalid.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Insertion-ordered set of failures for one node.
///
/// Order follows the order of the validators that failed, a kind is
/// recorded at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ErrorKind>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure, ignoring repeats
    pub fn insert(&mut self, kind: ErrorKind) {
        if !self.0.contains(&kind) {
            self.0.push(kind);
        }
    }

    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorKind> {
        self.0.iter()
    }

    /// Error keys in recorded order
    pub fn keys(&self) -> Vec<&'static str> {
        self.0.iter().map(|kind| kind.key()).collect()
    }

    /// `None` when nothing failed, matching the "errors or none" node contract
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl FromIterator<ErrorKind> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ErrorKind>>(iter: I) -> Self {
        let mut errors = Self::new();
        for kind in iter {
            errors.insert(kind);
        }
        errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keys().join(", "))
    }
}
