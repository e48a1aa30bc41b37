//! Built-in validators

use super::ErrorKind;
use crate::state::{Control, FieldValue, GroupNode};
use once_cell::sync::Lazy;
use regex::Regex;

// Local part and domain labels; total/local length limits are checked separately
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
    .expect("email pattern is valid")
});

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

fn is_email(value: &str) -> bool {
    let local_len = value.split('@').next().map_or(0, str::len);
    value.len() <= EMAIL_MAX_LEN && local_len <= EMAIL_LOCAL_MAX_LEN && EMAIL_REGEX.is_match(value)
}

/// Rule applied to a single field's value
#[derive(Debug, Clone)]
pub enum Validator {
    /// Fails on null or empty text
    Required,
    /// Fails on text shorter than n characters; absent values pass
    MinLength(usize),
    /// Fails on text longer than n characters
    MaxLength(usize),
    /// Fails on a non-empty value that is not shaped like an email address
    Email,
    /// Fails on a present value that is not numeric or lies outside `min..=max`
    Range { min: f64, max: f64 },
    /// Fails on a numeric value below the bound
    Min(f64),
    /// Fails on a numeric value above the bound
    Max(f64),
    /// Fails on non-empty text that does not fully match
    Pattern(Regex),
    /// Plain function rule; a `fn` pointer cannot capture state
    Custom {
        name: &'static str,
        check: fn(&FieldValue) -> Option<ErrorKind>,
    },
}

impl Validator {
    pub fn range(min: f64, max: f64) -> Self {
        Validator::Range { min, max }
    }

    /// Build a pattern rule anchored at both ends
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(&format!("^(?:{pattern})$")).map(Validator::Pattern)
    }

    pub fn custom(name: &'static str, check: fn(&FieldValue) -> Option<ErrorKind>) -> Self {
        Validator::Custom { name, check }
    }

    /// Get validator name
    pub fn name(&self) -> &'static str {
        match self {
            Validator::Required => "required",
            Validator::MinLength(_) => "minLength",
            Validator::MaxLength(_) => "maxLength",
            Validator::Email => "email",
            Validator::Range { .. } => "range",
            Validator::Min(_) => "min",
            Validator::Max(_) => "max",
            Validator::Pattern(_) => "pattern",
            Validator::Custom { name, .. } => *name,
        }
    }

    /// Run the rule against a value
    pub fn check(&self, value: &FieldValue) -> Option<ErrorKind> {
        let failed = match self {
            Validator::Required => value.is_empty(),
            Validator::MinLength(min) => match value {
                FieldValue::Text(s) if !s.is_empty() => s.chars().count() < *min,
                _ => false,
            },
            Validator::MaxLength(max) => match value {
                FieldValue::Text(s) => s.chars().count() > *max,
                _ => false,
            },
            Validator::Email => match value {
                FieldValue::Null => false,
                FieldValue::Text(s) => !s.is_empty() && !is_email(s),
                FieldValue::Number(_) | FieldValue::Bool(_) => true,
            },
            Validator::Range { min, max } => {
                !value.is_null() && value.as_number().map_or(true, |n| n < *min || n > *max)
            }
            Validator::Min(min) => !value.is_empty() && value.as_number().is_some_and(|n| n < *min),
            Validator::Max(max) => !value.is_empty() && value.as_number().is_some_and(|n| n > *max),
            Validator::Pattern(regex) => match value {
                FieldValue::Null => false,
                FieldValue::Text(s) => !s.is_empty() && !regex.is_match(s),
                other => !regex.is_match(&other.display_value()),
            },
            Validator::Custom { check, .. } => return check(value),
        };

        failed.then(|| self.kind())
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Validator::Required => ErrorKind::Required,
            Validator::MinLength(_) => ErrorKind::MinLength,
            Validator::MaxLength(_) => ErrorKind::MaxLength,
            Validator::Email => ErrorKind::Email,
            Validator::Range { .. } => ErrorKind::Range,
            Validator::Min(_) => ErrorKind::Min,
            Validator::Max(_) => ErrorKind::Max,
            Validator::Pattern(_) => ErrorKind::Pattern,
            Validator::Custom { name, .. } => ErrorKind::Custom(*name),
        }
    }
}

/// Cross-field rule evaluated against a group's children
#[derive(Debug, Clone)]
pub enum GroupValidator {
    /// Two sibling fields must hold equal values once both have been edited
    Match { field: String, confirm: String },
    Custom {
        name: &'static str,
        check: fn(&GroupNode) -> Option<ErrorKind>,
    },
}

impl GroupValidator {
    pub fn matching(field: impl Into<String>, confirm: impl Into<String>) -> Self {
        GroupValidator::Match {
            field: field.into(),
            confirm: confirm.into(),
        }
    }

    pub fn custom(name: &'static str, check: fn(&GroupNode) -> Option<ErrorKind>) -> Self {
        GroupValidator::Custom { name, check }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GroupValidator::Match { .. } => "match",
            GroupValidator::Custom { name, .. } => *name,
        }
    }

    pub fn check(&self, group: &GroupNode) -> Option<ErrorKind> {
        match self {
            GroupValidator::Match { field, confirm } => {
                let (left, right) = (group.field(field)?, group.field(confirm)?);
                // No verdict until the user has edited both sides
                if left.is_pristine() || right.is_pristine() {
                    return None;
                }
                (left.value() != right.value()).then_some(ErrorKind::Match)
            }
            GroupValidator::Custom { check, .. } => check(group),
        }
    }
}
