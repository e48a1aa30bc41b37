//! Field value objects

use serde::Serialize;
use serde_json::{Number, Value};

/// Scalar value held by a field
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Null or an empty string: the two shapes `Required` treats as absent
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(_) | FieldValue::Bool(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading of the value: finite numbers, or text parsing as one.
    ///
    /// Booleans are not numeric: `Range` rejects `true` rather than reading
    /// it as 1.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// JSON form of the value; non-finite numbers become null
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
            FieldValue::Bool(b) => Value::Bool(*b),
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl From<&FieldValue> for Value {
    fn from(value: &FieldValue) -> Self {
        value.to_json()
    }
}

/// JSON shape that cannot be stored in a field (array or object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAScalar;

impl TryFrom<&Value> for FieldValue {
    type Error = NotAScalar;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(FieldValue::Null),
            Value::Bool(b) => Ok(FieldValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(FieldValue::Number).ok_or(NotAScalar),
            Value::String(s) => Ok(FieldValue::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(NotAScalar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_null() {
        assert!(FieldValue::default().is_null());
    }

    #[test]
    fn test_is_empty() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from(" ").is_empty());
        assert!(!FieldValue::from(0).is_empty());
        assert!(!FieldValue::from(false).is_empty());
    }

    #[test]
    fn test_as_number_reads_numeric_text() {
        assert_eq!(FieldValue::from("3").as_number(), Some(3.0));
        assert_eq!(FieldValue::from(" 2.5 ").as_number(), Some(2.5));
        assert_eq!(FieldValue::from(4).as_number(), Some(4.0));
        assert_eq!(FieldValue::from("abc").as_number(), None);
        assert_eq!(FieldValue::from("").as_number(), None);
        assert_eq!(FieldValue::from(true).as_number(), None);
        assert_eq!(FieldValue::from(f64::NAN).as_number(), None);
    }

    #[test]
    fn test_json_conversions() {
        assert_eq!(FieldValue::from("a").to_json(), json!("a"));
        assert_eq!(FieldValue::from(1.5).to_json(), json!(1.5));
        assert_eq!(FieldValue::Null.to_json(), Value::Null);
        assert_eq!(FieldValue::from(f64::INFINITY).to_json(), Value::Null);

        assert_eq!(FieldValue::try_from(&json!(true)), Ok(FieldValue::Bool(true)));
        assert_eq!(FieldValue::try_from(&json!(2)), Ok(FieldValue::Number(2.0)));
        assert_eq!(FieldValue::try_from(&json!([1])), Err(NotAScalar));
        assert_eq!(FieldValue::try_from(&json!({"a": 1})), Err(NotAScalar));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(FieldValue::from(None::<&str>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::from("x"));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(FieldValue::Null.display_value(), "");
        assert_eq!(FieldValue::from(5).display_value(), "5");
        assert_eq!(FieldValue::from("hi").display_value(), "hi");
    }
}
