//! Loosely-typed scalar fields as they arrive from form inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A form scalar that may be a number, free text, or absent.
///
/// The original text is kept so that presentation can echo the value
/// exactly as the operator (or the backend) supplied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl FieldValue {
    /// True when nothing usable was entered.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
        }
    }

    /// Strict numeric reading. Empty, non-numeric, NaN and infinite
    /// values all yield `None`.
    pub fn as_finite(&self) -> Option<f64> {
        let n = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
            FieldValue::Empty => return None,
        };
        n.is_finite().then_some(n)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s.trim()),
            FieldValue::Empty => Ok(()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_parsing() {
        assert_eq!(FieldValue::from("10.05").as_finite(), Some(10.05));
        assert_eq!(FieldValue::from("  7 ").as_finite(), Some(7.0));
        assert_eq!(FieldValue::from("10abc").as_finite(), None);
        assert_eq!(FieldValue::from("NaN").as_finite(), None);
        assert_eq!(FieldValue::from("inf").as_finite(), None);
        assert_eq!(FieldValue::from("").as_finite(), None);
        assert_eq!(FieldValue::Empty.as_finite(), None);
        assert_eq!(FieldValue::Number(f64::NAN).as_finite(), None);
    }

    #[test]
    fn test_deserialize_shapes() {
        let n: FieldValue = serde_json::from_str("12").unwrap();
        assert_eq!(n, FieldValue::Number(12.0));

        let s: FieldValue = serde_json::from_str("\"0.5\"").unwrap();
        assert_eq!(s, FieldValue::Text("0.5".to_string()));

        let e: FieldValue = serde_json::from_str("null").unwrap();
        assert!(e.is_empty());
    }

    #[test]
    fn test_display_keeps_given_form() {
        assert_eq!(FieldValue::Number(10.0).to_string(), "10");
        assert_eq!(FieldValue::Number(0.05).to_string(), "0.05");
        assert_eq!(FieldValue::from("0.050").to_string(), "0.050");
    }
}
