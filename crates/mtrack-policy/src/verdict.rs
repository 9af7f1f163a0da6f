//! Validation verdicts
//!
//! Validation failures are user-correctable and returned as values, never
//! raised as errors. The caller decides how to surface the message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one gating check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub is_valid: bool,

    /// Why the input was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Validation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }

    /// Run `next` only if this check passed, keeping the first failure.
    pub fn and_then(self, next: impl FnOnce() -> Validation) -> Validation {
        if self.is_valid {
            next()
        } else {
            self
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_valid {
            write!(f, "VALID")
        } else {
            write!(f, "INVALID: {}", self.message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Validation::valid().to_string(), "VALID");
        assert_eq!(Validation::invalid("Missing").to_string(), "INVALID: Missing");
    }

    #[test]
    fn test_and_then_short_circuits() {
        let mut ran_third = false;
        let result = Validation::valid()
            .and_then(|| Validation::invalid("second"))
            .and_then(|| {
                ran_third = true;
                Validation::invalid("third")
            });
        assert_eq!(result.message(), "second");
        assert!(!ran_third);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(Validation::invalid("x")).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["message"], "x");

        let json = serde_json::to_value(Validation::valid()).unwrap();
        assert!(json.get("message").is_none());
    }
}
