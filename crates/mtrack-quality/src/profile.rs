//! Display profiles for acceptable ranges
//!
//! Quality checks and parameter checks share the tolerance rule but
//! present the accepted range differently.

use mtrack_core::FieldValue;
use serde::{Deserialize, Serialize};

use crate::tolerance::AcceptableRange;

/// How an acceptable range is shown to operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayProfile {
    /// Profile name (e.g., "quality@1.0", "parameter@1.0")
    pub name: String,

    /// Inspection kind the profile applies to
    pub kind: String,

    /// Fixed decimal places for `min - max`. `None` echoes the standard
    /// and tolerance as given, written `standard ± tolerance`.
    #[serde(default)]
    pub range_decimals: Option<usize>,
}

impl DisplayProfile {
    /// Quality checks: bounds with three decimals
    pub fn quality() -> Self {
        Self {
            name: "quality@1.0".to_string(),
            kind: "quality".to_string(),
            range_decimals: Some(3),
        }
    }

    /// Parameter checks: values exactly as entered on the definition
    pub fn parameter() -> Self {
        Self {
            name: "parameter@1.0".to_string(),
            kind: "parameter".to_string(),
            range_decimals: None,
        }
    }

    /// Load profile from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| e.to_string())
    }

    /// Get profile by inspection kind
    pub fn for_kind(kind: &str) -> Self {
        match kind {
            "parameter" => Self::parameter(),
            _ => Self::quality(),
        }
    }

    /// Render the acceptable range, or `None` when the standard or
    /// tolerance is unusable.
    pub fn format_range(&self, standard: &FieldValue, tolerance: &FieldValue, unit: &str) -> Option<String> {
        let range = AcceptableRange::from_fields(standard, tolerance)?;

        let label = match self.range_decimals {
            Some(places) => format!("{:.*} - {:.*}", places, range.min, places, range.max),
            None => format!("{} ± {}", standard, tolerance),
        };

        let unit = unit.trim();
        if unit.is_empty() {
            Some(label)
        } else {
            Some(format!("{} {}", label, unit))
        }
    }
}

impl Default for DisplayProfile {
    fn default() -> Self {
        Self::quality()
    }
}
