//! Form state captured before submission

use mtrack_core::ItemId;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Machine ids arrive as strings from the QR payload and as integers from
/// the backend. Blank strings are kept so validation can report them.
fn loose_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        number @ Value::Number(_) => ItemId::deserialize(number)
            .map(|id| Some(id.to_string()))
            .map_err(de::Error::custom),
        other => Err(de::Error::custom(format!("machine id must be a string or integer, got {}", other))),
    }
}

/// Machine details filled in from a QR scan
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineIdentity {
    #[serde(default, deserialize_with = "loose_id")]
    pub machine_id: Option<String>,
    #[serde(default)]
    pub machine_name: Option<String>,
    #[serde(default)]
    pub machine_number: Option<String>,
    #[serde(default)]
    pub machine_model: Option<String>,
}

impl MachineIdentity {
    pub fn new(
        machine_id: impl Into<String>,
        machine_name: impl Into<String>,
        machine_number: impl Into<String>,
        machine_model: impl Into<String>,
    ) -> Self {
        Self {
            machine_id: Some(machine_id.into()),
            machine_name: Some(machine_name.into()),
            machine_number: Some(machine_number.into()),
            machine_model: Some(machine_model.into()),
        }
    }
}

/// A downtime report as typed by the operator
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DowntimeReport {
    #[serde(default, deserialize_with = "loose_id")]
    pub machine_id: Option<String>,
    #[serde(default)]
    pub problem_type: String,
    #[serde(default)]
    pub problem_detail: String,
}

/// Present means non-blank after trimming.
pub(crate) fn present(field: &Option<String>) -> bool {
    field.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_machine_id_accepts_numbers_and_strings() {
        let identity: MachineIdentity = serde_json::from_value(json!({ "machineId": 12 })).unwrap();
        assert_eq!(identity.machine_id.as_deref(), Some("12"));

        let identity: MachineIdentity = serde_json::from_value(json!({ "machineId": "M-12" })).unwrap();
        assert_eq!(identity.machine_id.as_deref(), Some("M-12"));

        let identity: MachineIdentity = serde_json::from_value(json!({ "machineId": null })).unwrap();
        assert_eq!(identity.machine_id, None);

        let report: DowntimeReport = serde_json::from_value(json!({ "machineId": 7.0, "problemType": "electrical" })).unwrap();
        assert_eq!(report.machine_id.as_deref(), Some("7"));

        assert!(serde_json::from_value::<MachineIdentity>(json!({ "machineId": 1.5 })).is_err());
        assert!(serde_json::from_value::<MachineIdentity>(json!({ "machineId": [1] })).is_err());
    }
}
