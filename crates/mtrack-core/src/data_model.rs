//! Data Model: checklist items, measurements, attachments, report rows
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::field::FieldValue;

/// Identifier of a checklist or parameter item.
///
/// The backend sends ids as integers in some payloads and as strings in
/// others. Both are normalised to their decimal text so that correlation
/// is an exact string match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for ItemId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(n) if n.to_string() == self.0 => serializer.serialize_i64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ItemIdVisitor;

        impl<'de> Visitor<'de> for ItemIdVisitor {
            type Value = ItemId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an integer or string item id")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ItemId, E> {
                Ok(ItemId::from(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ItemId, E> {
                Ok(ItemId(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<ItemId, E> {
                if v.is_finite() && v.fract() == 0.0 {
                    Ok(ItemId((v as i64).to_string()))
                } else {
                    Err(E::custom(format!("item id {} is not an integer", v)))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ItemId, E> {
                if v.trim().is_empty() {
                    return Err(E::custom("item id is empty"));
                }
                Ok(ItemId::new(v))
            }
        }

        deserializer.deserialize_any(ItemIdVisitor)
    }
}

/// Evaluation state of a checklist or parameter item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "Option<String>")]
pub enum ItemStatus {
    /// Not evaluated yet (`null` on the wire)
    #[default]
    Unevaluated,
    Pass,
    Fail,
    Idle,
}

impl ItemStatus {
    pub fn is_evaluated(&self) -> bool {
        !matches!(self, ItemStatus::Unevaluated)
    }

    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            ItemStatus::Unevaluated => None,
            ItemStatus::Pass => Some("pass"),
            ItemStatus::Fail => Some("fail"),
            ItemStatus::Idle => Some("idle"),
        }
    }
}

impl TryFrom<Option<String>> for ItemStatus {
    type Error = String;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        let Some(raw) = value else {
            return Ok(ItemStatus::Unevaluated);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(ItemStatus::Unevaluated),
            "pass" => Ok(ItemStatus::Pass),
            "fail" => Ok(ItemStatus::Fail),
            "idle" => Ok(ItemStatus::Idle),
            other => Err(format!("unknown item status '{}'", other)),
        }
    }
}

impl From<ItemStatus> for Option<String> {
    fn from(status: ItemStatus) -> Self {
        status.as_str().map(str::to_string)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("unevaluated"))
    }
}

/// Status printed on a report row. Every row is classified, so there is
/// no unevaluated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Pass,
    Fail,
    Idle,
}

impl RowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Pass => "pass",
            RowStatus::Fail => "fail",
            RowStatus::Idle => "idle",
        }
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quantitative reading against a standard value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    #[serde(default)]
    pub value: FieldValue,
    #[serde(default)]
    pub standard_value: FieldValue,
    #[serde(default)]
    pub tolerance: FieldValue,
    #[serde(default)]
    pub unit: String,
}

/// A yes/no inspection point on a daily or periodic checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub thai_name: String,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub group_thai_name: String,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub issue_detail: String,
}

impl ChecklistItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thai_name: String::new(),
            group_name: group_name.into(),
            group_thai_name: String::new(),
            status: ItemStatus::Unevaluated,
            issue_detail: String::new(),
        }
    }
}

/// A machine parameter whose status follows from its measured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterItem {
    pub id: ItemId,
    pub item: String,
    #[serde(default)]
    pub thai_item: String,
    #[serde(default)]
    pub standard_value: FieldValue,
    #[serde(default)]
    pub tolerance: FieldValue,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub measured_value: FieldValue,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub issue_detail: String,
}

impl ParameterItem {
    pub fn new(
        id: impl Into<ItemId>,
        item: impl Into<String>,
        standard_value: impl Into<FieldValue>,
        tolerance: impl Into<FieldValue>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            item: item.into(),
            thai_item: String::new(),
            standard_value: standard_value.into(),
            tolerance: tolerance.into(),
            unit: unit.into(),
            measured_value: FieldValue::Empty,
            status: ItemStatus::Unevaluated,
            issue_detail: String::new(),
        }
    }
}

/// A recorded failure note tied to one checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureAttachment {
    #[serde(alias = "modelChecklistItemId")]
    pub model_checklist_item_id: ItemId,
    #[serde(default)]
    pub description: String,
}

/// Which periodic checklist variants apply to a machine's past inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InspectionHistoryFlags {
    #[serde(default, deserialize_with = "truthy")]
    pub is_daily: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub is_weekly: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub is_monthly: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub is_quarterly: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub is_6_months: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub is_yearly: bool,
}

/// Backend flags arrive as booleans, 0/1 integers, strings or null.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        serde_json::Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1"),
        _ => false,
    })
}

/// The subset of a backend machine record the engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MachineRecord {
    #[serde(default, alias = "machine_id", alias = "machineId")]
    pub id: Option<ItemId>,
    #[serde(default, alias = "machine_name", alias = "machineName")]
    pub name: Option<String>,
    #[serde(default, alias = "machine_number", alias = "machineNumber")]
    pub number: Option<String>,
    #[serde(default, alias = "machine_model", alias = "machineModel")]
    pub model: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl MachineRecord {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    /// Case-insensitive check for the `idle` machine status.
    pub fn is_idle(&self) -> bool {
        self.status
            .as_deref()
            .map(|s| s.eq_ignore_ascii_case("idle"))
            .unwrap_or(false)
    }
}

/// Checklist group heading on a report row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportGroup {
    pub name: String,
    #[serde(default)]
    pub thai_name: String,
}

/// One printable line of an inspection report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub id: ItemId,
    pub name: String,
    pub thai_name: String,
    pub group: ReportGroup,
    pub status: RowStatus,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_id_normalisation() {
        let from_int: ItemId = serde_json::from_value(json!(7)).unwrap();
        let from_str: ItemId = serde_json::from_value(json!("7")).unwrap();
        assert_eq!(from_int, from_str);
        assert_eq!(serde_json::to_value(&from_str).unwrap(), json!(7));

        let code: ItemId = serde_json::from_value(json!("A-12")).unwrap();
        assert_eq!(serde_json::to_value(&code).unwrap(), json!("A-12"));

        assert!(serde_json::from_value::<ItemId>(json!(7.5)).is_err());
        assert!(serde_json::from_value::<ItemId>(json!("")).is_err());
    }

    #[test]
    fn test_item_status_wire_form() {
        let item: ChecklistItem = serde_json::from_value(json!({
            "id": 1, "name": "Oil level", "groupName": "Lubrication", "status": null
        }))
        .unwrap();
        assert_eq!(item.status, ItemStatus::Unevaluated);

        let status: ItemStatus = serde_json::from_value(json!("FAIL")).unwrap();
        assert_eq!(status, ItemStatus::Fail);
        assert_eq!(serde_json::to_value(ItemStatus::Unevaluated).unwrap(), json!(null));
        assert_eq!(serde_json::to_value(ItemStatus::Idle).unwrap(), json!("idle"));

        assert!(serde_json::from_value::<ItemStatus>(json!("broken")).is_err());
    }

    #[test]
    fn test_history_flags_accept_backend_forms() {
        let flags: InspectionHistoryFlags = serde_json::from_value(json!({
            "is_daily": 1, "is_weekly": "true", "is_monthly": null, "is_yearly": false
        }))
        .unwrap();
        assert!(flags.is_daily);
        assert!(flags.is_weekly);
        assert!(!flags.is_monthly);
        assert!(!flags.is_quarterly);
        assert!(!flags.is_yearly);
    }

    #[test]
    fn test_machine_idle_is_case_insensitive() {
        assert!(MachineRecord::with_status("IDLE").is_idle());
        assert!(MachineRecord::with_status("Idle").is_idle());
        assert!(!MachineRecord::with_status("running").is_idle());
        assert!(!MachineRecord::default().is_idle());
    }

    #[test]
    fn test_attachment_aliases() {
        let a: FailureAttachment = serde_json::from_value(json!({
            "modelChecklistItemId": 3, "description": "worn belt"
        }))
        .unwrap();
        assert_eq!(a.model_checklist_item_id, ItemId::from(3));
    }
}
