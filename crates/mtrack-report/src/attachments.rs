//! Failure attachments
//!
//! Payloads arrive as a bare array or as `{data: [...]}`. Anything else is
//! read as "no attachments". Lookup is keyed by exact item id; when two
//! attachments name the same item the later one wins.

use mtrack_core::{FailureAttachment, ItemId};
use serde_json::Value;
use std::collections::HashMap;

/// Failure descriptions keyed by checklist item id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSet {
    by_item: HashMap<ItemId, String>,
}

impl AttachmentSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalise a raw attachments payload.
    pub fn from_payload(payload: &Value) -> Self {
        Self::from_attachments(normalize(payload))
    }

    pub fn from_attachments(attachments: impl IntoIterator<Item = FailureAttachment>) -> Self {
        let mut by_item = HashMap::new();
        for attachment in attachments {
            let id = attachment.model_checklist_item_id;
            if by_item.insert(id.clone(), attachment.description).is_some() {
                tracing::debug!(item = %id, "duplicate attachment, keeping the later one");
            }
        }
        Self { by_item }
    }

    pub fn description(&self, id: &ItemId) -> Option<&str> {
        self.by_item.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }
}

/// Extract attachment records from either accepted payload shape.
/// Entries that do not parse are skipped.
pub fn normalize(payload: &Value) -> Vec<FailureAttachment> {
    let entries = match payload {
        Value::Array(entries) => entries,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(entries)) => entries,
            _ => {
                tracing::warn!("attachments payload has no data array, treating as empty");
                return Vec::new();
            }
        },
        Value::Null => return Vec::new(),
        other => {
            tracing::warn!(kind = %value_kind(other), "unexpected attachments payload, treating as empty");
            return Vec::new();
        }
    };

    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<FailureAttachment>(entry.clone()) {
            Ok(attachment) => Some(attachment),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed attachment");
                None
            }
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_both_shapes() {
        let bare = json!([{ "model_checklist_item_id": "7", "description": "leak" }]);
        let wrapped = json!({ "data": [{ "model_checklist_item_id": 7, "description": "leak" }] });

        let a = AttachmentSet::from_payload(&bare);
        let b = AttachmentSet::from_payload(&wrapped);
        assert_eq!(a, b);
        assert_eq!(a.description(&ItemId::from(7)), Some("leak"));
    }

    #[test]
    fn test_malformed_shapes_are_empty() {
        assert!(AttachmentSet::from_payload(&json!("oops")).is_empty());
        assert!(AttachmentSet::from_payload(&json!({ "data": "oops" })).is_empty());
        assert!(AttachmentSet::from_payload(&json!({ "items": [] })).is_empty());
        assert!(AttachmentSet::from_payload(&Value::Null).is_empty());
    }

    #[test]
    fn test_bad_entries_skipped() {
        let set = AttachmentSet::from_payload(&json!([
            { "description": "no id" },
            { "model_checklist_item_id": 3, "description": "worn" },
            42
        ]));
        assert_eq!(set.len(), 1);
        assert_eq!(set.description(&ItemId::from(3)), Some("worn"));
    }

    #[test]
    fn test_last_writer_wins() {
        let set = AttachmentSet::from_payload(&json!([
            { "model_checklist_item_id": 5, "description": "first" },
            { "model_checklist_item_id": "5", "description": "second" }
        ]));
        assert_eq!(set.description(&ItemId::from(5)), Some("second"));
    }

    #[test]
    fn test_exact_id_match_only() {
        let set = AttachmentSet::from_payload(&json!([
            { "model_checklist_item_id": 17, "description": "crack" }
        ]));
        assert_eq!(set.description(&ItemId::from(1)), None);
        assert_eq!(set.description(&ItemId::from(7)), None);
        assert_eq!(set.description(&ItemId::from(17)), Some("crack"));
    }
}
