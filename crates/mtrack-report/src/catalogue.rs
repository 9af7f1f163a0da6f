//! Checklist catalogue adapter
//!
//! The catalogue endpoint answers
//! `{groups: [{group: {name, thai_name}, items: [{id, item_name|name, item_thai_name|thai_name}]}]}`,
//! optionally inside the standard `{success, data}` envelope.

use mtrack_core::{unwrap_envelope, ItemId, MtrackError, ReportGroup};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalogue {
    pub groups: Vec<CatalogueGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueGroup {
    pub group: ReportGroup,
    pub items: Vec<CatalogueItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueItem {
    pub id: ItemId,
    pub name: String,
    pub thai_name: String,
}

#[derive(Deserialize)]
struct RawCatalogue {
    #[serde(default)]
    groups: Vec<RawGroup>,
}

#[derive(Deserialize)]
struct RawGroup {
    #[serde(default)]
    group: RawGroupInfo,
    #[serde(default)]
    items: Vec<Value>,
}

#[derive(Deserialize, Default)]
struct RawGroupInfo {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "thaiName")]
    thai_name: Option<String>,
}

#[derive(Deserialize)]
struct RawItem {
    id: ItemId,
    #[serde(default)]
    item_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    item_thai_name: Option<String>,
    #[serde(default)]
    thai_name: Option<String>,
}

/// First non-empty candidate
fn first_filled(candidates: [Option<String>; 2]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// One item, or nothing when it has no usable id
fn parse_item(entry: Value) -> Option<CatalogueItem> {
    match serde_json::from_value::<RawItem>(entry) {
        Ok(i) => Some(CatalogueItem {
            id: i.id,
            name: first_filled([i.item_name, i.name]),
            thai_name: first_filled([i.item_thai_name, i.thai_name]),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "skipping malformed catalogue item");
            None
        }
    }
}

impl Catalogue {
    /// Parse a catalogue response, unwrapping the backend envelope.
    pub fn from_value(value: Value) -> Result<Self, MtrackError> {
        let payload = unwrap_envelope(value)?;
        let raw: RawCatalogue = serde_json::from_value(payload)
            .map_err(|e| MtrackError::ShapeError(format!("checklist catalogue: {}", e)))?;

        let groups = raw
            .groups
            .into_iter()
            .map(|g| CatalogueGroup {
                group: ReportGroup {
                    name: g.group.name.unwrap_or_default(),
                    thai_name: g.group.thai_name.unwrap_or_default(),
                },
                items: g.items.into_iter().filter_map(parse_item).collect(),
            })
            .collect();

        Ok(Self { groups })
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}
