//! Checklist aggregation
//!
//! Items are grouped by their logical group in first-seen order. Status
//! moves from unevaluated to pass/fail/idle and may be re-toggled before
//! submission, but never back to unevaluated.

use mtrack_core::{ChecklistItem, ItemId, ItemStatus, MtrackError};
use serde::{Deserialize, Serialize};

use crate::gate::{self, SubmitReadiness, Tally};

/// Items of one checklist group, in original order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistGroup {
    pub name: String,
    pub thai_name: String,
    pub items: Vec<ChecklistItem>,
}

/// Group items by `group_name`, preserving first-seen group order and
/// item order within each group.
pub fn group(items: &[ChecklistItem]) -> Vec<ChecklistGroup> {
    let mut groups: Vec<ChecklistGroup> = Vec::new();

    for item in items {
        match groups.iter_mut().find(|g| g.name == item.group_name) {
            Some(existing) => existing.items.push(item.clone()),
            None => groups.push(ChecklistGroup {
                name: item.group_name.clone(),
                thai_name: item.group_thai_name.clone(),
                items: vec![item.clone()],
            }),
        }
    }

    groups
}

/// A checklist being filled in by an operator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistSheet {
    items: Vec<ChecklistItem>,
}

impl ChecklistSheet {
    pub fn new(items: Vec<ChecklistItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ChecklistItem> {
        self.items
    }

    pub fn groups(&self) -> Vec<ChecklistGroup> {
        group(&self.items)
    }

    /// Record an operator's verdict for one item.
    pub fn set_status(&mut self, id: &ItemId, status: ItemStatus) -> Result<(), MtrackError> {
        if status == ItemStatus::Unevaluated {
            return Err(MtrackError::TransitionError(format!(
                "item {} cannot return to unevaluated",
                id
            )));
        }

        let item = self.find_mut(id)?;
        tracing::debug!(item = %id, from = %item.status, to = %status, "checklist status change");
        item.status = status;
        Ok(())
    }

    /// Attach the justification required for failed items.
    pub fn set_issue_detail(&mut self, id: &ItemId, detail: impl Into<String>) -> Result<(), MtrackError> {
        self.find_mut(id)?.issue_detail = detail.into();
        Ok(())
    }

    pub fn readiness(&self) -> SubmitReadiness {
        gate::assess(&self.items)
    }

    pub fn is_submit_ready(&self) -> bool {
        self.readiness().ready
    }

    pub fn tally(&self) -> Tally {
        gate::tally(&self.items)
    }

    fn find_mut(&mut self, id: &ItemId) -> Result<&mut ChecklistItem, MtrackError> {
        self.items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| MtrackError::NotFound(format!("checklist item {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ChecklistItem> {
        vec![
            ChecklistItem::new(1, "Oil level", "Lubrication"),
            ChecklistItem::new(2, "Guard intact", "Safety"),
            ChecklistItem::new(3, "Grease points", "Lubrication"),
            ChecklistItem::new(4, "E-stop works", "Safety"),
            ChecklistItem::new(5, "Air pressure", "Pneumatics"),
        ]
    }

    #[test]
    fn test_group_preserves_order() {
        let groups = group(&sample());
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Lubrication", "Safety", "Pneumatics"]);

        let lube: Vec<String> = groups[0].items.iter().map(|i| i.id.to_string()).collect();
        assert_eq!(lube, vec!["1", "3"]);
    }

    #[test]
    fn test_group_empty() {
        assert!(group(&[]).is_empty());
    }

    #[test]
    fn test_fail_requires_detail() {
        let mut sheet = ChecklistSheet::new(vec![ChecklistItem::new(1, "Oil level", "Lubrication")]);
        let id = ItemId::from(1);
        assert!(!sheet.is_submit_ready());

        sheet.set_status(&id, ItemStatus::Fail).unwrap();
        assert!(!sheet.is_submit_ready());

        sheet.set_issue_detail(&id, "  ").unwrap();
        assert!(!sheet.is_submit_ready());

        sheet.set_issue_detail(&id, "Level below minimum mark").unwrap();
        assert!(sheet.is_submit_ready());
    }

    #[test]
    fn test_retoggle_before_submit() {
        let mut sheet = ChecklistSheet::new(sample());
        let id = ItemId::from(2);
        sheet.set_status(&id, ItemStatus::Fail).unwrap();
        sheet.set_status(&id, ItemStatus::Pass).unwrap();
        assert_eq!(sheet.items()[1].status, ItemStatus::Pass);
    }

    #[test]
    fn test_cannot_unset_status() {
        let mut sheet = ChecklistSheet::new(sample());
        let err = sheet.set_status(&ItemId::from(1), ItemStatus::Unevaluated).unwrap_err();
        assert!(matches!(err, MtrackError::TransitionError(_)));
    }

    #[test]
    fn test_unknown_item() {
        let mut sheet = ChecklistSheet::new(sample());
        let err = sheet.set_status(&ItemId::from(99), ItemStatus::Pass).unwrap_err();
        assert!(matches!(err, MtrackError::NotFound(_)));
    }
}
