//! Submit-readiness gate
//!
//! A sheet may be submitted once every item has been evaluated and every
//! failed item carries a non-blank issue detail.

use mtrack_core::{ChecklistItem, ItemId, ItemStatus, ParameterItem};
use serde::{Deserialize, Serialize};

/// Anything with a status and a failure justification
pub trait InspectionEntry {
    fn entry_id(&self) -> &ItemId;
    fn entry_status(&self) -> ItemStatus;
    fn entry_issue_detail(&self) -> &str;

    /// A failed entry without a trimmed, non-empty justification
    fn lacks_justification(&self) -> bool {
        self.entry_status() == ItemStatus::Fail && self.entry_issue_detail().trim().is_empty()
    }
}

impl InspectionEntry for ChecklistItem {
    fn entry_id(&self) -> &ItemId {
        &self.id
    }

    fn entry_status(&self) -> ItemStatus {
        self.status
    }

    fn entry_issue_detail(&self) -> &str {
        &self.issue_detail
    }
}

impl InspectionEntry for ParameterItem {
    fn entry_id(&self) -> &ItemId {
        &self.id
    }

    fn entry_status(&self) -> ItemStatus {
        self.status
    }

    fn entry_issue_detail(&self) -> &str {
        &self.issue_detail
    }
}

/// Whether a sheet can be submitted, and what blocks it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReadiness {
    pub ready: bool,

    /// Items still unevaluated
    pub pending: Vec<ItemId>,

    /// Failed items without an issue detail
    pub missing_detail: Vec<ItemId>,

    pub summary: String,
}

/// Per-status counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tally {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub idle: usize,
    pub pending: usize,
}

/// Evaluate the readiness predicate over a sheet
pub fn assess<T: InspectionEntry>(items: &[T]) -> SubmitReadiness {
    let pending: Vec<ItemId> = items
        .iter()
        .filter(|i| !i.entry_status().is_evaluated())
        .map(|i| i.entry_id().clone())
        .collect();

    let missing_detail: Vec<ItemId> = items
        .iter()
        .filter(|i| i.lacks_justification())
        .map(|i| i.entry_id().clone())
        .collect();

    let ready = pending.is_empty() && missing_detail.is_empty();

    let summary = if ready {
        "Ready to submit".to_string()
    } else {
        let mut reasons = Vec::new();
        if !pending.is_empty() {
            reasons.push(format!("{} item(s) not evaluated", pending.len()));
        }
        if !missing_detail.is_empty() {
            reasons.push(format!("{} failed item(s) without issue detail", missing_detail.len()));
        }
        format!("Blocked: {}", reasons.join(", "))
    };

    SubmitReadiness {
        ready,
        pending,
        missing_detail,
        summary,
    }
}

/// Count items per status
pub fn tally<T: InspectionEntry>(items: &[T]) -> Tally {
    items.iter().fold(
        Tally {
            total: items.len(),
            ..Tally::default()
        },
        |mut t, item| {
            match item.entry_status() {
                ItemStatus::Pass => t.pass += 1,
                ItemStatus::Fail => t.fail += 1,
                ItemStatus::Idle => t.idle += 1,
                ItemStatus::Unevaluated => t.pending += 1,
            }
            t
        },
    )
}
