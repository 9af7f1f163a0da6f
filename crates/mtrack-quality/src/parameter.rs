//! Parameter sheets
//!
//! Unlike checklist items, a parameter's status is never set by hand: it
//! is recomputed from the measured value every time that value changes.

use mtrack_core::{FieldValue, ItemId, MtrackError, ParameterItem};
use serde::{Deserialize, Serialize};

use crate::gate::{self, SubmitReadiness, Tally};
use crate::profile::DisplayProfile;
use crate::tolerance::{self, ToleranceOutcome};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterSheet {
    items: Vec<ParameterItem>,
}

impl ParameterSheet {
    /// Build a sheet, deriving every status from the values already present.
    pub fn new(items: Vec<ParameterItem>) -> Self {
        let mut sheet = Self { items };
        for item in &mut sheet.items {
            refresh(item);
        }
        sheet
    }

    pub fn items(&self) -> &[ParameterItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ParameterItem> {
        self.items
    }

    /// Store a new reading and return the recomputed outcome.
    pub fn record_measurement(
        &mut self,
        id: &ItemId,
        value: impl Into<FieldValue>,
    ) -> Result<ToleranceOutcome, MtrackError> {
        let item = self.find_mut(id)?;
        item.measured_value = value.into();
        let outcome = refresh(item);
        tracing::debug!(item = %id, outcome = %outcome, "parameter re-evaluated");
        Ok(outcome)
    }

    pub fn set_issue_detail(&mut self, id: &ItemId, detail: impl Into<String>) -> Result<(), MtrackError> {
        self.find_mut(id)?.issue_detail = detail.into();
        Ok(())
    }

    /// Acceptable-range label for one parameter.
    pub fn range_label(&self, id: &ItemId, profile: &DisplayProfile) -> Option<String> {
        let item = self.items.iter().find(|i| &i.id == id)?;
        profile.format_range(&item.standard_value, &item.tolerance, &item.unit)
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

    fn find_mut(&mut self, id: &ItemId) -> Result<&mut ParameterItem, MtrackError> {
        self.items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| MtrackError::NotFound(format!("parameter item {}", id)))
    }
}

fn refresh(item: &mut ParameterItem) -> ToleranceOutcome {
    let outcome = tolerance::evaluate(&item.measured_value, &item.standard_value, &item.tolerance);
    item.status = outcome.to_status();
    outcome
}
