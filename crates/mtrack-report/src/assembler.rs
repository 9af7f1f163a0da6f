//! Report assembly
//!
//! Joins the checklist catalogue with failure attachments and the machine's
//! current status into printable rows. Fetch failures degrade to an empty or
//! best-effort row set with the error carried alongside, never a panic.

use crate::attachments::AttachmentSet;
use crate::catalogue::Catalogue;
use crate::periods::{select_periods, PeriodSelection};
use lazy_static::lazy_static;
use mtrack_core::{
    unwrap_envelope, InspectionHistoryFlags, MachineRecord, MtrackError, ReportRow, RowStatus,
};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

lazy_static! {
    static ref NUMBERING_PREFIX: Regex = Regex::new(r"^[0-9]+\.[0-9]+\s+").unwrap();
}

/// Drop a leading "N.N " section number from an item name.
pub fn strip_numbering(name: &str) -> String {
    NUMBERING_PREFIX.replace(name, "").into_owned()
}

/// Build the printable rows.
///
/// A row fails exactly when an attachment names its item id, whatever the
/// machine status. Rows without one are idle on an idle machine and pass
/// otherwise.
pub fn build_report(
    catalogue: &Catalogue,
    attachments: &AttachmentSet,
    machine: &MachineRecord,
) -> Vec<ReportRow> {
    let idle = machine.is_idle();

    catalogue
        .groups
        .iter()
        .flat_map(|group| {
            group.items.iter().map(move |item| {
                let (status, description) = match attachments.description(&item.id) {
                    Some(description) => (RowStatus::Fail, description.to_string()),
                    None if idle => (RowStatus::Idle, String::new()),
                    None => (RowStatus::Pass, String::new()),
                };

                ReportRow {
                    id: item.id.clone(),
                    name: strip_numbering(&item.name),
                    thai_name: item.thai_name.clone(),
                    group: group.group.clone(),
                    status,
                    description,
                }
            })
        })
        .collect()
}

/// Counts per row status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub idle: usize,
}

impl ReportSummary {
    pub fn of(rows: &[ReportRow]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, row| {
            acc.total += 1;
            match row.status {
                RowStatus::Pass => acc.pass += 1,
                RowStatus::Fail => acc.fail += 1,
                RowStatus::Idle => acc.idle += 1,
            }
            acc
        })
    }
}

/// Period selection plus whatever went wrong reading history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodPlan {
    pub periods: PeriodSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Choose periods from a history fetch result.
///
/// The history response may be a single record, a list (latest first) or an
/// enveloped form of either. Any failure falls back to daily.
pub fn plan_periods(history: Result<Value, MtrackError>) -> PeriodPlan {
    match history.and_then(parse_history) {
        Ok(flags) => PeriodPlan {
            periods: select_periods(flags.as_ref()),
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "inspection history unavailable, defaulting to daily");
            PeriodPlan {
                periods: PeriodSelection::daily(),
                error: Some(e.to_string()),
            }
        }
    }
}

fn parse_history(value: Value) -> Result<Option<InspectionHistoryFlags>, MtrackError> {
    let record = match unwrap_envelope(value)? {
        Value::Null => return Ok(None),
        Value::Array(mut records) => {
            if records.is_empty() {
                return Ok(None);
            }
            records.swap_remove(0)
        }
        other => other,
    };

    serde_json::from_value(record)
        .map(Some)
        .map_err(|e| MtrackError::ShapeError(format!("inspection history: {}", e)))
}

/// Rows plus any failure encountered while fetching their inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutcome {
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
    /// False when any input was missing and rows may under-report failures
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportOutcome {
    /// Fold a history failure into the outcome.
    ///
    /// Rows are unaffected, but the report is no longer complete and the
    /// history error leads the combined message.
    pub fn with_history(mut self, plan: &PeriodPlan) -> Self {
        if let Some(history_error) = &plan.error {
            self.complete = false;
            self.error = Some(match self.error.take() {
                Some(existing) => format!("{}; {}", history_error, existing),
                None => history_error.clone(),
            });
        }
        self
    }
}

/// Assemble from raw fetch results.
///
/// A failed catalogue yields no rows. A failed attachments fetch still yields
/// rows, but the outcome is marked incomplete.
pub fn assemble(
    catalogue: Result<Value, MtrackError>,
    attachments: Result<Value, MtrackError>,
    machine: &MachineRecord,
) -> ReportOutcome {
    let mut errors = Vec::new();

    let catalogue = match catalogue.and_then(Catalogue::from_value) {
        Ok(catalogue) => Some(catalogue),
        Err(e) => {
            tracing::error!(error = %e, "checklist catalogue unavailable");
            errors.push(e.to_string());
            None
        }
    };

    let attachments = match attachments.and_then(unwrap_envelope) {
        Ok(payload) => AttachmentSet::from_payload(&payload),
        Err(e) => {
            tracing::warn!(error = %e, "failure attachments unavailable, rows are best-effort");
            errors.push(e.to_string());
            AttachmentSet::empty()
        }
    };

    let rows = catalogue
        .as_ref()
        .map(|c| build_report(c, &attachments, machine))
        .unwrap_or_default();

    tracing::info!(
        machine = ?machine.id.as_ref().map(|id| id.to_string()),
        rows = rows.len(),
        failures = errors.len(),
        "report assembled"
    );

    ReportOutcome {
        summary: ReportSummary::of(&rows),
        rows,
        complete: errors.is_empty(),
        error: if errors.is_empty() { None } else { Some(errors.join("; ")) },
    }
}
