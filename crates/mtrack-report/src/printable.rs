//! Printable report view model
//!
//! Rows regrouped under their headings, ready for a template.

use crate::assembler::{ReportOutcome, ReportSummary};
use crate::periods::PeriodSelection;
use chrono::NaiveDateTime;
use mtrack_core::{MachineRecord, ReportGroup, ReportRow};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintableGroup {
    pub name: String,
    pub thai_name: String,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintableReport {
    pub report_id: Uuid,
    pub title: String,
    pub machine: MachineRecord,
    pub generated_at: String,
    pub periods: Vec<&'static str>,
    pub groups: Vec<PrintableGroup>,
    pub summary: ReportSummary,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PrintableReport {
    pub fn new(
        outcome: ReportOutcome,
        machine: MachineRecord,
        periods: &PeriodSelection,
        generated_at: NaiveDateTime,
    ) -> Self {
        let title = match machine.name.as_deref() {
            Some(name) if !name.is_empty() => format!("Inspection Report: {}", name),
            _ => "Inspection Report".to_string(),
        };

        Self {
            report_id: Uuid::new_v4(),
            title,
            machine,
            generated_at: generated_at.format("%Y-%m-%d %H:%M").to_string(),
            periods: periods.labels(),
            groups: regroup(outcome.rows),
            summary: outcome.summary,
            complete: outcome.complete,
            error: outcome.error,
        }
    }
}

/// Consecutive rows sharing a group heading fold into one group.
fn regroup(rows: Vec<ReportRow>) -> Vec<PrintableGroup> {
    let mut groups: Vec<PrintableGroup> = Vec::new();
    for row in rows {
        match groups.last_mut() {
            Some(current) if same_heading(current, &row.group) => current.rows.push(row),
            _ => groups.push(PrintableGroup {
                name: row.group.name.clone(),
                thai_name: row.group.thai_name.clone(),
                rows: vec![row],
            }),
        }
    }
    groups
}

fn same_heading(group: &PrintableGroup, heading: &ReportGroup) -> bool {
    group.name == heading.name && group.thai_name == heading.thai_name
}
