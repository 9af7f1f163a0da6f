//! Submission gate
//!
//! Builds the records handed to the backend, but only once every
//! validator and the sheet's readiness predicate agree. Records are
//! stamped with the shift window at the moment of submission.

use mtrack_core::{Clock, ItemId, ItemStatus, MtrackError, Shift, ShiftResolver, ShiftWindow};
use mtrack_quality::{ChecklistSheet, ParameterSheet, SubmitReadiness};
use serde::{Deserialize, Serialize};

use crate::forms::{DowntimeReport, MachineIdentity};
use crate::problem::ProblemType;
use crate::rules::{validate_downtime_report, validate_employee_id, validate_machine_identity};
use crate::verdict::Validation;

/// Outcome recorded for one checklist item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResult {
    pub id: ItemId,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_detail: Option<String>,
}

/// Outcome recorded for one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterResult {
    pub id: ItemId,
    pub measured_value: Option<f64>,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCheckSubmission {
    pub machine_id: String,
    pub employee_id: String,
    pub shift: Shift,
    #[serde(flatten)]
    pub window: WindowStamp,
    pub results: Vec<ItemResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterCheckSubmission {
    pub machine_id: String,
    pub employee_id: String,
    pub shift: Shift,
    #[serde(flatten)]
    pub window: WindowStamp,
    pub results: Vec<ParameterResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowntimeSubmission {
    pub machine_id: String,
    pub problem_type: ProblemType,
    pub problem_detail: String,
    pub shift: Shift,
    #[serde(flatten)]
    pub window: WindowStamp,
}

/// Date bucket and timestamp of a submission, as ISO strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStamp {
    pub date: String,
    pub checked_at: String,
}

impl From<&ShiftWindow> for WindowStamp {
    fn from(window: &ShiftWindow) -> Self {
        Self {
            date: window.date.format("%Y-%m-%d").to_string(),
            checked_at: window.checked_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

/// Gate that turns validated form state into backend records
pub struct SubmissionGate<C: Clock> {
    shifts: ShiftResolver<C>,
}

impl<C: Clock> SubmissionGate<C> {
    pub fn new(clock: C) -> Self {
        Self {
            shifts: ShiftResolver::new(clock),
        }
    }

    /// Daily or periodic checklist results
    pub fn daily_check(
        &self,
        machine: &MachineIdentity,
        employee_id: &str,
        sheet: &ChecklistSheet,
    ) -> Result<DailyCheckSubmission, MtrackError> {
        let readiness = sheet.readiness();
        require(
            validate_machine_identity(machine)
                .and_then(|| validate_employee_id(employee_id))
                .and_then(|| readiness_check(&readiness)),
        )?;

        let window = self.shifts.resolve_now();
        let results = sheet
            .items()
            .iter()
            .map(|item| ItemResult {
                id: item.id.clone(),
                status: item.status,
                issue_detail: failure_detail(item.status, &item.issue_detail),
            })
            .collect();

        tracing::info!(shift = %window.shift, date = %window.date, "daily check accepted");
        Ok(DailyCheckSubmission {
            machine_id: machine_id(machine),
            employee_id: employee_id.to_string(),
            shift: window.shift,
            window: WindowStamp::from(&window),
            results,
        })
    }

    /// Parameter measurements
    pub fn parameter_check(
        &self,
        machine: &MachineIdentity,
        employee_id: &str,
        sheet: &ParameterSheet,
    ) -> Result<ParameterCheckSubmission, MtrackError> {
        let readiness = sheet.readiness();
        require(
            validate_machine_identity(machine)
                .and_then(|| validate_employee_id(employee_id))
                .and_then(|| readiness_check(&readiness)),
        )?;

        let window = self.shifts.resolve_now();
        let results = sheet
            .items()
            .iter()
            .map(|item| ParameterResult {
                id: item.id.clone(),
                measured_value: item.measured_value.as_finite(),
                status: item.status,
                issue_detail: failure_detail(item.status, &item.issue_detail),
            })
            .collect();

        tracing::info!(shift = %window.shift, date = %window.date, "parameter check accepted");
        Ok(ParameterCheckSubmission {
            machine_id: machine_id(machine),
            employee_id: employee_id.to_string(),
            shift: window.shift,
            window: WindowStamp::from(&window),
            results,
        })
    }

    /// Downtime report
    pub fn downtime(&self, report: &DowntimeReport) -> Result<DowntimeSubmission, MtrackError> {
        require(validate_downtime_report(report))?;

        let problem_type = report
            .problem_type
            .parse::<ProblemType>()
            .map_err(MtrackError::NotReady)?;

        let window = self.shifts.resolve_now();
        tracing::info!(shift = %window.shift, date = %window.date, %problem_type, "downtime accepted");
        Ok(DowntimeSubmission {
            machine_id: report.machine_id.as_deref().unwrap_or_default().trim().to_string(),
            problem_type,
            problem_detail: report.problem_detail.trim().to_string(),
            shift: window.shift,
            window: WindowStamp::from(&window),
        })
    }
}

fn require(validation: Validation) -> Result<(), MtrackError> {
    if validation.is_valid {
        Ok(())
    } else {
        tracing::debug!(reason = validation.message(), "submission refused");
        Err(MtrackError::NotReady(validation.message().to_string()))
    }
}

fn readiness_check(readiness: &SubmitReadiness) -> Validation {
    if readiness.ready {
        Validation::valid()
    } else {
        Validation::invalid(readiness.summary.clone())
    }
}

fn failure_detail(status: ItemStatus, detail: &str) -> Option<String> {
    (status == ItemStatus::Fail).then(|| detail.trim().to_string())
}

fn machine_id(machine: &MachineIdentity) -> String {
    machine.machine_id.as_deref().unwrap_or_default().trim().to_string()
}
