//! API Handlers
//!
//! Every handler answers JSON. Validation verdicts are ordinary `200`
//! responses; engine errors map to a status code by their area.
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use mtrack_core::{
    resolve, ChecklistItem, ItemStatus, MachineRecord, Measurement, MtrackError, ParameterItem,
    MTRACK_VERSION,
};
use mtrack_policy::{
    validate_downtime_report, validate_employee_id, validate_machine_identity, DowntimeReport,
    MachineIdentity, SubmissionGate, Validation,
};
use mtrack_quality::{
    AcceptableRange, ChecklistSheet, DisplayProfile, ParameterSheet, QualityCheck, ToleranceOutcome,
};
use mtrack_report::{assemble, plan_periods, PeriodPlan, PrintableReport, ReportOutcome};

use crate::state::AppState;

type JsonResponse = (StatusCode, Json<Value>);

fn status_for(err: &MtrackError) -> StatusCode {
    match err {
        MtrackError::ShapeError(_) => StatusCode::BAD_REQUEST,
        MtrackError::NotFound(_) => StatusCode::NOT_FOUND,
        MtrackError::NotReady(_) | MtrackError::TransitionError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MtrackError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
        MtrackError::TemplateError(_) | MtrackError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure(err: MtrackError) -> JsonResponse {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    (status, Json(json!({ "error": err.to_string() })))
}

fn ok<T: Serialize>(body: &T) -> JsonResponse {
    match serde_json::to_value(body) {
        Ok(value) => (StatusCode::OK, Json(value)),
        Err(e) => failure(MtrackError::ShapeError(format!("response encoding: {}", e))),
    }
}

fn verdict_label(validation: &Validation) -> &'static str {
    if validation.is_valid {
        "valid"
    } else {
        "invalid"
    }
}

fn outcome_label(status: ItemStatus) -> &'static str {
    status.as_str().unwrap_or("undetermined")
}

pub async fn health() -> JsonResponse {
    (StatusCode::OK, Json(json!({ "status": "ok", "version": MTRACK_VERSION })))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok(body) => ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response(),
        Err(e) => failure(MtrackError::ConfigError(format!("metrics: {}", e))).into_response(),
    }
}

// ============================================================================
// Shift
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ShiftQuery {
    pub at: Option<String>,
}

/// Plant wall time, either naive ISO or RFC 3339 read in its own offset.
fn parse_instant(at: &str) -> Result<NaiveDateTime, MtrackError> {
    let at = at.trim();
    at.parse::<NaiveDateTime>()
        .or_else(|_| DateTime::parse_from_rfc3339(at).map(|dt| dt.naive_local()))
        .map_err(|_| MtrackError::ShapeError(format!("unreadable timestamp '{}'", at)))
}

pub async fn shift(State(state): State<AppState>, Query(query): Query<ShiftQuery>) -> JsonResponse {
    let now = match query.at.as_deref() {
        Some(at) => match parse_instant(at) {
            Ok(now) => now,
            Err(e) => return failure(e),
        },
        None => state.clock.now(),
    };
    ok(&resolve(now))
}

// ============================================================================
// Quality
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ToleranceRequest {
    #[serde(flatten)]
    pub measurement: Measurement,
    #[serde(default)]
    pub profile: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToleranceResponse {
    outcome: ToleranceOutcome,
    status: ItemStatus,
    range: Option<AcceptableRange>,
    range_label: Option<String>,
}

pub async fn evaluate_tolerance(
    State(state): State<AppState>,
    Json(request): Json<ToleranceRequest>,
) -> JsonResponse {
    let profile = DisplayProfile::for_kind(request.profile.as_deref().unwrap_or("quality"));
    let range = AcceptableRange::from_fields(&request.measurement.standard_value, &request.measurement.tolerance);
    let check = QualityCheck::new(request.measurement).with_profile(profile);
    let outcome = check.outcome();

    let label = outcome.to_string();
    state.metrics.evaluations.with_label_values(&[label.as_str()]).inc();
    ok(&ToleranceResponse {
        outcome,
        status: outcome.to_status(),
        range,
        range_label: check.range_label(),
    })
}

#[derive(Debug, Deserialize)]
pub struct ChecklistRequest {
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

pub async fn checklist_readiness(Json(request): Json<ChecklistRequest>) -> JsonResponse {
    let sheet = ChecklistSheet::new(request.items);
    (
        StatusCode::OK,
        Json(json!({
            "groups": sheet.groups(),
            "readiness": sheet.readiness(),
            "tally": sheet.tally(),
        })),
    )
}

#[derive(Debug, Deserialize)]
pub struct ParameterRequest {
    #[serde(default)]
    pub items: Vec<ParameterItem>,
    #[serde(default)]
    pub profile: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluatedParameter<'a> {
    #[serde(flatten)]
    item: &'a ParameterItem,
    range_label: Option<String>,
}

pub async fn evaluate_parameters(
    State(state): State<AppState>,
    Json(request): Json<ParameterRequest>,
) -> JsonResponse {
    let profile = DisplayProfile::for_kind(request.profile.as_deref().unwrap_or("parameter"));
    let sheet = ParameterSheet::new(request.items);

    let items: Vec<EvaluatedParameter> = sheet
        .items()
        .iter()
        .map(|item| {
            state.metrics.evaluations.with_label_values(&[outcome_label(item.status)]).inc();
            EvaluatedParameter {
                item,
                range_label: profile.format_range(&item.standard_value, &item.tolerance, &item.unit),
            }
        })
        .collect();

    ok(&json!({
        "items": items,
        "readiness": sheet.readiness(),
        "tally": sheet.tally(),
    }))
}

// ============================================================================
// Validation
// ============================================================================

fn validation_response(state: &AppState, form: &str, validation: Validation) -> JsonResponse {
    state
        .metrics
        .validations
        .with_label_values(&[form, verdict_label(&validation)])
        .inc();
    ok(&validation)
}

pub async fn validate_machine(
    State(state): State<AppState>,
    Json(machine): Json<MachineIdentity>,
) -> JsonResponse {
    validation_response(&state, "machine", validate_machine_identity(&machine))
}

pub async fn validate_downtime(
    State(state): State<AppState>,
    Json(report): Json<DowntimeReport>,
) -> JsonResponse {
    validation_response(&state, "downtime", validate_downtime_report(&report))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[serde(default)]
    pub employee_id: String,
}

pub async fn validate_employee(
    State(state): State<AppState>,
    Json(request): Json<EmployeeRequest>,
) -> JsonResponse {
    validation_response(&state, "employee", validate_employee_id(&request.employee_id))
}

// ============================================================================
// Submissions
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCheckRequest {
    #[serde(default)]
    pub machine: MachineIdentity,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterCheckRequest {
    #[serde(default)]
    pub machine: MachineIdentity,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub items: Vec<ParameterItem>,
}

fn submission_response<T: Serialize>(state: &AppState, kind: &str, result: Result<T, MtrackError>) -> JsonResponse {
    let label = if result.is_ok() { "accepted" } else { "refused" };
    state.metrics.submissions.with_label_values(&[kind, label]).inc();
    match result {
        Ok(record) => ok(&record),
        Err(e) => failure(e),
    }
}

pub async fn submit_daily(
    State(state): State<AppState>,
    Json(request): Json<DailyCheckRequest>,
) -> JsonResponse {
    let gate = SubmissionGate::new(state.clock.clone());
    let sheet = ChecklistSheet::new(request.items);
    let result = gate.daily_check(&request.machine, &request.employee_id, &sheet);
    submission_response(&state, "daily", result)
}

pub async fn submit_parameters(
    State(state): State<AppState>,
    Json(request): Json<ParameterCheckRequest>,
) -> JsonResponse {
    let gate = SubmissionGate::new(state.clock.clone());
    let sheet = ParameterSheet::new(request.items);
    let result = gate.parameter_check(&request.machine, &request.employee_id, &sheet);
    submission_response(&state, "parameters", result)
}

pub async fn submit_downtime(
    State(state): State<AppState>,
    Json(report): Json<DowntimeReport>,
) -> JsonResponse {
    let gate = SubmissionGate::new(state.clock.clone());
    let result = gate.downtime(&report);
    submission_response(&state, "downtime", result)
}

// ============================================================================
// Reports
// ============================================================================

pub async fn report_periods(Json(history): Json<Value>) -> JsonResponse {
    let plan = plan_periods(Ok(history));
    (
        StatusCode::OK,
        Json(json!({
            "periods": plan.periods,
            "query": plan.periods.to_query(),
            "error": plan.error,
        })),
    )
}

/// Already-fetched backend responses for one machine's report
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub history: Value,
    pub catalogue: Value,
    #[serde(default)]
    pub attachments: Value,
    #[serde(default)]
    pub machine: MachineRecord,
    #[serde(default)]
    pub format: Option<String>,
}

/// Plan periods and assemble rows, counting the build by completeness.
fn assemble_request(state: &AppState, request: &mut ReportRequest) -> (PeriodPlan, ReportOutcome) {
    let plan = plan_periods(Ok(request.history.take()));
    let outcome = assemble(Ok(request.catalogue.take()), Ok(request.attachments.take()), &request.machine)
        .with_history(&plan);
    state
        .metrics
        .reports
        .with_label_values(&[if outcome.complete { "true" } else { "false" }])
        .inc();
    (plan, outcome)
}

pub async fn build_report(
    State(state): State<AppState>,
    Json(mut request): Json<ReportRequest>,
) -> JsonResponse {
    let (plan, outcome) = assemble_request(&state, &mut request);

    (
        StatusCode::OK,
        Json(json!({
            "periods": plan.periods,
            "rows": outcome.rows,
            "summary": outcome.summary,
            "complete": outcome.complete,
            "error": outcome.error,
        })),
    )
}

pub async fn render_report(
    State(state): State<AppState>,
    Json(mut request): Json<ReportRequest>,
) -> Response {
    let (plan, outcome) = assemble_request(&state, &mut request);
    let report = PrintableReport::new(outcome, request.machine, &plan.periods, state.clock.now());
    match request.format.as_deref() {
        Some("text") => match state.renderer.render_text(&report) {
            Ok(text) => ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response(),
            Err(e) => failure(e).into_response(),
        },
        _ => match state.renderer.render_html(&report) {
            Ok(html) => Html(html).into_response(),
            Err(e) => failure(e).into_response(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant() {
        let naive = parse_instant("2024-01-01T02:00:00").unwrap();
        assert_eq!(naive.to_string(), "2024-01-01 02:00:00");

        let offset = parse_instant("2024-01-01T18:30:00+07:00").unwrap();
        assert_eq!(offset.to_string(), "2024-01-01 18:30:00");

        assert!(matches!(parse_instant("yesterday"), Err(MtrackError::ShapeError(_))));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&MtrackError::NotReady("x".into())), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(&MtrackError::ShapeError("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&MtrackError::UpstreamError("x".into())), StatusCode::BAD_GATEWAY);
    }
}
