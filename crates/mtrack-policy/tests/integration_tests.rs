//! Integration tests for mtrack-policy.
//!
//! Drives the validators and the submission gate with form payloads shaped
//! the way the inspection pages post them.

use chrono::NaiveDateTime;
use mtrack_core::{ChecklistItem, FixedClock, ItemId, ItemStatus, MtrackError};
use mtrack_policy::{
    validate_downtime_report, validate_machine_identity, DowntimeReport, MachineIdentity,
    SubmissionGate,
};
use mtrack_quality::ChecklistSheet;
use serde_json::json;

fn clock(at: &str) -> FixedClock {
    FixedClock(NaiveDateTime::parse_from_str(at, "%Y-%m-%dT%H:%M:%S").unwrap())
}

#[test]
fn test_downtime_form_payload() {
    let report: DowntimeReport = serde_json::from_value(json!({
        "machineId": "M-12",
        "problemType": "pneumatic",
        "problemDetail": "Air leak at clamp valve"
    }))
    .unwrap();
    assert!(validate_downtime_report(&report).is_valid);

    let report: DowntimeReport = serde_json::from_value(json!({
        "machineId": "M-12",
        "problemType": "pneumatic",
        "problemDetail": "leak"
    }))
    .unwrap();
    let validation = validate_downtime_report(&report);
    assert!(!validation.is_valid);
    assert_eq!(
        serde_json::to_value(&validation).unwrap(),
        json!({ "isValid": false, "message": "Problem description must be at least 10 characters" })
    );
}

#[test]
fn test_machine_identity_from_qr_payload() {
    let machine: MachineIdentity = serde_json::from_value(json!({
        "machineId": "M-12", "machineName": "Injection 3", "machineNumber": "IM-003"
    }))
    .unwrap();
    assert!(!validate_machine_identity(&machine).is_valid);
}

#[test]
fn test_daily_check_end_to_end() {
    let items: Vec<ChecklistItem> = serde_json::from_value(json!([
        { "id": 1, "name": "Oil level", "groupName": "Lubrication" },
        { "id": 2, "name": "Safety guard", "groupName": "Safety" }
    ]))
    .unwrap();
    let mut sheet = ChecklistSheet::new(items);
    let machine = MachineIdentity::new("M-12", "Injection 3", "IM-003", "JSW-180");
    let gate = SubmissionGate::new(clock("2024-06-15T05:45:00"));

    sheet.set_status(&ItemId::from(1), ItemStatus::Pass).unwrap();
    sheet.set_status(&ItemId::from(2), ItemStatus::Fail).unwrap();

    let err = gate.daily_check(&machine, "100200", &sheet).unwrap_err();
    assert!(matches!(err, MtrackError::NotReady(_)));

    sheet.set_issue_detail(&ItemId::from(2), "Interlock switch loose").unwrap();
    let submission = gate.daily_check(&machine, "100200", &sheet).unwrap();

    let json = serde_json::to_value(&submission).unwrap();
    assert_eq!(json["machine_id"], "M-12");
    assert_eq!(json["shift"], "N");
    assert_eq!(json["date"], "2024-06-14");
    assert_eq!(json["results"][1]["status"], "fail");
    assert_eq!(json["results"][1]["issue_detail"], "Interlock switch loose");
    assert!(json["results"][0].get("issue_detail").is_none());
}
