//! Integration tests for mtrack-quality.
//!
//! These exercise sheets the way the inspection forms drive them: items
//! arrive as backend JSON, operators toggle or measure, and the form asks
//! whether it may submit.

use mtrack_core::{ChecklistItem, ItemId, ItemStatus, Measurement, ParameterItem};
use mtrack_quality::{
    evaluate, evaluate_measurement, ChecklistSheet, DisplayProfile, ParameterSheet, QualityCheck,
    ToleranceOutcome,
};
use serde_json::json;

fn checklist_from_backend() -> Vec<ChecklistItem> {
    serde_json::from_value(json!([
        { "id": 11, "name": "Check oil level", "thaiName": "ตรวจระดับน้ำมัน",
          "groupName": "Lubrication", "groupThaiName": "การหล่อลื่น", "status": null },
        { "id": 12, "name": "Check belt tension", "thaiName": "ตรวจความตึงสายพาน",
          "groupName": "Drive", "groupThaiName": "ระบบขับเคลื่อน", "status": null },
        { "id": 13, "name": "Clean oil filter", "thaiName": "ทำความสะอาดไส้กรอง",
          "groupName": "Lubrication", "groupThaiName": "การหล่อลื่น", "status": null }
    ]))
    .unwrap()
}

// =============================================================================
// Tolerance scenarios
// =============================================================================

#[test]
fn test_boundary_scenarios() {
    assert_eq!(evaluate(&"10.05".into(), &10.0.into(), &0.05.into()), ToleranceOutcome::Pass);
    assert_eq!(evaluate(&"10.06".into(), &10.0.into(), &0.05.into()), ToleranceOutcome::Fail);
}

#[test]
fn test_measurement_from_form_json() {
    let m: Measurement = serde_json::from_value(json!({
        "value": "4.98", "standardValue": "5", "tolerance": 0.02, "unit": "mm"
    }))
    .unwrap();
    assert_eq!(evaluate_measurement(&m), ToleranceOutcome::Pass);

    let m: Measurement = serde_json::from_value(json!({
        "value": "", "standardValue": 5, "tolerance": 0.02, "unit": "mm"
    }))
    .unwrap();
    assert_eq!(evaluate_measurement(&m), ToleranceOutcome::Undetermined);
}

#[test]
fn test_quality_and_parameter_present_ranges_differently() {
    let measurement = Measurement {
        value: "1.2".into(),
        standard_value: "1.25".into(),
        tolerance: "0.1".into(),
        unit: "mm".to_string(),
    };

    let quality = QualityCheck::new(measurement.clone());
    assert_eq!(quality.range_label().as_deref(), Some("1.150 - 1.350 mm"));

    let parameter = QualityCheck::new(measurement).with_profile(DisplayProfile::parameter());
    assert_eq!(parameter.range_label().as_deref(), Some("1.25 ± 0.1 mm"));

    assert_eq!(quality.outcome(), parameter.outcome());
}

// =============================================================================
// Checklist flow
// =============================================================================

#[test]
fn test_checklist_toggle_flow() {
    let mut sheet = ChecklistSheet::new(checklist_from_backend());

    let groups = sheet.groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "Lubrication");
    assert_eq!(groups[0].thai_name, "การหล่อลื่น");
    assert_eq!(groups[0].items.len(), 2);

    sheet.set_status(&ItemId::from(11), ItemStatus::Pass).unwrap();
    sheet.set_status(&ItemId::from(12), ItemStatus::Pass).unwrap();
    assert_eq!(sheet.readiness().pending, vec![ItemId::from(13)]);

    // null -> fail -> (empty detail) -> (detail supplied)
    let target = ItemId::from(13);
    sheet.set_status(&target, ItemStatus::Fail).unwrap();
    assert!(!sheet.is_submit_ready());
    sheet.set_issue_detail(&target, "").unwrap();
    assert!(!sheet.is_submit_ready());
    sheet.set_issue_detail(&target, "Filter clogged with chips").unwrap();
    assert!(sheet.is_submit_ready());

    let tally = sheet.tally();
    assert_eq!((tally.pass, tally.fail, tally.pending), (2, 1, 0));
}

// =============================================================================
// Parameter flow
// =============================================================================

#[test]
fn test_parameter_sheet_from_backend() {
    let items: Vec<ParameterItem> = serde_json::from_value(json!([
        { "id": "p1", "item": "Hydraulic pressure", "thaiItem": "แรงดันไฮดรอลิก",
          "standardValue": 140, "tolerance": 5, "unit": "bar" },
        { "id": "p2", "item": "Mold temperature", "thaiItem": "อุณหภูมิแม่พิมพ์",
          "standardValue": "80", "tolerance": "abc", "unit": "°C" }
    ]))
    .unwrap();

    let mut sheet = ParameterSheet::new(items);
    assert_eq!(sheet.record_measurement(&ItemId::from("p1"), "146").unwrap(), ToleranceOutcome::Fail);

    // A malformed tolerance never produces a failure.
    assert_eq!(
        sheet.record_measurement(&ItemId::from("p2"), "80").unwrap(),
        ToleranceOutcome::Undetermined
    );

    let readiness = sheet.readiness();
    assert!(!readiness.ready);
    assert_eq!(readiness.missing_detail, vec![ItemId::from("p1")]);
    assert_eq!(readiness.pending, vec![ItemId::from("p2")]);
}
