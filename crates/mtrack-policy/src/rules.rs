//! Gating rules for inspection forms
//!
//! Each rule returns a [`Validation`]. Multi-field rules short-circuit
//! and report only the first failing reason.

use lazy_static::lazy_static;
use regex::Regex;

use crate::forms::{present, DowntimeReport, MachineIdentity};
use crate::problem::ProblemType;
use crate::verdict::Validation;

/// Minimum trimmed length of a downtime description, in characters
pub const MIN_PROBLEM_DETAIL_CHARS: usize = 10;

lazy_static! {
    /// Employee IDs are exactly six ASCII digits
    static ref EMPLOYEE_ID: Regex = Regex::new(r"^[0-9]{6}$").unwrap();
}

/// All four machine fields must be present.
pub fn validate_machine_identity(machine: &MachineIdentity) -> Validation {
    let complete = present(&machine.machine_id)
        && present(&machine.machine_name)
        && present(&machine.machine_number)
        && present(&machine.machine_model);

    if complete {
        Validation::valid()
    } else {
        Validation::invalid("Machine information is incomplete, please scan the machine QR code again")
    }
}

/// Machine, then problem type, then description length.
pub fn validate_downtime_report(report: &DowntimeReport) -> Validation {
    if !present(&report.machine_id) {
        return Validation::invalid("Machine ID is required, please scan the machine QR code");
    }

    let problem_type = report.problem_type.trim();
    if problem_type.is_empty() {
        return Validation::invalid("Please select a problem type");
    }
    if let Err(e) = problem_type.parse::<ProblemType>() {
        return Validation::invalid(format!("Please select a valid problem type ({})", e));
    }

    if report.problem_detail.trim().chars().count() < MIN_PROBLEM_DETAIL_CHARS {
        return Validation::invalid(format!(
            "Problem description must be at least {} characters",
            MIN_PROBLEM_DETAIL_CHARS
        ));
    }

    Validation::valid()
}

/// Required, exactly six ASCII digits.
pub fn validate_employee_id(employee_id: &str) -> Validation {
    if employee_id.is_empty() {
        return Validation::invalid("Employee ID is required");
    }
    if !EMPLOYEE_ID.is_match(employee_id) {
        return Validation::invalid("Employee ID must be exactly 6 digits");
    }
    Validation::valid()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(machine_id: Option<&str>, problem_type: &str, detail: &str) -> DowntimeReport {
        DowntimeReport {
            machine_id: machine_id.map(str::to_string),
            problem_type: problem_type.to_string(),
            problem_detail: detail.to_string(),
        }
    }

    #[test]
    fn test_machine_identity() {
        let full = MachineIdentity::new("M-01", "Press 1", "P001", "AIDA-200");
        assert!(validate_machine_identity(&full).is_valid);

        let mut missing = full.clone();
        missing.machine_model = None;
        assert!(!validate_machine_identity(&missing).is_valid);

        let mut blank = full;
        blank.machine_name = Some("  ".to_string());
        assert!(!validate_machine_identity(&blank).is_valid);
    }

    #[test]
    fn test_downtime_order_of_checks() {
        // Everything wrong: the machine is reported first.
        let v = validate_downtime_report(&report(None, "", "short"));
        assert!(v.message().contains("Machine ID"));

        let v = validate_downtime_report(&report(Some("M-01"), "", "short"));
        assert_eq!(v.message(), "Please select a problem type");

        let v = validate_downtime_report(&report(Some("M-01"), "electrical", "short"));
        assert!(v.message().contains("at least 10"));

        let v = validate_downtime_report(&report(Some("M-01"), "electrical", "Motor overheated"));
        assert!(v.is_valid);
    }

    #[test]
    fn test_downtime_unknown_problem_type() {
        let v = validate_downtime_report(&report(Some("M-01"), "alien", "Motor overheated"));
        assert!(!v.is_valid);
        assert!(v.message().contains("valid problem type"));
    }

    #[test]
    fn test_detail_length_is_trimmed_and_counted_in_characters() {
        let v = validate_downtime_report(&report(Some("M-01"), "other", "   123456789   "));
        assert!(!v.is_valid);

        let v = validate_downtime_report(&report(Some("M-01"), "other", "1234567890"));
        assert!(v.is_valid);

        // Ten Thai characters are thirty bytes but still ten characters.
        let v = validate_downtime_report(&report(Some("M-01"), "other", "มอเตอร์ร้อ"));
        assert!(v.is_valid);
        let v = validate_downtime_report(&report(Some("M-01"), "other", "มอเตอร์"));
        assert!(!v.is_valid);
    }

    #[test]
    fn test_employee_id() {
        assert!(validate_employee_id("123456").is_valid);
        assert_eq!(validate_employee_id("").message(), "Employee ID is required");
        assert!(!validate_employee_id("12345").is_valid);
        assert!(!validate_employee_id("1234567").is_valid);
        assert!(!validate_employee_id("12a456").is_valid);
        assert!(!validate_employee_id("١٢٣٤٥٦").is_valid);
        assert!(!validate_employee_id(" 123456").is_valid);
    }
}
