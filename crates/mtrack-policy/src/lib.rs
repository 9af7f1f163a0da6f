//! mtrack policy: form validation and submission gating
//!
//! ```text
//! form state → validators (first failure wins) → readiness → record
//!                    ↓                               ↓          ↓
//!               Validation                    SubmitReadiness  stamped with ShiftWindow
//! ```
//!
//! # Example
//!
//! ```
//! use mtrack_policy::{validate_employee_id, validate_downtime_report, DowntimeReport};
//!
//! assert!(validate_employee_id("004211").is_valid);
//! assert!(!validate_employee_id("4211").is_valid);
//!
//! let report = DowntimeReport {
//!     machine_id: Some("M-07".to_string()),
//!     problem_type: "electrical".to_string(),
//!     problem_detail: "Servo drive alarm 21".to_string(),
//! };
//! assert!(validate_downtime_report(&report).is_valid);
//! ```

pub mod forms;
pub mod problem;
pub mod rules;
pub mod submission;
pub mod verdict;

pub use forms::{DowntimeReport, MachineIdentity};
pub use problem::ProblemType;
pub use rules::{
    validate_downtime_report, validate_employee_id, validate_machine_identity,
    MIN_PROBLEM_DETAIL_CHARS,
};
pub use submission::{
    DailyCheckSubmission, DowntimeSubmission, ItemResult, ParameterCheckSubmission,
    ParameterResult, SubmissionGate, WindowStamp,
};
pub use verdict::Validation;
