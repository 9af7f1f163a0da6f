//! mtrack quality: measurement and checklist evaluation
//!
//! Decides pass/fail for measured values against a standard and a
//! symmetric tolerance, aggregates checklist and parameter sheets, and
//! answers whether a sheet is ready to be submitted.
//!
//! # Example
//!
//! ```
//! use mtrack_quality::{evaluate, ToleranceOutcome};
//!
//! let outcome = evaluate(&"10.05".into(), &10.0.into(), &0.05.into());
//! assert_eq!(outcome, ToleranceOutcome::Pass);
//!
//! let outcome = evaluate(&"".into(), &10.0.into(), &0.05.into());
//! assert_eq!(outcome, ToleranceOutcome::Undetermined);
//! ```

pub mod checklist;
pub mod gate;
pub mod parameter;
pub mod profile;
pub mod tolerance;

pub use checklist::{group, ChecklistGroup, ChecklistSheet};
pub use gate::{assess, tally, InspectionEntry, SubmitReadiness, Tally};
pub use parameter::ParameterSheet;
pub use profile::DisplayProfile;
pub use tolerance::{evaluate, evaluate_measurement, AcceptableRange, QualityCheck, ToleranceOutcome};
