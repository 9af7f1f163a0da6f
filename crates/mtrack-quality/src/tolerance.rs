//! Tolerance evaluation
//!
//! A measurement passes when it lies inside the closed interval
//! `[standard - tolerance, standard + tolerance]`. Input that cannot be
//! read as a finite number is never a failure: it is `Undetermined`.

use mtrack_core::{FieldValue, ItemStatus, Measurement};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::profile::DisplayProfile;

/// Outcome of comparing a measured value with its standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToleranceOutcome {
    Pass,
    Fail,
    Undetermined,
}

impl ToleranceOutcome {
    /// Item status implied by this outcome.
    pub fn to_status(self) -> ItemStatus {
        match self {
            ToleranceOutcome::Pass => ItemStatus::Pass,
            ToleranceOutcome::Fail => ItemStatus::Fail,
            ToleranceOutcome::Undetermined => ItemStatus::Unevaluated,
        }
    }
}

impl fmt::Display for ToleranceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ToleranceOutcome::Pass => write!(f, "pass"),
            ToleranceOutcome::Fail => write!(f, "fail"),
            ToleranceOutcome::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// Closed interval of accepted values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptableRange {
    pub min: f64,
    pub max: f64,
}

impl AcceptableRange {
    /// `None` when the tolerance is negative or either bound is not finite.
    pub fn new(standard: f64, tolerance: f64) -> Option<Self> {
        if tolerance < 0.0 {
            return None;
        }
        let range = Self {
            min: standard - tolerance,
            max: standard + tolerance,
        };
        (range.min.is_finite() && range.max.is_finite()).then_some(range)
    }

    pub fn from_fields(standard: &FieldValue, tolerance: &FieldValue) -> Option<Self> {
        Self::new(standard.as_finite()?, tolerance.as_finite()?)
    }

    /// Inclusive at both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Decide pass/fail for `value` against `standard ± tolerance`.
pub fn evaluate(value: &FieldValue, standard: &FieldValue, tolerance: &FieldValue) -> ToleranceOutcome {
    let Some(measured) = value.as_finite() else {
        return ToleranceOutcome::Undetermined;
    };
    let Some(range) = AcceptableRange::from_fields(standard, tolerance) else {
        return ToleranceOutcome::Undetermined;
    };

    if range.contains(measured) {
        ToleranceOutcome::Pass
    } else {
        ToleranceOutcome::Fail
    }
}

/// Evaluate a full measurement record.
pub fn evaluate_measurement(measurement: &Measurement) -> ToleranceOutcome {
    evaluate(
        &measurement.value,
        &measurement.standard_value,
        &measurement.tolerance,
    )
}

/// A quality-check reading together with the profile used to present it.
#[derive(Debug, Clone)]
pub struct QualityCheck {
    pub measurement: Measurement,
    pub profile: DisplayProfile,
}

impl QualityCheck {
    pub fn new(measurement: Measurement) -> Self {
        Self {
            measurement,
            profile: DisplayProfile::quality(),
        }
    }

    pub fn with_profile(mut self, profile: DisplayProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn outcome(&self) -> ToleranceOutcome {
        evaluate_measurement(&self.measurement)
    }

    /// Acceptable-range label, or `None` when the standard or tolerance
    /// cannot be read.
    pub fn range_label(&self) -> Option<String> {
        self.profile.format_range(
            &self.measurement.standard_value,
            &self.measurement.tolerance,
            &self.measurement.unit,
        )
    }
}
