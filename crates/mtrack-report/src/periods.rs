//! Inspection period selection
//!
//! Picks which periodic checklist variants to request from the catalogue.
//! The selection is never empty: with no flag set it falls back to daily.

use mtrack_core::InspectionHistoryFlags;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    SixMonths,
    Yearly,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
        Period::Quarterly,
        Period::SixMonths,
        Period::Yearly,
    ];

    /// Query flag understood by the catalogue endpoint
    pub fn flag(&self) -> &'static str {
        match self {
            Period::Daily => "is_daily",
            Period::Weekly => "is_weekly",
            Period::Monthly => "is_monthly",
            Period::Quarterly => "is_quarterly",
            Period::SixMonths => "is_6_months",
            Period::Yearly => "is_yearly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Daily => "Daily",
            Period::Weekly => "Weekly",
            Period::Monthly => "Monthly",
            Period::Quarterly => "Quarterly",
            Period::SixMonths => "6 Months",
            Period::Yearly => "Yearly",
        }
    }

    fn is_set(&self, flags: &InspectionHistoryFlags) -> bool {
        match self {
            Period::Daily => flags.is_daily,
            Period::Weekly => flags.is_weekly,
            Period::Monthly => flags.is_monthly,
            Period::Quarterly => flags.is_quarterly,
            Period::SixMonths => flags.is_6_months,
            Period::Yearly => flags.is_yearly,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A non-empty set of periods, serialised as `{"is_daily": true, ...}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSelection(Vec<Period>);

impl PeriodSelection {
    pub fn daily() -> Self {
        Self(vec![Period::Daily])
    }

    pub fn periods(&self) -> &[Period] {
        &self.0
    }

    pub fn contains(&self, period: Period) -> bool {
        self.0.contains(&period)
    }

    /// URL query form, e.g. `is_daily=true&is_monthly=true`
    pub fn to_query(&self) -> String {
        self.0
            .iter()
            .map(|p| format!("{}=true", p.flag()))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.0.iter().map(Period::label).collect()
    }
}

impl Default for PeriodSelection {
    fn default() -> Self {
        Self::daily()
    }
}

impl Serialize for PeriodSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for period in &self.0 {
            map.serialize_entry(period.flag(), &true)?;
        }
        map.end()
    }
}

/// Periods to request for a machine, given its last inspection record.
pub fn select_periods(history: Option<&InspectionHistoryFlags>) -> PeriodSelection {
    let selected: Vec<Period> = history
        .map(|flags| Period::ALL.into_iter().filter(|p| p.is_set(flags)).collect())
        .unwrap_or_default();

    if selected.is_empty() {
        PeriodSelection::daily()
    } else {
        PeriodSelection(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_history_defaults_to_daily() {
        let selection = select_periods(None);
        assert_eq!(selection.periods(), &[Period::Daily]);
        assert_eq!(serde_json::to_value(&selection).unwrap(), json!({ "is_daily": true }));
    }

    #[test]
    fn test_all_false_defaults_to_daily() {
        let selection = select_periods(Some(&InspectionHistoryFlags::default()));
        assert_eq!(serde_json::to_value(&selection).unwrap(), json!({ "is_daily": true }));
    }

    #[test]
    fn test_sparse_flags() {
        let flags = InspectionHistoryFlags {
            is_monthly: true,
            is_6_months: true,
            ..InspectionHistoryFlags::default()
        };
        let selection = select_periods(Some(&flags));
        assert_eq!(selection.periods(), &[Period::Monthly, Period::SixMonths]);
        assert!(!selection.contains(Period::Daily));
        assert_eq!(
            serde_json::to_value(&selection).unwrap(),
            json!({ "is_monthly": true, "is_6_months": true })
        );
        assert_eq!(selection.to_query(), "is_monthly=true&is_6_months=true");
    }
}
