//! Shift buckets
//!
//! Maps a wall-clock instant to the working shift it belongs to:
//!
//! ```text
//! 00:00 ─── 06:00 ──────────── 18:00 ─── 24:00
//!   N (prev day) │      D (today)   │  N (today)
//! ```
//!
//! The early-morning band belongs to the night shift that started the
//! previous evening, so its bucket date is the previous calendar day.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::Clock;

/// First hour of the day shift
pub const DAY_SHIFT_START_HOUR: u32 = 6;
/// First hour of the evening half of the night shift
pub const NIGHT_SHIFT_START_HOUR: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    #[serde(rename = "D")]
    Day,
    #[serde(rename = "N")]
    Night,
}

impl Shift {
    pub fn code(&self) -> &'static str {
        match self {
            Shift::Day => "D",
            Shift::Night => "N",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The shift/date bucket a record is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftWindow {
    pub shift: Shift,
    pub date: NaiveDate,
    pub checked_at: NaiveDateTime,
}

/// Resolve the shift window for `now`.
pub fn resolve(now: NaiveDateTime) -> ShiftWindow {
    let hour = now.hour();
    let today = now.date();

    let (shift, date) = if hour < DAY_SHIFT_START_HOUR {
        (Shift::Night, today.pred_opt().unwrap_or(today))
    } else if hour < NIGHT_SHIFT_START_HOUR {
        (Shift::Day, today)
    } else {
        (Shift::Night, today)
    };

    ShiftWindow {
        shift,
        date,
        checked_at: now,
    }
}

/// Resolves shift windows against an injected clock.
#[derive(Debug, Clone)]
pub struct ShiftResolver<C: Clock> {
    clock: C,
}

impl<C: Clock> ShiftResolver<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn resolve_now(&self) -> ShiftWindow {
        resolve(self.clock.now())
    }

    pub fn current_shift(&self) -> Shift {
        self.resolve_now().shift
    }
}
