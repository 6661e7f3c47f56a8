//! Calendar-month windows for "this month" / "last month" leaderboards.
//!
//! Windows are computed in UTC and keyed on an order's `updated_at`.

use chrono::{DateTime, Datelike, Days, NaiveTime, TimeDelta, Utc};
use serde::Serialize;

/// A span of time. The start is always inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Whether `end` itself is inside the window.
    pub end_inclusive: bool,
}

impl TimeWindow {
    /// Returns true if `at` falls inside the window.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if at < self.start {
            return false;
        }
        if self.end_inclusive {
            at <= self.end
        } else {
            at < self.end
        }
    }
}

/// Which calendar month a leaderboard covers, relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthWindow {
    /// First instant of the current month through `now`, both inclusive.
    Current,
    /// The whole previous calendar month.
    Previous,
}

impl MonthWindow {
    /// Resolve the window against `now`.
    #[must_use]
    pub fn bounds(self, now: DateTime<Utc>) -> TimeWindow {
        let this_month = start_of_month(now);
        match self {
            Self::Current => TimeWindow {
                start: this_month,
                end: now,
                end_inclusive: true,
            },
            Self::Previous => TimeWindow {
                start: start_of_month(this_month - TimeDelta::days(1)),
                end: this_month,
                end_inclusive: false,
            },
        }
    }
}

/// Midnight UTC on the first day of `at`'s month.
#[must_use]
pub fn start_of_month(at: DateTime<Utc>) -> DateTime<Utc> {
    let first = at.date_naive() - Days::new(u64::from(at.day0()));
    first.and_time(NaiveTime::MIN).and_utc()
}
