//! Vehicle inspection due-date derivation.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Inspections due within this many days get a "due soon" badge.
pub const DUE_SOON_WINDOW_DAYS: i64 = 30;

/// Reads the calendar date out of a stored date string.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to the local date) and
/// naive `YYYY-MM-DDTHH:MM[:SS]` timestamps. Anything else is `None`.
pub fn parse_due_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.with_timezone(&Local).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|ts| ts.date())
}

/// Whole days from `today` until the due date, both taken at midnight.
///
/// Both instants sit on a midnight, so the ceiling of the millisecond difference
/// over one day is the calendar-day difference. Negative means overdue.
pub fn days_until(due: &str, today: NaiveDate) -> Option<i64> {
    parse_due_date(due).map(|due| due.signed_duration_since(today).num_days())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InspectionBadge {
    Overdue { days_overdue: i64 },
    DueSoon { days_left: i64 },
}

impl InspectionBadge {
    pub fn from_days(days: Option<i64>) -> Option<Self> {
        match days? {
            d if d < 0 => Some(InspectionBadge::Overdue { days_overdue: -d }),
            d if d <= DUE_SOON_WINDOW_DAYS => Some(InspectionBadge::DueSoon { days_left: d }),
            _ => None,
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, InspectionBadge::Overdue { .. })
    }
}

impl fmt::Display for InspectionBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectionBadge::Overdue { days_overdue: 1 } => write!(f, "Overdue by 1 day"),
            InspectionBadge::Overdue { days_overdue } => {
                write!(f, "Overdue by {} days", days_overdue)
            }
            InspectionBadge::DueSoon { days_left: 0 } => write!(f, "Due today"),
            InspectionBadge::DueSoon { days_left: 1 } => write!(f, "Due in 1 day"),
            InspectionBadge::DueSoon { days_left } => write!(f, "Due in {} days", days_left),
        }
    }
}

pub fn inspection_badge(due: &str, today: NaiveDate) -> Option<InspectionBadge> {
    InspectionBadge::from_days(days_until(due, today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(ymd(2024, 1, 1), Some(0))]
    #[case(ymd(2023, 12, 31), Some(1))]
    #[case(ymd(2024, 1, 2), Some(-1))]
    fn due_date_boundaries(#[case] today: NaiveDate, #[case] expected: Option<i64>) {
        assert_eq!(days_until("2024-01-01", today), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("not a date")]
    #[case("2024-02-30")]
    fn unparseable_dates_have_no_badge(#[case] input: &str) {
        let today = ymd(2024, 1, 1);
        assert_eq!(days_until(input, today), None);
        assert_eq!(inspection_badge(input, today), None);
    }

    #[test]
    fn time_of_day_is_ignored() {
        let today = ymd(2024, 3, 10);
        assert_eq!(days_until("2024-03-12T18:45", today), Some(2));
        assert_eq!(days_until("2024-03-12T00:00:01", today), Some(2));
    }

    #[test]
    fn crossing_a_dst_change_still_counts_days() {
        assert_eq!(days_until("2024-03-11", ymd(2024, 3, 9)), Some(2));
        assert_eq!(days_until("2024-11-04", ymd(2024, 11, 2)), Some(2));
    }

    #[rstest]
    #[case(-1, Some(InspectionBadge::Overdue { days_overdue: 1 }))]
    #[case(0, Some(InspectionBadge::DueSoon { days_left: 0 }))]
    #[case(30, Some(InspectionBadge::DueSoon { days_left: 30 }))]
    #[case(31, None)]
    fn badge_windows(#[case] days: i64, #[case] expected: Option<InspectionBadge>) {
        assert_eq!(InspectionBadge::from_days(Some(days)), expected);
    }

    #[test]
    fn badge_labels() {
        assert_eq!(
            InspectionBadge::Overdue { days_overdue: 3 }.to_string(),
            "Overdue by 3 days"
        );
        assert_eq!(InspectionBadge::DueSoon { days_left: 0 }.to_string(), "Due today");
        assert_eq!(
            InspectionBadge::DueSoon { days_left: 12 }.to_string(),
            "Due in 12 days"
        );
    }
}
