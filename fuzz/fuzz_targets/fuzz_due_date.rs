#![no_main]

use arbitrary::Arbitrary;
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use opsdesk::inspection::{self, InspectionBadge};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    due: String,
    offset_days: i16,
}

fuzz_target!(|input: FuzzInput| {
    let base = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let today = base + chrono::Duration::days(i64::from(input.offset_days));

    let days = inspection::days_until(&input.due, today);
    let badge = inspection::inspection_badge(&input.due, today);

    // a badge needs a parseable date and agrees with the day count
    if days.is_none() {
        assert!(badge.is_none());
    }
    if let Some(InspectionBadge::Overdue { .. }) = badge {
        assert!(days.unwrap() < 0);
    }
});
