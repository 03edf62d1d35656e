//! Property-based tests for list filtering.

mod common;

use opsdesk::filter::{self, FilterState, ALL};
use opsdesk::models::{ActiveStatus, Employee};
use proptest::prelude::*;
use rstest::rstest;

fn status_strategy() -> impl Strategy<Value = ActiveStatus> {
    prop_oneof![Just(ActiveStatus::Active), Just(ActiveStatus::Inactive)]
}

fn department_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Facilities"),
        Just("Operations"),
        Just("Security"),
        Just("Fleet")
    ]
    .prop_map(String::from)
}

fn employee_strategy() -> impl Strategy<Value = Employee> {
    (
        "[a-z]{1,8}",
        "[A-Z][a-z]{2,7} [A-Z][a-z]{2,9}",
        department_strategy(),
        status_strategy(),
    )
        .prop_map(|(id, name, department, status)| {
            common::employee(&id, &name, &department, status)
        })
}

fn state_strategy() -> impl Strategy<Value = FilterState> {
    (
        "[a-zA-Z ]{0,4}",
        prop_oneof![Just(ALL.to_string()), department_strategy()],
        prop_oneof![
            Just(ALL.to_string()),
            Just("active".to_string()),
            Just("inactive".to_string())
        ],
    )
        .prop_map(|(query, department, status)| {
            FilterState::new()
                .with_query(query)
                .with_filter("department", department)
                .with_filter("status", status)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn filtering_is_idempotent(
        records in prop::collection::vec(employee_strategy(), 0..24),
        state in state_strategy(),
    ) {
        let once = filter::apply_cloned(&records, &state);
        let twice = filter::apply_cloned(&once, &state);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn unconstrained_state_is_identity(
        records in prop::collection::vec(employee_strategy(), 0..24),
    ) {
        let state = FilterState::new()
            .with_filter("department", ALL)
            .with_filter("status", ALL);
        prop_assert!(state.is_unconstrained());
        prop_assert_eq!(filter::apply_cloned(&records, &state), records);
    }

    #[test]
    fn filters_combine_as_conjunction(
        records in prop::collection::vec(employee_strategy(), 0..24),
        state in state_strategy(),
    ) {
        let combined = filter::apply_cloned(&records, &state);

        let mut text_only = state.clone();
        text_only.filters.clear();
        let by_text = filter::apply_cloned(&records, &text_only);

        let mut dropdowns_only = state.clone();
        dropdowns_only.query.clear();
        let by_dropdowns = filter::apply_cloned(&records, &dropdowns_only);

        let intersection: Vec<Employee> = records
            .iter()
            .filter(|r| by_text.contains(r) && by_dropdowns.contains(r))
            .cloned()
            .collect();
        prop_assert_eq!(combined, intersection);
    }

    #[test]
    fn result_preserves_original_order(
        records in prop::collection::vec(employee_strategy(), 0..24),
        state in state_strategy(),
    ) {
        let positions: Vec<usize> = filter::apply(&records, &state)
            .into_iter()
            .map(|hit| {
                records
                    .iter()
                    .position(|r| std::ptr::eq(r, hit))
                    .expect("result borrows from the input")
            })
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[rstest]
#[case("MIKE")]
#[case("johnson")]
#[case("ike joh")]
#[case("mike.johnson@")]
#[case("")]
fn search_is_case_insensitive_substring(#[case] query: &str) {
    let records = common::roster();
    let state = FilterState::new().with_query(query);
    let names: Vec<String> = filter::apply(&records, &state)
        .into_iter()
        .map(|e| e.name.clone())
        .collect();
    assert!(names.contains(&"Mike Johnson".to_string()), "{query:?} missed");
}

#[rstest]
#[case("Facilities", "active", &["Mike Johnson"])]
#[case("Facilities", ALL, &["Mike Johnson", "Tom Baker"])]
#[case(ALL, "inactive", &["Tom Baker"])]
#[case("Fleet", ALL, &[])]
fn dropdowns_select_exact_values(
    #[case] department: &str,
    #[case] status: &str,
    #[case] expected: &[&str],
) {
    let records = common::roster();
    let state = FilterState::new()
        .with_filter("department", department)
        .with_filter("status", status);
    let names: Vec<&str> = filter::apply(&records, &state)
        .into_iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, expected);
}

#[test]
fn unknown_field_matches_nothing() {
    let records = common::roster();
    let state = FilterState::new().with_filter("shoeSize", "42");
    assert!(filter::apply(&records, &state).is_empty());
}
