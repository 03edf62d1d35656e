#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use opsdesk::filter::{self, FilterState};
use opsdesk::models::Task;
use opsdesk::Resource;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    query: String,
    field: String,
    value: String,
}

fuzz_target!(|input: FuzzInput| {
    let tasks = Task::defaults();
    let state = FilterState::new()
        .with_query(input.query)
        .with_filter(input.field, input.value);

    let once = filter::apply_cloned(&tasks, &state);
    let twice = filter::apply_cloned(&once, &state);
    assert_eq!(once, twice);
    assert!(once.len() <= tasks.len());
});
