#![no_main]

use libfuzzer_sys::fuzz_target;
use opsdesk::models::{Employee, Location, Schedule, Task, User, Vehicle};

fuzz_target!(|data: &[u8]| {
    // Malformed service payloads must be rejected, never panic
    let _ = serde_json::from_slice::<Vec<Task>>(data);
    let _ = serde_json::from_slice::<Vec<Employee>>(data);
    let _ = serde_json::from_slice::<Vec<Location>>(data);
    let _ = serde_json::from_slice::<Vec<Vehicle>>(data);
    let _ = serde_json::from_slice::<Vec<Schedule>>(data);
    let _ = serde_json::from_slice::<Vec<User>>(data);
});
