use chrono::NaiveDate;
use serde::Serialize;

use crate::filter::Tally;
use crate::models::{Employee, Location, Schedule, Task, Vehicle};

/// Borrowed views of the collections the overview page reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Collections<'a> {
    pub tasks: &'a [Task],
    pub employees: &'a [Employee],
    pub locations: &'a [Location],
    pub vehicles: &'a [Vehicle],
    pub schedules: &'a [Schedule],
}

/// Overview widget counts, always over unfiltered collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub tasks_by_status: Tally,
    pub vehicles_by_status: Tally,
    pub active_employees: usize,
    pub total_employees: usize,
    pub active_locations: usize,
    pub shifts_today: usize,
    pub inspections_overdue: usize,
    pub inspections_due_soon: usize,
}

impl DashboardSummary {
    pub fn from_collections(collections: Collections<'_>, today: NaiveDate) -> Self {
        let today_str = today.format("%Y-%m-%d").to_string();

        let (inspections_overdue, inspections_due_soon) = collections
            .vehicles
            .iter()
            .filter_map(|v| v.inspection_badge(today))
            .fold((0, 0), |(overdue, soon), badge| {
                if badge.is_overdue() {
                    (overdue + 1, soon)
                } else {
                    (overdue, soon + 1)
                }
            });

        Self {
            tasks_by_status: Tally::by_field(collections.tasks, "status"),
            vehicles_by_status: Tally::by_field(collections.vehicles, "status"),
            active_employees: collections
                .employees
                .iter()
                .filter(|e| e.status.is_active())
                .count(),
            total_employees: collections.employees.len(),
            active_locations: collections
                .locations
                .iter()
                .filter(|l| l.status.is_active())
                .count(),
            shifts_today: collections
                .schedules
                .iter()
                .filter(|s| s.date == today_str)
                .count(),
            inspections_overdue,
            inspections_due_soon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Resource;

    #[test]
    fn summary_over_default_data() {
        let tasks = Task::defaults();
        let employees = Employee::defaults();
        let locations = Location::defaults();
        let vehicles = Vehicle::defaults();
        let schedules = Schedule::defaults();

        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let summary = DashboardSummary::from_collections(
            Collections {
                tasks: &tasks,
                employees: &employees,
                locations: &locations,
                vehicles: &vehicles,
                schedules: &schedules,
            },
            today,
        );

        assert_eq!(summary.tasks_by_status.count("in-progress"), 1);
        assert_eq!(summary.vehicles_by_status.count("operational"), 2);
        assert_eq!(summary.vehicles_by_status.count("needs-repair"), 1);
        assert_eq!(summary.active_employees, 2);
        assert_eq!(summary.total_employees, 3);
        assert_eq!(summary.active_locations, 2);
        assert_eq!(summary.shifts_today, 2);
        // veh-2 was due 2024-05-01, veh-1 is 119 days out, veh-3 has no date
        assert_eq!(summary.inspections_overdue, 1);
        assert_eq!(summary.inspections_due_soon, 0);
    }

    #[test]
    fn empty_collections() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let summary = DashboardSummary::from_collections(Collections::default(), today);
        assert!(summary.tasks_by_status.is_empty());
        assert_eq!(summary.inspections_overdue, 0);
    }
}
