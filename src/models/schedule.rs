use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};
use validator::Validate;

use super::Resource;
use crate::filter::Searchable;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Shift {
    #[default]
    Morning,
    Afternoon,
    Night,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ScheduleStatus {
    #[default]
    Scheduled,
    Confirmed,
    Cancelled,
}

/// One shift assignment of an employee at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    #[validate(length(min = 1, message = "Employee is required"))]
    pub employee: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub shift: Shift,
    #[serde(default)]
    pub status: ScheduleStatus,
}

impl Searchable for Schedule {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.employee.as_str(), self.location.as_str()]
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "shift" => Some(Cow::Borrowed(self.shift.as_ref())),
            "status" => Some(Cow::Borrowed(self.status.as_ref())),
            "date" => Some(Cow::Borrowed(self.date.as_str())),
            "location" => Some(Cow::Borrowed(self.location.as_str())),
            _ => None,
        }
    }
}

impl Resource for Schedule {
    const COLLECTION: &'static str = "schedules";
    const DELETABLE: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        vec![
            Schedule {
                id: "sched-1".to_string(),
                employee: "Mike Johnson".to_string(),
                location: "Downtown Office".to_string(),
                date: "2024-06-03".to_string(),
                start_time: "07:00".to_string(),
                end_time: "15:00".to_string(),
                shift: Shift::Morning,
                status: ScheduleStatus::Confirmed,
            },
            Schedule {
                id: "sched-2".to_string(),
                employee: "Sarah Williams".to_string(),
                location: "North Warehouse".to_string(),
                date: "2024-06-03".to_string(),
                start_time: "23:00".to_string(),
                end_time: "07:00".to_string(),
                shift: Shift::Night,
                status: ScheduleStatus::Scheduled,
            },
        ]
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} {} @ {} ({}) [{}]",
            self.date,
            self.start_time,
            self.end_time,
            self.employee,
            self.location,
            self.shift,
            self.status
        )
    }
}
