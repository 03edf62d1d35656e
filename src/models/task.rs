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
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Overdue,
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
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// A unit of field work. `location` and `assignee` hold display names copied
/// from the other collections, not references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: String,
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.location.as_str(),
            self.assignee.as_str(),
        ]
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "status" => Some(Cow::Borrowed(self.status.as_ref())),
            "priority" => Some(Cow::Borrowed(self.priority.as_ref())),
            "location" => Some(Cow::Borrowed(self.location.as_str())),
            "assignee" => Some(Cow::Borrowed(self.assignee.as_str())),
            _ => None,
        }
    }
}

impl Resource for Task {
    const COLLECTION: &'static str = "tasks";
    const DELETABLE: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        vec![
            Task {
                id: "task-1".to_string(),
                title: "Restock cleaning supplies".to_string(),
                description: "Refill the supply closet on the second floor".to_string(),
                location: "Downtown Office".to_string(),
                assignee: "Mike Johnson".to_string(),
                status: TaskStatus::Pending,
                priority: TaskPriority::Medium,
                due_date: "2024-06-15".to_string(),
            },
            Task {
                id: "task-2".to_string(),
                title: "Inspect fire extinguishers".to_string(),
                description: "Quarterly safety inspection of all extinguishers".to_string(),
                location: "North Warehouse".to_string(),
                assignee: "Sarah Williams".to_string(),
                status: TaskStatus::InProgress,
                priority: TaskPriority::High,
                due_date: "2024-06-10".to_string(),
            },
            Task {
                id: "task-3".to_string(),
                title: "Update visitor log".to_string(),
                description: String::new(),
                location: "Downtown Office".to_string(),
                assignee: "David Chen".to_string(),
                status: TaskStatus::Completed,
                priority: TaskPriority::Low,
                due_date: "2024-06-01".to_string(),
            },
        ]
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} / {}] @ {} -> {} (due {})",
            self.title, self.status, self.priority, self.location, self.assignee, self.due_date
        )
    }
}
