use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use validator::Validate;

use super::{ActiveStatus, Resource};
use crate::filter::Searchable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub hire_date: String,
}

impl Searchable for Employee {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.department.as_str(),
            self.position.as_str(),
        ]
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "status" => Some(Cow::Borrowed(self.status.as_ref())),
            "department" => Some(Cow::Borrowed(self.department.as_str())),
            "location" => Some(Cow::Borrowed(self.location.as_str())),
            _ => None,
        }
    }
}

impl Resource for Employee {
    const COLLECTION: &'static str = "employees";

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        vec![
            Employee {
                id: "emp-1".to_string(),
                name: "Mike Johnson".to_string(),
                email: "mike.johnson@example.com".to_string(),
                phone: "555-0101".to_string(),
                department: "Facilities".to_string(),
                position: "Maintenance Technician".to_string(),
                status: ActiveStatus::Active,
                location: "Downtown Office".to_string(),
                hire_date: "2021-03-15".to_string(),
            },
            Employee {
                id: "emp-2".to_string(),
                name: "Sarah Williams".to_string(),
                email: "sarah.williams@example.com".to_string(),
                phone: "555-0102".to_string(),
                department: "Operations".to_string(),
                position: "Shift Supervisor".to_string(),
                status: ActiveStatus::Active,
                location: "North Warehouse".to_string(),
                hire_date: "2019-08-01".to_string(),
            },
            Employee {
                id: "emp-3".to_string(),
                name: "David Chen".to_string(),
                email: "david.chen@example.com".to_string(),
                phone: "555-0103".to_string(),
                department: "Security".to_string(),
                position: "Guard".to_string(),
                status: ActiveStatus::Inactive,
                location: "Downtown Office".to_string(),
                hire_date: "2022-11-20".to_string(),
            },
        ]
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> {} / {} [{}]",
            self.name, self.email, self.department, self.position, self.status
        )
    }
}
