use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use validator::Validate;

use super::{ActiveStatus, Resource};
use crate::filter::Searchable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_unit: Option<String>,
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub status: ActiveStatus,
}

impl Searchable for Location {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.address.as_str(),
            self.city.as_str(),
            self.business_unit.as_deref().unwrap_or(""),
        ]
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "status" => Some(Cow::Borrowed(self.status.as_ref())),
            "city" => Some(Cow::Borrowed(self.city.as_str())),
            "businessUnit" => self.business_unit.as_deref().map(Cow::Borrowed),
            _ => None,
        }
    }
}

impl Resource for Location {
    const COLLECTION: &'static str = "locations";

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        vec![
            Location {
                id: "loc-1".to_string(),
                name: "Downtown Office".to_string(),
                address: "100 Main Street".to_string(),
                city: "Springfield".to_string(),
                business_unit: Some("Corporate".to_string()),
                manager: "Sarah Williams".to_string(),
                status: ActiveStatus::Active,
            },
            Location {
                id: "loc-2".to_string(),
                name: "North Warehouse".to_string(),
                address: "2200 Industrial Pkwy".to_string(),
                city: "Shelbyville".to_string(),
                business_unit: None,
                manager: "Mike Johnson".to_string(),
                status: ActiveStatus::Active,
            },
        ]
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.address, self.city)?;
        if let Some(unit) = &self.business_unit {
            write!(f, " {}", unit)?;
        }
        write!(f, " [{}]", self.status)
    }
}
