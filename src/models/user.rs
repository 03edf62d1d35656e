use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};
use validator::Validate;

use super::{ActiveStatus, Resource};
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Employee,
}

/// A dashboard login, scoped to one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default)]
    pub tenant: String,
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "role" => Some(Cow::Borrowed(self.role.as_ref())),
            "status" => Some(Cow::Borrowed(self.status.as_ref())),
            "tenant" => Some(Cow::Borrowed(self.tenant.as_str())),
            _ => None,
        }
    }
}

impl Resource for User {
    const COLLECTION: &'static str = "users";
    const DELETABLE: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        vec![
            User {
                id: "user-1".to_string(),
                name: "Admin User".to_string(),
                email: "admin@example.com".to_string(),
                role: UserRole::Admin,
                status: ActiveStatus::Active,
                tenant: "acme".to_string(),
            },
            User {
                id: "user-2".to_string(),
                name: "Sarah Williams".to_string(),
                email: "sarah.williams@example.com".to_string(),
                role: UserRole::Manager,
                status: ActiveStatus::Active,
                tenant: "acme".to_string(),
            },
        ]
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> {} @ {} [{}]",
            self.name, self.email, self.role, self.tenant, self.status
        )
    }
}
