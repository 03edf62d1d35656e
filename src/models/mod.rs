//! Record types of the dashboard's resource collections.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;
use validator::Validate;

use crate::filter::Searchable;

pub mod employee;
pub mod location;
pub mod schedule;
pub mod task;
pub mod user;
pub mod vehicle;

pub use employee::Employee;
pub use location::Location;
pub use schedule::{Schedule, ScheduleStatus, Shift};
pub use task::{Task, TaskPriority, TaskStatus};
pub use user::{User, UserRole};
pub use vehicle::{Vehicle, VehicleStatus};

/// A flat record stored in a named collection of the resource service.
pub trait Resource:
    Searchable + Validate + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Collection name on the resource service.
    const COLLECTION: &'static str;
    /// Whether pages expose a real delete. Resources that don't are retired
    /// by switching their status to inactive.
    const DELETABLE: bool = false;

    fn id(&self) -> &str;

    /// Records used to populate an empty collection on first load.
    fn defaults() -> Vec<Self>;
}

/// The resource collections the dashboard manages.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum ResourceKind {
    Users,
    Employees,
    Tasks,
    Locations,
    Vehicles,
    Schedules,
}

impl ResourceKind {
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Users => User::COLLECTION,
            ResourceKind::Employees => Employee::COLLECTION,
            ResourceKind::Tasks => Task::COLLECTION,
            ResourceKind::Locations => Location::COLLECTION,
            ResourceKind::Vehicles => Vehicle::COLLECTION,
            ResourceKind::Schedules => Schedule::COLLECTION,
        }
    }

    pub fn deletable(&self) -> bool {
        match self {
            ResourceKind::Users => User::DELETABLE,
            ResourceKind::Employees => Employee::DELETABLE,
            ResourceKind::Tasks => Task::DELETABLE,
            ResourceKind::Locations => Location::DELETABLE,
            ResourceKind::Vehicles => Vehicle::DELETABLE,
            ResourceKind::Schedules => Schedule::DELETABLE,
        }
    }
}

/// Active/inactive toggle shared by users, employees and locations.
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
pub enum ActiveStatus {
    #[default]
    Active,
    Inactive,
}

impl ActiveStatus {
    pub fn toggled(self) -> Self {
        match self {
            ActiveStatus::Active => ActiveStatus::Inactive,
            ActiveStatus::Inactive => ActiveStatus::Active,
        }
    }

    pub fn is_active(self) -> bool {
        self == ActiveStatus::Active
    }
}

/// Fresh client-side identifier for a record about to be created.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}
