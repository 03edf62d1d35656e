use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};
use validator::Validate;

use super::Resource;
use crate::filter::Searchable;
use crate::inspection::{self, InspectionBadge};

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
pub enum VehicleStatus {
    #[default]
    Operational,
    NeedsRepair,
    OutOfService,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    #[validate(length(min = 1, message = "Make is required"))]
    pub make: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: u16,
    #[validate(length(min = 1, message = "License plate is required"))]
    pub license_plate: String,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub mileage: u32,
    /// Date string of the next mandatory inspection; may be empty.
    #[serde(default)]
    pub next_inspection: String,
}

impl Vehicle {
    pub fn inspection_badge(&self, today: NaiveDate) -> Option<InspectionBadge> {
        inspection::inspection_badge(&self.next_inspection, today)
    }
}

impl Searchable for Vehicle {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.make.as_str(),
            self.model.as_str(),
            self.license_plate.as_str(),
            self.assigned_to.as_deref().unwrap_or(""),
        ]
    }

    fn field_value(&self, field: &str) -> Option<Cow<'_, str>> {
        match field {
            "status" => Some(Cow::Borrowed(self.status.as_ref())),
            "make" => Some(Cow::Borrowed(self.make.as_str())),
            "year" => Some(Cow::Owned(self.year.to_string())),
            _ => None,
        }
    }
}

impl Resource for Vehicle {
    const COLLECTION: &'static str = "vehicles";
    const DELETABLE: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn defaults() -> Vec<Self> {
        vec![
            Vehicle {
                id: "veh-1".to_string(),
                make: "Ford".to_string(),
                model: "Transit".to_string(),
                year: 2021,
                license_plate: "OPS-1042".to_string(),
                status: VehicleStatus::Operational,
                assigned_to: Some("Mike Johnson".to_string()),
                mileage: 38_250,
                next_inspection: "2024-09-30".to_string(),
            },
            Vehicle {
                id: "veh-2".to_string(),
                make: "Toyota".to_string(),
                model: "Hilux".to_string(),
                year: 2019,
                license_plate: "OPS-2210".to_string(),
                status: VehicleStatus::NeedsRepair,
                assigned_to: None,
                mileage: 91_400,
                next_inspection: "2024-05-01".to_string(),
            },
            Vehicle {
                id: "veh-3".to_string(),
                make: "Chevrolet".to_string(),
                model: "Express".to_string(),
                year: 2022,
                license_plate: "OPS-3307".to_string(),
                status: VehicleStatus::Operational,
                assigned_to: Some("Sarah Williams".to_string()),
                mileage: 12_800,
                next_inspection: String::new(),
            },
        ]
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}) [{}] {} mi",
            self.year, self.make, self.model, self.license_plate, self.status, self.mileage
        )?;
        if let Some(driver) = &self.assigned_to {
            write!(f, " -> {}", driver)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_kebab_case() {
        let value = serde_json::to_value(&Vehicle::defaults()[1]).unwrap();
        assert_eq!(value["status"], "needs-repair");
        assert_eq!(value["licensePlate"], "OPS-2210");
    }

    #[test]
    fn empty_inspection_date_has_no_badge() {
        let vehicle = &Vehicle::defaults()[2];
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(vehicle.inspection_badge(today), None);
    }

    #[test]
    fn unassigned_vehicle_is_still_searchable() {
        let vehicle = &Vehicle::defaults()[1];
        assert_eq!(vehicle.search_fields().last(), Some(&""));
    }
}
