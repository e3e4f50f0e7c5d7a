//! Vehicle - Models and Physical Units

use serde::{Deserialize, Serialize};

use crate::domain::refs::{EntityRef, deserialize_id};
use crate::domain::value::FlexNumber;

/// Vehicle class used for rate plan scoping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Economy,
    Compact,
    Midsize,
    Fullsize,
    Suv,
    Van,
    Luxury,
    Truck,
    #[default]
    #[serde(other)]
    Other,
}

impl VehicleClass {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleClass::Economy => "Economy",
            VehicleClass::Compact => "Compact",
            VehicleClass::Midsize => "Midsize",
            VehicleClass::Fullsize => "Full-size",
            VehicleClass::Suv => "SUV",
            VehicleClass::Van => "Van",
            VehicleClass::Luxury => "Luxury",
            VehicleClass::Truck => "Truck",
            VehicleClass::Other => "Other",
        }
    }

    /// Wire name, e.g. "fullsize"
    pub fn slug(&self) -> &'static str {
        match self {
            VehicleClass::Economy => "economy",
            VehicleClass::Compact => "compact",
            VehicleClass::Midsize => "midsize",
            VehicleClass::Fullsize => "fullsize",
            VehicleClass::Suv => "suv",
            VehicleClass::Van => "van",
            VehicleClass::Luxury => "luxury",
            VehicleClass::Truck => "truck",
            VehicleClass::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        serde_json::from_value(serde_json::Value::String(s.trim().to_lowercase()))
            .unwrap_or_default()
    }
}

/// A make/model/year specification shared by many units
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleModel {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    #[serde(alias = "vehicleClass", alias = "category")]
    pub class: VehicleClass,
    pub seats: Option<u8>,
    pub doors: Option<u8>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    pub daily_rate: FlexNumber,
}

impl VehicleModel {
    /// "2022 Toyota Corolla"
    pub fn display_name(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(year) = self.year {
            parts.push(year.to_string());
        }
        if !self.make.is_empty() {
            parts.push(self.make.clone());
        }
        if !self.model.is_empty() {
            parts.push(self.model.clone());
        }
        parts.join(" ")
    }
}

/// Operational status of a unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    Available,
    Rented,
    Maintenance,
    Retired,
    #[default]
    #[serde(other)]
    Other,
}

impl UnitStatus {
    pub fn label(&self) -> &'static str {
        match self {
            UnitStatus::Available => "available",
            UnitStatus::Rented => "rented",
            UnitStatus::Maintenance => "maintenance",
            UnitStatus::Retired => "retired",
            UnitStatus::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        serde_json::from_value(serde_json::Value::String(s.trim().to_lowercase()))
            .unwrap_or_default()
    }
}

/// A specific physical vehicle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleUnit {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    pub vin: Option<String>,
    #[serde(alias = "licensePlate", alias = "plateNumber")]
    pub plate: String,
    #[serde(alias = "mileage")]
    pub odometer: FlexNumber,
    pub color: Option<String>,
    pub status: UnitStatus,
    #[serde(alias = "vehicleModel", alias = "modelId", alias = "vehicleModelId")]
    pub model: EntityRef,
    #[serde(alias = "branchId")]
    pub branch: EntityRef,
    #[serde(alias = "images")]
    pub photos: Vec<String>,
}

impl VehicleUnit {
    /// Plate with the model label when known, e.g. "AB-12-CD (2022 Toyota Corolla)"
    pub fn label(&self) -> String {
        match &self.model.label {
            Some(model) => format!("{} ({})", self.plate, model),
            None => self.plate.clone(),
        }
    }

    /// First photo, used as the thumbnail
    pub fn cover_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }
}
