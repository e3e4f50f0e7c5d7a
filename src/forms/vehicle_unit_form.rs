//! VehicleUnitForm - Create/Edit Physical Units

use crate::domain::vehicle::{UnitStatus, VehicleUnit};
use crate::error::Result;
use crate::forms::{FieldErrors, put, text};
use crate::helpers::{move_down, move_up, remove_at};
use serde_json::{Map, Value, json};

const VIN_LEN: usize = 17;

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleUnitForm {
    pub id: Option<String>,
    pub vin: String,
    pub plate: String,
    pub odometer: String,
    pub color: String,
    pub status: String,
    pub model: String,
    pub branch: String,
    /// Photo URLs; the first is the cover
    pub photos: Vec<String>,
}

impl Default for VehicleUnitForm {
    fn default() -> Self {
        Self {
            id: None,
            vin: String::new(),
            plate: String::new(),
            odometer: String::new(),
            color: String::new(),
            status: UnitStatus::Available.label().to_string(),
            model: String::new(),
            branch: String::new(),
            photos: Vec::new(),
        }
    }
}

impl VehicleUnitForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_unit(unit: &VehicleUnit) -> Self {
        Self {
            id: (!unit.id.is_empty()).then(|| unit.id.clone()),
            vin: unit.vin.clone().unwrap_or_default(),
            plate: unit.plate.clone(),
            odometer: unit.odometer.to_display(),
            color: unit.color.clone().unwrap_or_default(),
            status: unit.status.label().to_string(),
            model: unit.model.id.clone(),
            branch: unit.branch.id.clone(),
            photos: unit.photos.clone(),
        }
    }

    /// Append a photo URL; blanks and duplicates are ignored
    pub fn add_photo(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() || self.photos.iter().any(|p| p == url) {
            return false;
        }
        self.photos.push(url.to_string());
        true
    }

    pub fn move_photo_up(&mut self, index: usize) -> bool {
        move_up(&mut self.photos, index)
    }

    pub fn move_photo_down(&mut self, index: usize) -> bool {
        move_down(&mut self.photos, index)
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<String> {
        remove_at(&mut self.photos, index)
    }

    pub fn to_payload(&self) -> Result<Value> {
        let mut errors = FieldErrors::default();
        let mut body = Map::new();

        if let Some(vin) = text(&self.vin) {
            let vin = vin.to_ascii_uppercase();
            let valid_chars = vin
                .chars()
                .all(|c| c.is_ascii_alphanumeric() && !matches!(c, 'I' | 'O' | 'Q'));
            if vin.chars().count() != VIN_LEN {
                errors.add("vin", format!("must be {VIN_LEN} characters"));
            } else if !valid_chars {
                errors.add("vin", "may only contain letters and digits, excluding I, O and Q");
            } else {
                body.insert("vin".into(), json!(vin));
            }
        }

        put(
            &mut body,
            "plate",
            errors.required("plate", &self.plate).map(|p| p.to_uppercase()),
        );

        if let Some(raw) = text(&self.odometer) {
            match raw.replace([',', '_'], "").parse::<u64>() {
                Ok(km) => {
                    body.insert("odometer".into(), json!(km));
                }
                Err(_) => errors.add("odometer", "must be a non-negative whole number"),
            }
        }

        put(&mut body, "color", text(&self.color));

        match UnitStatus::parse(&self.status) {
            UnitStatus::Other => {
                errors.add("status", format!("unknown status \"{}\"", self.status.trim()))
            }
            status => {
                body.insert("status".into(), json!(status.label()));
            }
        }

        put(&mut body, "model", errors.required("model", &self.model));
        put(&mut body, "branch", errors.required("branch", &self.branch));
        body.insert("photos".into(), json!(self.photos));

        errors.finish(Value::Object(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn unit() -> VehicleUnit {
        serde_json::from_value(json!({
            "_id": "u1",
            "vin": "1HGCM82633A004352",
            "licensePlate": "ab-123-cd",
            "mileage": "42,000",
            "status": "available",
            "vehicleModel": { "_id": "m1", "make": "Honda", "model": "Accord", "year": 2023 },
            "branchId": "b1",
            "images": ["https://cdn.test/a.jpg", "https://cdn.test/b.jpg"]
        }))
        .expect("unit")
    }

    #[test]
    fn edit_round_trip() {
        let form = VehicleUnitForm::from_unit(&unit());
        assert_eq!(form.model, "m1");
        assert_eq!(form.branch, "b1");
        assert_eq!(form.odometer, "42,000");

        let payload = form.to_payload().expect("payload");
        assert_eq!(payload["plate"], "AB-123-CD");
        assert_eq!(payload["odometer"], 42000);
        assert_eq!(payload["status"], "available");
        assert_eq!(payload["photos"][1], "https://cdn.test/b.jpg");
        assert!(payload.get("color").is_none());
    }

    #[test]
    fn required_and_format_errors() {
        let mut form = VehicleUnitForm::new();
        form.vin = "SHORTVIN".into();
        form.odometer = "-5".into();
        form.status = "stolen".into();
        match form.to_payload() {
            Err(Error::Validation { errors }) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, ["vin", "plate", "odometer", "status", "model", "branch"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn vin_rejects_ambiguous_letters() {
        let mut form = VehicleUnitForm::from_unit(&unit());
        form.vin = "1HGCM82633A00435O".into();
        let err = form.to_payload().expect_err("invalid");
        assert!(err.to_string().contains("vin"));
    }

    #[test]
    fn photos_reorder() {
        let mut form = VehicleUnitForm::from_unit(&unit());
        assert!(!form.add_photo("https://cdn.test/a.jpg"));
        assert!(form.add_photo(" https://cdn.test/c.jpg "));
        assert!(form.move_photo_up(2));
        assert_eq!(form.photos[1], "https://cdn.test/c.jpg");
        assert!(!form.move_photo_down(2));
        assert_eq!(form.remove_photo(0).as_deref(), Some("https://cdn.test/a.jpg"));
        assert_eq!(form.photos.len(), 2);
    }
}
