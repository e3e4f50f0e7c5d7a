//! Reservation - Customer Bookings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::refs::{EntityRef, deserialize_id};
use crate::domain::value::FlexNumber;

/// Booking lifecycle as reported by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    #[serde(alias = "checkedOut", alias = "active")]
    CheckedOut,
    #[serde(alias = "completed")]
    Returned,
    #[serde(alias = "canceled")]
    Cancelled,
    #[serde(alias = "noShow")]
    NoShow,
    #[default]
    #[serde(other)]
    Other,
}

impl ReservationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::CheckedOut => "checked_out",
            ReservationStatus::Returned => "returned",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::NoShow => "no_show",
            ReservationStatus::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        serde_json::from_value(serde_json::Value::String(s.trim().to_lowercase()))
            .unwrap_or_default()
    }
}

/// Customer contact embedded in a reservation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    #[serde(alias = "fullName")]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reservation {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(alias = "code", alias = "reservationNumber")]
    pub confirmation_code: Option<String>,
    pub customer: Customer,
    #[serde(alias = "pickupBranchId", alias = "pickupLocation")]
    pub pickup_branch: EntityRef,
    #[serde(alias = "returnBranchId", alias = "dropoffBranch", alias = "returnLocation")]
    pub return_branch: EntityRef,
    #[serde(alias = "pickupDate", alias = "startDate")]
    pub pickup_at: Option<DateTime<Utc>>,
    #[serde(alias = "returnDate", alias = "endDate")]
    pub return_at: Option<DateTime<Utc>>,
    #[serde(alias = "vehicleUnit", alias = "unitId", alias = "vehicleUnitId")]
    pub unit: EntityRef,
    #[serde(alias = "vehicleModel", alias = "modelId", alias = "vehicleModelId")]
    pub model: EntityRef,
    #[serde(alias = "ratePlanId")]
    pub rate_plan: EntityRef,
    pub status: ReservationStatus,
    #[serde(alias = "totalPrice", alias = "totalAmount")]
    pub total: FlexNumber,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Confirmation code, falling back to the id
    pub fn code(&self) -> &str {
        self.confirmation_code
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.id)
    }

    /// Whether the rental window intersects `[from, to]`
    pub fn overlaps(&self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> bool {
        let starts_before_end = match (self.pickup_at, to) {
            (Some(pickup), Some(to)) => pickup <= to,
            _ => true,
        };
        let ends_after_start = match (self.return_at.or(self.pickup_at), from) {
            (Some(ret), Some(from)) => ret >= from,
            _ => true,
        };
        starts_before_end && ends_after_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_reservation_aliases() {
        let r: Reservation = serde_json::from_value(json!({
            "_id": "r1",
            "reservationNumber": "RSV-1001",
            "customer": { "fullName": "Ana Silva", "email": "ana@test.io" },
            "pickupBranchId": "b1",
            "returnBranch": { "_id": "b2", "name": "Harbor" },
            "pickupDate": "2026-05-01T10:00:00Z",
            "returnDate": "2026-05-04T10:00:00Z",
            "status": "canceled",
            "totalPrice": "210.00"
        }))
        .expect("reservation");
        assert_eq!(r.code(), "RSV-1001");
        assert_eq!(r.customer.name, "Ana Silva");
        assert_eq!(r.return_branch.display(), "Harbor");
        assert_eq!(r.status, ReservationStatus::Cancelled);
        assert_eq!(r.total.to_display(), "210");
    }

    #[test]
    fn overlap_window() {
        let r: Reservation = serde_json::from_value(json!({
            "id": "r2",
            "pickupAt": "2026-05-01T10:00:00Z",
            "returnAt": "2026-05-04T10:00:00Z"
        }))
        .expect("reservation");
        let day = |d: u32| {
            format!("2026-05-{d:02}T00:00:00Z")
                .parse::<DateTime<Utc>>()
                .ok()
        };
        assert!(r.overlaps(day(3), day(10)));
        assert!(r.overlaps(None, day(2)));
        assert!(!r.overlaps(day(5), None));
        assert!(!r.overlaps(None, day(1)));
        assert_eq!(r.code(), "r2");
    }
}
