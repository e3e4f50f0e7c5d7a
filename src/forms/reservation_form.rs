//! ReservationForm - Create/Edit Bookings

use crate::domain::reservation::Reservation;
use crate::error::Result;
use crate::forms::{FieldErrors, put, text};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value, json};

/// Accepts RFC 3339, or `YYYY-MM-DD HH:MM` / `YYYY-MM-DDTHH:MM` taken as UTC
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationForm {
    pub id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub pickup_branch: String,
    /// Blank means same as pickup
    pub return_branch: String,
    pub pickup_at: String,
    pub return_at: String,
    pub model: String,
    pub unit: String,
    pub rate_plan: String,
    pub notes: String,
}

impl ReservationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reservation(reservation: &Reservation) -> Self {
        let instant = |dt: Option<DateTime<Utc>>| dt.map(|d| d.to_rfc3339()).unwrap_or_default();
        Self {
            id: (!reservation.id.is_empty()).then(|| reservation.id.clone()),
            customer_name: reservation.customer.name.clone(),
            customer_email: reservation.customer.email.clone().unwrap_or_default(),
            customer_phone: reservation.customer.phone.clone().unwrap_or_default(),
            pickup_branch: reservation.pickup_branch.id.clone(),
            return_branch: reservation.return_branch.id.clone(),
            pickup_at: instant(reservation.pickup_at),
            return_at: instant(reservation.return_at),
            model: reservation.model.id.clone(),
            unit: reservation.unit.id.clone(),
            rate_plan: reservation.rate_plan.id.clone(),
            notes: reservation.notes.clone().unwrap_or_default(),
        }
    }

    fn instant(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<DateTime<Utc>> {
        let raw = errors.required(field, raw)?;
        let parsed = parse_instant(&raw);
        if parsed.is_none() {
            errors.add(field, "must be a date and time (YYYY-MM-DD HH:MM)");
        }
        parsed
    }

    pub fn to_payload(&self) -> Result<Value> {
        let mut errors = FieldErrors::default();
        let mut body = Map::new();

        let mut customer = Map::new();
        put(&mut customer, "name", errors.required("customer.name", &self.customer_name));
        if let Some(email) = text(&self.customer_email) {
            if email.contains('@') && !email.starts_with('@') && !email.ends_with('@') {
                customer.insert("email".into(), json!(email));
            } else {
                errors.add("customer.email", "must be an email address");
            }
        }
        put(&mut customer, "phone", text(&self.customer_phone));
        body.insert("customer".into(), Value::Object(customer));

        let pickup_branch = errors.required("pickupBranch", &self.pickup_branch);
        let return_branch = text(&self.return_branch).or_else(|| pickup_branch.clone());
        put(&mut body, "pickupBranch", pickup_branch);
        put(&mut body, "returnBranch", return_branch);

        let pickup = Self::instant(&mut errors, "pickupAt", &self.pickup_at);
        let dropoff = Self::instant(&mut errors, "returnAt", &self.return_at);
        if let (Some(pickup), Some(dropoff)) = (pickup, dropoff) {
            if dropoff <= pickup {
                errors.add("returnAt", "must be after pickup");
            }
        }
        put(&mut body, "pickupAt", pickup.map(|d| d.to_rfc3339()));
        put(&mut body, "returnAt", dropoff.map(|d| d.to_rfc3339()));

        put(&mut body, "model", text(&self.model));
        put(&mut body, "unit", text(&self.unit));
        put(&mut body, "ratePlan", text(&self.rate_plan));
        put(&mut body, "notes", text(&self.notes));

        errors.finish(Value::Object(body))
    }
}
