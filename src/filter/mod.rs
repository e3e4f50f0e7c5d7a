//! Client-side Filtering
//!
//! Filters narrow an already-loaded list. Every set predicate must hold
//! (logical AND); an unset predicate matches everything. Text search is
//! case-insensitive, trimmed, and matches all items when empty.

use crate::domain::rate_plan::{RatePlan, ScopeKind};
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::domain::vehicle::{UnitStatus, VehicleUnit};
use chrono::{DateTime, Utc};

pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;

    /// Matching items, in input order
    fn apply<'a, I>(&self, items: I) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

/// Lowercased needle, or `None` when the search box is blank
fn needle(text: &Option<String>) -> Option<String> {
    text.as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Equality against an optional filter value; unset or blank matches all
fn eq_id(filter: &Option<String>, id: &str) -> bool {
    match filter.as_deref().map(str::trim) {
        Some(want) if !want.is_empty() => want == id,
        _ => true,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitFilter {
    pub status: Option<UnitStatus>,
    pub branch: Option<String>,
    pub model: Option<String>,
    /// Searched in VIN, plate and color
    pub text: Option<String>,
}

impl Filter<VehicleUnit> for UnitFilter {
    fn matches(&self, unit: &VehicleUnit) -> bool {
        if self.status.is_some_and(|s| s != unit.status) {
            return false;
        }
        if !eq_id(&self.branch, &unit.branch.id) || !eq_id(&self.model, &unit.model.id) {
            return false;
        }
        match needle(&self.text) {
            None => true,
            Some(n) => [unit.vin.as_deref(), Some(unit.plate.as_str()), unit.color.as_deref()]
                .into_iter()
                .flatten()
                .any(|field| contains(field, &n)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationFilter {
    pub status: Option<ReservationStatus>,
    /// Matches either the pickup or the return branch
    pub branch: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// Searched in confirmation code, customer name and email
    pub text: Option<String>,
}

impl Filter<Reservation> for ReservationFilter {
    fn matches(&self, r: &Reservation) -> bool {
        if self.status.is_some_and(|s| s != r.status) {
            return false;
        }
        if !eq_id(&self.branch, &r.pickup_branch.id) && !eq_id(&self.branch, &r.return_branch.id) {
            return false;
        }
        if (self.from.is_some() || self.to.is_some()) && !r.overlaps(self.from, self.to) {
            return false;
        }
        match needle(&self.text) {
            None => true,
            Some(n) => [Some(r.code()), Some(r.customer.name.as_str()), r.customer.email.as_deref()]
                .into_iter()
                .flatten()
                .any(|field| contains(field, &n)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatePlanFilter {
    pub scope: Option<ScopeKind>,
    pub branch: Option<String>,
    pub active: Option<bool>,
    /// Searched in the plan name
    pub text: Option<String>,
}

impl Filter<RatePlan> for RatePlanFilter {
    fn matches(&self, plan: &RatePlan) -> bool {
        if self.scope.is_some_and(|s| s != plan.scope) {
            return false;
        }
        if self.active.is_some_and(|a| a != plan.is_active()) {
            return false;
        }
        if !eq_id(&self.branch, &plan.branch.id) {
            return false;
        }
        needle(&self.text).is_none_or(|n| contains(&plan.name, &n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn units() -> Vec<VehicleUnit> {
        serde_json::from_value(json!([
            { "_id": "u1", "plate": "ABC-123", "vin": "1HGCM82633A004352", "color": "Silver",
              "status": "available", "branchId": "b1", "vehicleModelId": "m1" },
            { "_id": "u2", "plate": "XYZ-987", "color": "Black",
              "status": "rented", "branchId": "b1", "vehicleModelId": "m2" },
            { "_id": "u3", "plate": "QRS-555", "color": "silver",
              "status": "available", "branchId": "b2", "vehicleModelId": "m1" }
        ]))
        .expect("units")
    }

    fn ids<'a, T: 'a>(items: Vec<&'a T>, id: impl Fn(&T) -> &str) -> Vec<String> {
        items.into_iter().map(|i| id(i).to_string()).collect()
    }

    #[test]
    fn empty_filter_matches_all() {
        let units = units();
        assert_eq!(UnitFilter::default().apply(&units).len(), 3);
        let blank = UnitFilter {
            text: Some("   ".into()),
            branch: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(blank.apply(&units).len(), 3);
    }

    #[test]
    fn unit_predicates_combine_with_and() {
        let units = units();
        let filter = UnitFilter {
            status: Some(UnitStatus::Available),
            text: Some(" SILVER ".into()),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&units), |u| u.id.as_str()), ["u1", "u3"]);

        let filter = UnitFilter {
            status: Some(UnitStatus::Available),
            branch: Some("b2".into()),
            text: Some("silver".into()),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&units), |u| u.id.as_str()), ["u3"]);

        let filter = UnitFilter {
            model: Some("m2".into()),
            text: Some("a004".into()),
            ..Default::default()
        };
        assert!(filter.apply(&units).is_empty());
    }

    #[test]
    fn reservation_window_and_text() {
        let reservations: Vec<Reservation> = serde_json::from_value(json!([
            { "_id": "r1", "confirmationCode": "RSV-1001", "status": "confirmed",
              "customer": { "name": "Ana Silva", "email": "ana@test.io" },
              "pickupBranch": "b1", "returnBranch": "b2",
              "pickupAt": "2026-03-02T10:00:00Z", "returnAt": "2026-03-05T10:00:00Z" },
            { "_id": "r2", "confirmationCode": "RSV-1002", "status": "pending",
              "customer": { "name": "Ben Okafor" },
              "pickupBranch": "b3", "returnBranch": "b3",
              "pickupAt": "2026-04-10T10:00:00Z", "returnAt": "2026-04-12T10:00:00Z" }
        ]))
        .expect("reservations");

        let by_return_branch = ReservationFilter {
            branch: Some("b2".into()),
            ..Default::default()
        };
        assert_eq!(ids(by_return_branch.apply(&reservations), |r| r.id.as_str()), ["r1"]);

        let april = ReservationFilter {
            from: "2026-04-01T00:00:00Z".parse().ok(),
            to: "2026-04-30T00:00:00Z".parse().ok(),
            ..Default::default()
        };
        assert_eq!(ids(april.apply(&reservations), |r| r.id.as_str()), ["r2"]);

        let by_email = ReservationFilter {
            text: Some("ANA@".into()),
            status: Some(ReservationStatus::Confirmed),
            ..Default::default()
        };
        assert_eq!(ids(by_email.apply(&reservations), |r| r.id.as_str()), ["r1"]);
    }

    #[test]
    fn rate_plan_scope_active_and_name() {
        let plans: Vec<RatePlan> = serde_json::from_value(json!([
            { "_id": "p1", "name": "Airport Standard", "scope": "branch", "branchId": "b1" },
            { "_id": "p2", "name": "Airport Winter", "scope": "branch", "branchId": "b1", "isActive": false },
            { "_id": "p3", "name": "Default", "scope": "global" }
        ]))
        .expect("plans");

        let filter = RatePlanFilter {
            scope: Some(ScopeKind::Branch),
            active: Some(true),
            text: Some("airport".into()),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&plans), |p| p.id.as_str()), ["p1"]);

        let inactive = RatePlanFilter {
            active: Some(false),
            ..Default::default()
        };
        assert_eq!(ids(inactive.apply(&plans), |p| p.id.as_str()), ["p2"]);
    }
}
