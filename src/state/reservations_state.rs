//! ReservationsState - Bookings and the Rate Plans that Price Them

use crate::domain::rate_plan::RatePlan;
use crate::domain::reservation::Reservation;
use crate::services::rate_plans::RatePlanQuery;
use crate::services::reservations::ReservationQuery;
use crate::state::Collection;

#[derive(Debug, Clone, Default)]
pub struct ReservationsState {
    pub reservations: Collection<Reservation>,
    pub rate_plans: Collection<RatePlan>,
    pub reservation_query: ReservationQuery,
    pub rate_plan_query: RatePlanQuery,
}

impl ReservationsState {
    pub fn find_by_code(&self, code: &str) -> Option<&Reservation> {
        let code = code.trim();
        self.reservations
            .iter()
            .find(|r| r.code().eq_ignore_ascii_case(code))
    }

    pub fn active_plans(&self) -> impl Iterator<Item = &RatePlan> {
        self.rate_plans.iter().filter(|p| p.is_active())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
