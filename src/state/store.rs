//! Store - Global Application State
//!
//! Thunks report progress as [`Action`]s over a crossbeam channel; the
//! store applies them to the matching slice. Failed loads keep the slice's
//! previous data and raise an error notice that carries a retry.

use crate::constants::DISPATCH_BATCH_SIZE;
use crate::domain::branch::Branch;
use crate::domain::chat::{ChatMessage, Conversation};
use crate::domain::rate_plan::RatePlan;
use crate::domain::reservation::Reservation;
use crate::domain::user::{DriverProfile, User};
use crate::domain::vehicle::{VehicleModel, VehicleUnit};
use crate::error::ApiError;
use crate::services::rate_plans::RatePlanQuery;
use crate::services::reservations::ReservationQuery;
use crate::services::vehicles::UnitQuery;
use crate::state::{
    AuthState, ChatState, DriversState, NoticeLevel, NoticeState, ProfileState,
    ReservationsState, RetryKind, VehiclesState,
};
use crossbeam_channel::Receiver;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub enum Action {
    // ==================== Auth ====================
    LoginPending,
    LoggedIn(Option<User>),
    LoginFailed(ApiError),
    CurrentUserPending,
    CurrentUserLoaded(User),
    CurrentUserFailed(ApiError),
    Logout,

    // ==================== Vehicles ====================
    UnitsPending(UnitQuery),
    UnitsLoaded(Vec<VehicleUnit>),
    UnitsFailed(ApiError),
    UnitUpserted(VehicleUnit),
    UnitRemoved(String),
    SelectUnit(Option<String>),
    ModelsPending,
    ModelsLoaded(Vec<VehicleModel>),
    ModelsFailed(ApiError),
    BranchesPending,
    BranchesLoaded(Vec<Branch>),
    BranchesFailed(ApiError),

    // ==================== Drivers ====================
    DriversPending,
    DriversLoaded(Vec<DriverProfile>),
    DriversFailed(ApiError),
    DriverUpserted(DriverProfile),
    DriverRemoved(String),

    // ==================== Reservations ====================
    ReservationsPending(ReservationQuery),
    ReservationsLoaded(Vec<Reservation>),
    ReservationsFailed(ApiError),
    ReservationUpserted(Reservation),
    ReservationRemoved(String),
    SelectReservation(Option<String>),
    RatePlansPending(RatePlanQuery),
    RatePlansLoaded(Vec<RatePlan>),
    RatePlansFailed(ApiError),
    RatePlanUpserted(RatePlan),
    RatePlanRemoved(String),
    SelectRatePlan(Option<String>),

    // ==================== Chat ====================
    ConversationsPending,
    ConversationsLoaded(Vec<Conversation>),
    ConversationsFailed(ApiError),
    SelectConversation(Option<String>),
    MessagesPending(String),
    MessagesLoaded {
        conversation_id: String,
        messages: Vec<ChatMessage>,
    },
    MessagesFailed {
        conversation_id: String,
        error: ApiError,
    },
    MessageAppended(ChatMessage),

    // ==================== Profile ====================
    ProfilePending,
    ProfileLoaded(User),
    ProfileFailed(ApiError),

    // ==================== Notices ====================
    Notify {
        level: NoticeLevel,
        message: String,
    },
    DismissNotice(u64),
    ClearNotices,
}

impl Action {
    pub fn info(message: impl Into<String>) -> Self {
        Action::Notify {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Action::Notify {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    pub auth: AuthState,
    pub vehicles: VehiclesState,
    pub drivers: DriversState,
    pub reservations: ReservationsState,
    pub chat: ChatState,
    pub profile: ProfileState,
    pub notices: NoticeState,
    /// Bumped once per dispatch or drained batch
    revision: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply one action
    pub fn dispatch(&mut self, action: Action) {
        self.apply(action);
        self.revision += 1;
    }

    /// Apply everything queued on `rx`, in batches, without blocking
    ///
    /// Returns the number of actions applied.
    pub fn drain(&mut self, rx: &Receiver<Action>) -> usize {
        let mut applied = 0;
        loop {
            let mut batch = Vec::with_capacity(DISPATCH_BATCH_SIZE);
            while let Ok(action) = rx.try_recv() {
                batch.push(action);
                if batch.len() >= DISPATCH_BATCH_SIZE {
                    break;
                }
            }
            if batch.is_empty() {
                break;
            }
            applied += batch.len();
            self.apply_batch(batch);
        }
        applied
    }

    fn apply_batch(&mut self, batch: Vec<Action>) {
        debug!("Applying {} actions", batch.len());
        for action in batch {
            self.apply(action);
        }
        self.revision += 1;
    }

    fn load_failed(&mut self, what: RetryKind, err: &ApiError) {
        warn!("Loading {} failed: {}", what.label(), err);
        self.notices.error(err.message.clone(), Some(what));
    }

    fn apply(&mut self, action: Action) {
        match action {
            // Auth
            Action::LoginPending | Action::CurrentUserPending => self.auth.set_pending(),
            Action::LoggedIn(user) => {
                let greeting = user
                    .as_ref()
                    .map(|u| format!("Signed in as {}", u.display_name()))
                    .unwrap_or_else(|| "Signed in".to_string());
                self.auth.set_logged_in(user);
                self.notices.info(greeting);
            }
            Action::LoginFailed(err) => {
                self.notices.error(err.message.clone(), None);
                self.auth.set_failed(err);
            }
            Action::CurrentUserLoaded(user) => self.auth.set_logged_in(Some(user)),
            Action::CurrentUserFailed(err) => {
                self.load_failed(RetryKind::CurrentUser, &err);
                self.auth.set_failed(err);
            }
            Action::Logout => {
                let notices = std::mem::take(&mut self.notices);
                *self = Self {
                    notices,
                    revision: self.revision,
                    ..Self::default()
                };
                self.notices.info("Signed out");
            }

            // Vehicles
            Action::UnitsPending(query) => {
                self.vehicles.unit_query = query;
                self.vehicles.units.set_loading();
            }
            Action::UnitsLoaded(units) => self.vehicles.units.set_items(units),
            Action::UnitsFailed(err) => {
                self.load_failed(RetryKind::Units(self.vehicles.unit_query.clone()), &err);
                self.vehicles.units.set_failed(err);
            }
            Action::UnitUpserted(unit) => {
                self.vehicles.units.upsert(unit);
            }
            Action::UnitRemoved(id) => {
                self.vehicles.units.remove(&id);
            }
            Action::SelectUnit(id) => {
                self.vehicles.units.select(id);
            }
            Action::ModelsPending => self.vehicles.models.set_loading(),
            Action::ModelsLoaded(models) => self.vehicles.models.set_items(models),
            Action::ModelsFailed(err) => {
                self.load_failed(RetryKind::Models, &err);
                self.vehicles.models.set_failed(err);
            }
            Action::BranchesPending => self.vehicles.branches.set_loading(),
            Action::BranchesLoaded(branches) => self.vehicles.branches.set_items(branches),
            Action::BranchesFailed(err) => {
                self.load_failed(RetryKind::Branches, &err);
                self.vehicles.branches.set_failed(err);
            }

            // Drivers
            Action::DriversPending => self.drivers.drivers.set_loading(),
            Action::DriversLoaded(drivers) => self.drivers.drivers.set_items(drivers),
            Action::DriversFailed(err) => {
                self.load_failed(RetryKind::Drivers, &err);
                self.drivers.drivers.set_failed(err);
            }
            Action::DriverUpserted(driver) => {
                self.drivers.drivers.upsert(driver);
            }
            Action::DriverRemoved(id) => {
                self.drivers.drivers.remove(&id);
            }

            // Reservations
            Action::ReservationsPending(query) => {
                self.reservations.reservation_query = query;
                self.reservations.reservations.set_loading();
            }
            Action::ReservationsLoaded(items) => self.reservations.reservations.set_items(items),
            Action::ReservationsFailed(err) => {
                let retry = RetryKind::Reservations(self.reservations.reservation_query.clone());
                self.load_failed(retry, &err);
                self.reservations.reservations.set_failed(err);
            }
            Action::ReservationUpserted(reservation) => {
                self.reservations.reservations.upsert(reservation);
            }
            Action::ReservationRemoved(id) => {
                self.reservations.reservations.remove(&id);
            }
            Action::SelectReservation(id) => {
                self.reservations.reservations.select(id);
            }
            Action::RatePlansPending(query) => {
                self.reservations.rate_plan_query = query;
                self.reservations.rate_plans.set_loading();
            }
            Action::RatePlansLoaded(plans) => self.reservations.rate_plans.set_items(plans),
            Action::RatePlansFailed(err) => {
                let retry = RetryKind::RatePlans(self.reservations.rate_plan_query.clone());
                self.load_failed(retry, &err);
                self.reservations.rate_plans.set_failed(err);
            }
            Action::RatePlanUpserted(plan) => {
                self.reservations.rate_plans.upsert(plan);
            }
            Action::RatePlanRemoved(id) => {
                self.reservations.rate_plans.remove(&id);
            }
            Action::SelectRatePlan(id) => {
                self.reservations.rate_plans.select(id);
            }

            // Chat
            Action::ConversationsPending => self.chat.conversations.set_loading(),
            Action::ConversationsLoaded(items) => self.chat.conversations.set_items(items),
            Action::ConversationsFailed(err) => {
                self.load_failed(RetryKind::Conversations, &err);
                self.chat.conversations.set_failed(err);
            }
            Action::SelectConversation(id) => {
                self.chat.conversations.select(id);
            }
            Action::MessagesPending(_) => self.chat.set_messages_pending(),
            Action::MessagesLoaded {
                conversation_id,
                messages,
            } => self.chat.set_messages(conversation_id, messages),
            Action::MessagesFailed {
                conversation_id,
                error,
            } => {
                self.load_failed(RetryKind::Messages(conversation_id), &error);
                self.chat.set_messages_failed(error);
            }
            Action::MessageAppended(message) => self.chat.append(message),

            // Profile
            Action::ProfilePending => self.profile.set_pending(),
            Action::ProfileLoaded(user) => self.profile.set_user(user),
            Action::ProfileFailed(err) => {
                self.load_failed(RetryKind::Profile, &err);
                self.profile.set_failed(err);
            }

            // Notices
            Action::Notify { level, message } => {
                self.notices.push(level, message, None);
            }
            Action::DismissNotice(id) => {
                self.notices.dismiss(id);
            }
            Action::ClearNotices => self.notices.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::UnitStatus;

    fn unit(id: &str, plate: &str) -> VehicleUnit {
        VehicleUnit {
            id: id.into(),
            plate: plate.into(),
            ..Default::default()
        }
    }

    fn offline() -> ApiError {
        ApiError::transport("GET", "https://api.test/api/vehicle-units", "Could not reach the server")
    }

    #[test]
    fn pending_then_loaded() {
        let mut store = Store::new();
        store.dispatch(Action::UnitsPending(UnitQuery::default()));
        assert!(store.vehicles.units.is_loading());
        store.dispatch(Action::UnitsLoaded(vec![unit("u1", "ABC-123")]));
        assert!(store.vehicles.units.load_state().is_loaded());
        assert_eq!(store.vehicles.units.len(), 1);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn failure_keeps_data_and_offers_retry_with_last_query() {
        let mut store = Store::new();
        store.dispatch(Action::UnitsLoaded(vec![unit("u1", "ABC-123")]));
        let query = UnitQuery {
            status: Some(UnitStatus::Available),
            ..Default::default()
        };
        store.dispatch(Action::UnitsPending(query.clone()));
        store.dispatch(Action::UnitsFailed(offline()));

        assert_eq!(store.vehicles.units.len(), 1);
        assert!(store.vehicles.units.load_state().is_failed());
        let notice = store.notices.latest_error().expect("notice");
        assert_eq!(notice.message, "Could not reach the server");
        assert_eq!(notice.retry, Some(RetryKind::Units(query)));
    }

    #[test]
    fn drain_applies_in_order_and_counts_batches() {
        let (tx, rx) = crossbeam_channel::unbounded();
        for i in 0..(DISPATCH_BATCH_SIZE + 3) {
            tx.send(Action::UnitUpserted(unit(&format!("u{i}"), "P")))
                .expect("send");
        }
        tx.send(Action::UnitRemoved("u0".into())).expect("send");

        let mut store = Store::new();
        assert_eq!(store.drain(&rx), DISPATCH_BATCH_SIZE + 4);
        assert_eq!(store.vehicles.units.len(), DISPATCH_BATCH_SIZE + 2);
        assert_eq!(store.revision(), 2);
        assert_eq!(store.drain(&rx), 0);
    }

    #[test]
    fn logout_clears_slices_but_keeps_notices() {
        let mut store = Store::new();
        store.dispatch(Action::LoggedIn(Some(User {
            name: "Dana".into(),
            ..Default::default()
        })));
        store.dispatch(Action::UnitsLoaded(vec![unit("u1", "ABC-123")]));
        store.dispatch(Action::Logout);

        assert!(!store.auth.is_authenticated());
        assert!(store.vehicles.units.is_empty());
        let messages: Vec<_> = store.notices.entries().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["Signed in as Dana", "Signed out"]);
    }

    #[test]
    fn unauthorized_current_user_drops_auth() {
        let mut store = Store::new();
        store.dispatch(Action::LoggedIn(None));
        let mut err = offline();
        err.status = Some(401);
        err.message = "Token expired".into();
        store.dispatch(Action::CurrentUserFailed(err));
        assert!(!store.auth.is_authenticated());
        assert_eq!(
            store.notices.latest_error().and_then(|n| n.retry.clone()),
            Some(RetryKind::CurrentUser)
        );
    }

    #[test]
    fn selection_ignores_unknown_ids() {
        let mut store = Store::new();
        store.dispatch(Action::UnitsLoaded(vec![unit("u1", "ABC-123")]));
        store.dispatch(Action::SelectUnit(Some("u9".into())));
        assert_eq!(store.vehicles.units.selected_id(), None);
        store.dispatch(Action::SelectUnit(Some("u1".into())));
        assert_eq!(
            store.vehicles.units.selected().map(|u| u.plate.as_str()),
            Some("ABC-123")
        );
    }
}
