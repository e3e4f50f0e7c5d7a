//! Thunks - Async Loads and Mutations that Report to the Store
//!
//! Each loader sends `*Pending`, awaits its service call, then sends
//! `*Loaded` or `*Failed`. The result is also returned so a caller can stop
//! early. Mutations send the changed entity plus a notice.

use crate::domain::chat::ChatMessage;
use crate::domain::rate_plan::RatePlan;
use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::domain::user::{DriverProfile, User};
use crate::domain::vehicle::{UnitStatus, VehicleUnit};
use crate::error::{ApiError, Error, Result};
use crate::forms::{RatePlanForm, ReservationForm, VehicleUnitForm};
use crate::services::ServiceHub;
use crate::services::auth::LoginResponse;
use crate::services::rate_plans::RatePlanQuery;
use crate::services::reservations::ReservationQuery;
use crate::services::vehicles::UnitQuery;
use crate::state::{Action, RetryKind};
use crossbeam_channel::Sender;
use serde_json::Value;
use std::future::Future;
use std::path::Path;
use tracing::{debug, info};

fn emit(tx: &Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        debug!("Store receiver dropped; action discarded");
    }
}

/// The normalized shape slices keep for any failure
pub fn api_failure(err: &Error) -> ApiError {
    match err.as_api() {
        Some(api) => api.clone(),
        None => ApiError {
            message: err.to_string(),
            status: None,
            url: String::new(),
            method: String::new(),
            payload: None,
        },
    }
}

async fn run<T, Fut>(
    tx: &Sender<Action>,
    pending: Action,
    call: Fut,
    loaded: impl FnOnce(T) -> Action,
    failed: impl FnOnce(ApiError) -> Action,
) -> Result<()>
where
    Fut: Future<Output = Result<T>>,
{
    emit(tx, pending);
    match call.await {
        Ok(value) => {
            emit(tx, loaded(value));
            Ok(())
        }
        Err(err) => {
            emit(tx, failed(api_failure(&err)));
            Err(err)
        }
    }
}

async fn mutate<T, Fut>(
    tx: &Sender<Action>,
    what: &str,
    call: Fut,
    done: impl FnOnce(&T) -> (Action, String),
) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    match call.await {
        Ok(value) => {
            let (action, message) = done(&value);
            emit(tx, action);
            emit(tx, Action::info(message));
            Ok(value)
        }
        Err(err) => {
            emit(tx, Action::error(format!("{what} failed: {}", api_failure(&err).message)));
            Err(err)
        }
    }
}

/// Validation failures become a notice before any request is made
fn payload(tx: &Sender<Action>, result: Result<Value>) -> Result<Value> {
    result.inspect_err(|err| emit(tx, Action::error(err.to_string())))
}

// ==================== Auth ====================

pub async fn login(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    email: &str,
    password: &str,
) -> Result<LoginResponse> {
    emit(tx, Action::LoginPending);
    match hub.auth.login(email, password).await {
        Ok(response) => {
            emit(tx, Action::LoggedIn(response.user.clone()));
            Ok(response)
        }
        Err(err) => {
            emit(tx, Action::LoginFailed(api_failure(&err)));
            Err(err)
        }
    }
}

pub async fn load_current_user(hub: &ServiceHub, tx: &Sender<Action>) -> Result<()> {
    run(
        tx,
        Action::CurrentUserPending,
        hub.auth.me(),
        Action::CurrentUserLoaded,
        Action::CurrentUserFailed,
    )
    .await
}

pub fn logout(hub: &ServiceHub, tx: &Sender<Action>) {
    hub.auth.logout();
    emit(tx, Action::Logout);
}

// ==================== Vehicles ====================

pub async fn load_units(hub: &ServiceHub, tx: &Sender<Action>, query: UnitQuery) -> Result<()> {
    run(
        tx,
        Action::UnitsPending(query.clone()),
        hub.units.list(&query),
        Action::UnitsLoaded,
        Action::UnitsFailed,
    )
    .await
}

pub async fn load_models(hub: &ServiceHub, tx: &Sender<Action>) -> Result<()> {
    run(
        tx,
        Action::ModelsPending,
        hub.models.list(),
        Action::ModelsLoaded,
        Action::ModelsFailed,
    )
    .await
}

pub async fn load_branches(hub: &ServiceHub, tx: &Sender<Action>) -> Result<()> {
    run(
        tx,
        Action::BranchesPending,
        hub.branches.list(),
        Action::BranchesLoaded,
        Action::BranchesFailed,
    )
    .await
}

/// Unit list first, then the model and branch dropdowns
///
/// The dropdowns load even when the unit list fails; the first error is
/// returned.
pub async fn load_units_with_dropdowns(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    query: UnitQuery,
) -> Result<()> {
    let units = load_units(hub, tx, query).await;
    let models = load_models(hub, tx).await;
    let branches = load_branches(hub, tx).await;
    units.and(models).and(branches)
}

pub async fn save_unit(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    form: &VehicleUnitForm,
) -> Result<VehicleUnit> {
    let body = payload(tx, form.to_payload())?;
    let call = async {
        match form.id.as_deref() {
            Some(id) => hub.units.update(id, &body).await,
            None => hub.units.create(&body).await,
        }
    };
    mutate(tx, "Saving unit", call, |unit| {
        (Action::UnitUpserted(unit.clone()), format!("Saved unit {}", unit.plate))
    })
    .await
}

pub async fn delete_unit(hub: &ServiceHub, tx: &Sender<Action>, id: &str) -> Result<()> {
    mutate(tx, "Deleting unit", hub.units.delete(id), |_| {
        (Action::UnitRemoved(id.to_string()), format!("Deleted unit {id}"))
    })
    .await
}

pub async fn set_unit_status(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    id: &str,
    status: UnitStatus,
) -> Result<VehicleUnit> {
    mutate(tx, "Updating unit status", hub.units.set_status(id, status), |unit| {
        (
            Action::UnitUpserted(unit.clone()),
            format!("Unit {} is {}", unit.plate, unit.status.label()),
        )
    })
    .await
}

/// Upload a local photo to storage and append it to the unit
pub async fn upload_unit_photo(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    unit_id: &str,
    path: &Path,
) -> Result<VehicleUnit> {
    let unit_id = unit_id.trim();
    if unit_id.is_empty() {
        return Err(Error::Invalid {
            message: "Missing unit id".to_string(),
        });
    }
    let call = async {
        let uploaded = hub.storage.upload_file(&format!("units/{unit_id}"), path).await?;
        hub.units.attach_photo(unit_id, &uploaded.url).await
    };
    mutate(tx, "Uploading photo", call, |unit| {
        (
            Action::UnitUpserted(unit.clone()),
            format!("Unit {} now has {} photos", unit.plate, unit.photos.len()),
        )
    })
    .await
}

// ==================== Drivers ====================

pub async fn load_drivers(hub: &ServiceHub, tx: &Sender<Action>) -> Result<()> {
    run(
        tx,
        Action::DriversPending,
        hub.drivers.list(),
        Action::DriversLoaded,
        Action::DriversFailed,
    )
    .await
}

pub async fn set_driver_available(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    id: &str,
    available: bool,
) -> Result<DriverProfile> {
    mutate(tx, "Updating driver", hub.drivers.set_available(id, available), |driver| {
        let state = if driver.available == Some(false) { "unavailable" } else { "available" };
        (Action::DriverUpserted(driver.clone()), format!("{} is {state}", driver.name))
    })
    .await
}

// ==================== Reservations ====================

pub async fn load_reservations(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    query: ReservationQuery,
) -> Result<()> {
    run(
        tx,
        Action::ReservationsPending(query.clone()),
        hub.reservations.list(&query),
        Action::ReservationsLoaded,
        Action::ReservationsFailed,
    )
    .await
}

pub async fn save_reservation(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    form: &ReservationForm,
) -> Result<Reservation> {
    let body = payload(tx, form.to_payload())?;
    let call = async {
        match form.id.as_deref() {
            Some(id) => hub.reservations.update(id, &body).await,
            None => hub.reservations.create(&body).await,
        }
    };
    mutate(tx, "Saving reservation", call, |r| {
        (Action::ReservationUpserted(r.clone()), format!("Saved reservation {}", r.code()))
    })
    .await
}

pub async fn cancel_reservation(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    id: &str,
    reason: Option<&str>,
) -> Result<Reservation> {
    mutate(tx, "Cancelling reservation", hub.reservations.cancel(id, reason), |r| {
        (Action::ReservationUpserted(r.clone()), format!("Cancelled reservation {}", r.code()))
    })
    .await
}

pub async fn set_reservation_status(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    id: &str,
    status: ReservationStatus,
) -> Result<Reservation> {
    mutate(tx, "Updating reservation", hub.reservations.set_status(id, status), |r| {
        (
            Action::ReservationUpserted(r.clone()),
            format!("Reservation {} is {}", r.code(), r.status.label()),
        )
    })
    .await
}

// ==================== Rate plans ====================

pub async fn load_rate_plans(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    query: RatePlanQuery,
) -> Result<()> {
    run(
        tx,
        Action::RatePlansPending(query.clone()),
        hub.rate_plans.list(&query),
        Action::RatePlansLoaded,
        Action::RatePlansFailed,
    )
    .await
}

pub async fn save_rate_plan(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    form: &RatePlanForm,
) -> Result<RatePlan> {
    let body = payload(tx, form.to_payload())?;
    mutate(tx, "Saving rate plan", hub.rate_plans.save(form.id.as_deref(), &body), |plan| {
        (Action::RatePlanUpserted(plan.clone()), format!("Saved rate plan {}", plan.name))
    })
    .await
}

pub async fn set_rate_plan_active(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    id: &str,
    active: bool,
) -> Result<RatePlan> {
    let what = if active { "Activating" } else { "Deactivating" };
    mutate(tx, &format!("{what} rate plan"), hub.rate_plans.set_active(id, active), |plan| {
        let state = if plan.is_active() { "active" } else { "inactive" };
        (Action::RatePlanUpserted(plan.clone()), format!("Rate plan {} is {state}", plan.name))
    })
    .await
}

pub async fn delete_rate_plan(hub: &ServiceHub, tx: &Sender<Action>, id: &str) -> Result<()> {
    mutate(tx, "Deleting rate plan", hub.rate_plans.delete(id), |_| {
        (Action::RatePlanRemoved(id.to_string()), format!("Deleted rate plan {id}"))
    })
    .await
}

// ==================== Chat ====================

pub async fn load_conversations(hub: &ServiceHub, tx: &Sender<Action>) -> Result<()> {
    run(
        tx,
        Action::ConversationsPending,
        hub.chat.conversations(),
        Action::ConversationsLoaded,
        Action::ConversationsFailed,
    )
    .await
}

pub async fn load_messages(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    conversation_id: &str,
) -> Result<()> {
    let id = conversation_id.to_string();
    run(
        tx,
        Action::MessagesPending(id.clone()),
        hub.chat.messages(conversation_id),
        |messages| Action::MessagesLoaded {
            conversation_id: id.clone(),
            messages,
        },
        |error| Action::MessagesFailed {
            conversation_id: id.clone(),
            error,
        },
    )
    .await
}

pub async fn send_message(
    hub: &ServiceHub,
    tx: &Sender<Action>,
    conversation_id: &str,
    body: &str,
) -> Result<ChatMessage> {
    let mut message = hub.chat.send(conversation_id, body).await.inspect_err(|err| {
        emit(tx, Action::error(format!("Sending message failed: {}", api_failure(err).message)))
    })?;
    if message.conversation.is_empty() {
        message.conversation.id = conversation_id.to_string();
    }
    emit(tx, Action::MessageAppended(message.clone()));
    Ok(message)
}

// ==================== Profile ====================

pub async fn load_profile(hub: &ServiceHub, tx: &Sender<Action>) -> Result<()> {
    run(
        tx,
        Action::ProfilePending,
        hub.profile.get(),
        Action::ProfileLoaded,
        Action::ProfileFailed,
    )
    .await
}

pub async fn update_profile(hub: &ServiceHub, tx: &Sender<Action>, changes: &Value) -> Result<User> {
    mutate(tx, "Updating profile", hub.profile.update(changes), |user| {
        (Action::ProfileLoaded(user.clone()), "Profile updated".to_string())
    })
    .await
}

// ==================== Retry ====================

/// Re-run the load a failure notice points at
pub async fn retry(hub: &ServiceHub, tx: &Sender<Action>, kind: RetryKind) -> Result<()> {
    info!("Retrying {}", kind.label());
    match kind {
        RetryKind::CurrentUser => load_current_user(hub, tx).await,
        RetryKind::Units(query) => load_units(hub, tx, query).await,
        RetryKind::Models => load_models(hub, tx).await,
        RetryKind::Branches => load_branches(hub, tx).await,
        RetryKind::Drivers => load_drivers(hub, tx).await,
        RetryKind::Reservations(query) => load_reservations(hub, tx, query).await,
        RetryKind::RatePlans(query) => load_rate_plans(hub, tx, query).await,
        RetryKind::Conversations => load_conversations(hub, tx).await,
        RetryKind::Messages(id) => load_messages(hub, tx, &id).await,
        RetryKind::Profile => load_profile(hub, tx).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::AppSettings;
    use crate::services::transport::{Body, Method};
    use crate::services::transport::mock::MockTransport;
    use crate::state::Store;
    use serde_json::json;
    use std::sync::Arc;

    fn hub(mock: &Arc<MockTransport>) -> ServiceHub {
        let mut settings = AppSettings::default();
        settings.api.base_url = "https://api.test/api".into();
        settings.storage.bucket_url = "https://store.test/bucket".into();
        ServiceHub::with_transport(&settings, Some("tok".into()), mock.clone())
    }

    #[tokio::test]
    async fn units_then_dropdowns() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, json!({ "success": true, "data": [{ "_id": "u1", "plate": "ABC-123" }] }))
            .respond(200, json!({ "data": { "vehicleModels": [{ "_id": "m1", "make": "Kia" }] } }))
            .respond(200, json!([{ "_id": "b1", "name": "Airport" }]));
        let hub = hub(&mock);

        load_units_with_dropdowns(&hub, &hub.sender(), UnitQuery::default())
            .await
            .expect("loaded");

        let urls: Vec<_> = mock.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            [
                "https://api.test/api/vehicle-units",
                "https://api.test/api/vehicle-models",
                "https://api.test/api/branches"
            ]
        );

        let mut store = Store::new();
        assert_eq!(store.drain(&hub.actions()), 6);
        assert_eq!(store.vehicles.units.len(), 1);
        assert_eq!(store.vehicles.models.len(), 1);
        assert!(store.vehicles.branches.load_state().is_loaded());
    }

    #[tokio::test]
    async fn failed_units_still_load_dropdowns() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(500, json!({ "message": "Database unavailable" }))
            .respond(200, json!([]))
            .respond(200, json!([]));
        let hub = hub(&mock);
        let query = UnitQuery {
            branch: Some("b1".into()),
            ..Default::default()
        };

        let err = load_units_with_dropdowns(&hub, &hub.sender(), query.clone())
            .await
            .expect_err("units failed");
        assert_eq!(err.as_api().and_then(|e| e.status), Some(500));

        let mut store = Store::new();
        store.drain(&hub.actions());
        assert!(store.vehicles.units.load_state().is_failed());
        assert!(store.vehicles.models.load_state().is_loaded());
        let notice = store.notices.latest_error().expect("notice");
        assert_eq!(notice.message, "Database unavailable");
        assert_eq!(notice.retry, Some(RetryKind::Units(query)));
    }

    #[tokio::test]
    async fn failed_dropdown_leaves_a_retryable_notice() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, json!([{ "_id": "m1", "make": "Kia", "model": "Rio" }]))
            .respond(503, json!({ "message": "Branches offline" }));
        let hub = hub(&mock);
        let tx = hub.sender();

        load_models(&hub, &tx).await.expect("models");
        assert!(load_branches(&hub, &tx).await.is_err());

        let mut store = Store::new();
        store.drain(&hub.actions());
        assert!(store.vehicles.models.load_state().is_loaded());
        assert!(store.vehicles.branches.load_state().is_failed());
        let notice = store.notices.latest_error().expect("notice");
        assert_eq!(notice.message, "Branches offline");
        assert_eq!(notice.retry, Some(RetryKind::Branches));
    }

    #[tokio::test]
    async fn retry_reruns_with_same_query() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, json!([]));
        let hub = hub(&mock);
        let query = UnitQuery {
            branch: Some("b1".into()),
            ..Default::default()
        };
        retry(&hub, &hub.sender(), RetryKind::Units(query))
            .await
            .expect("retried");
        let request = mock.last_request().expect("request");
        assert_eq!(request.url, "https://api.test/api/vehicle-units?branchId=b1");
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() {
        let mock = Arc::new(MockTransport::new());
        let hub = hub(&mock);
        let err = save_rate_plan(&hub, &hub.sender(), &RatePlanForm::new())
            .await
            .expect_err("invalid");
        assert!(matches!(err, Error::Validation { .. }));
        assert!(mock.requests().is_empty());

        let mut store = Store::new();
        store.drain(&hub.actions());
        let notice = store.notices.latest_error().expect("notice");
        assert!(notice.message.contains("name: is required"));
        assert_eq!(notice.retry, None);
    }

    #[tokio::test]
    async fn saved_plan_is_upserted() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(201, json!({ "success": true, "data": { "ratePlan": { "_id": "rp7", "name": "Weekend" } } }));
        let hub = hub(&mock);
        let mut form = RatePlanForm::new();
        form.name = "Weekend".into();
        form.rates.weekend = "55".into();

        let plan = save_rate_plan(&hub, &hub.sender(), &form).await.expect("saved");
        assert_eq!(plan.id, "rp7");
        assert_eq!(mock.last_request().map(|r| r.method), Some(Method::Post));

        let mut store = Store::new();
        store.drain(&hub.actions());
        assert_eq!(store.reservations.rate_plans.get("rp7").map(|p| p.name.as_str()), Some("Weekend"));
        assert_eq!(store.notices.latest().map(|n| n.message.as_str()), Some("Saved rate plan Weekend"));
    }

    #[tokio::test]
    async fn photo_upload_then_attach() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Front View.jpg");
        std::fs::write(&path, [0xff, 0xd8, 0xff]).expect("write");

        let mock = Arc::new(MockTransport::new());
        mock.respond(200, json!({}))
            .respond(200, json!({ "_id": "u1", "plate": "ABC-123", "photos": [] }))
            .respond(200, json!({ "_id": "u1", "plate": "ABC-123", "photos": ["https://store.test/bucket/units/u1/x-front-view.jpg"] }));
        let hub = hub(&mock);

        let unit = upload_unit_photo(&hub, &hub.sender(), "u1", &path)
            .await
            .expect("uploaded");
        assert_eq!(unit.photos.len(), 1);

        let methods: Vec<_> = mock.requests().into_iter().map(|r| r.method).collect();
        assert_eq!(methods, [Method::Put, Method::Get, Method::Patch]);
        let patch = mock.last_request().expect("patch");
        assert_eq!(patch.url, "https://api.test/api/vehicle-units/u1");
    }

    #[tokio::test]
    async fn sent_message_lands_in_history() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(201, json!({ "data": { "message": { "_id": "m1", "text": "On my way" } } }));
        let hub = hub(&mock);
        send_message(&hub, &hub.sender(), "c1", "On my way")
            .await
            .expect("sent");

        let mut store = Store::new();
        store.drain(&hub.actions());
        let bodies: Vec<_> = store.chat.messages("c1").map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, ["On my way"]);
    }

    #[tokio::test]
    async fn invalid_reservation_is_not_sent() {
        let mock = Arc::new(MockTransport::new());
        let hub = hub(&mock);
        let form = ReservationForm {
            customer_name: "Ana".into(),
            pickup_branch: "b1".into(),
            pickup_at: "2026-05-03 10:00".into(),
            return_at: "2026-05-01 10:00".into(),
            ..Default::default()
        };
        let err = save_reservation(&hub, &hub.sender(), &form).await.expect_err("invalid");
        assert!(matches!(err, Error::Validation { .. }));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn deleted_unit_leaves_the_list() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, json!([{ "_id": "u1", "plate": "P1" }, { "_id": "u2", "plate": "P2" }]))
            .respond_text(204, "");
        let hub = hub(&mock);
        load_units(&hub, &hub.sender(), UnitQuery::default()).await.expect("units");
        delete_unit(&hub, &hub.sender(), "u1").await.expect("deleted");
        assert_eq!(mock.last_request().map(|r| r.method), Some(Method::Delete));

        let mut store = Store::new();
        store.drain(&hub.actions());
        assert_eq!(store.vehicles.units.len(), 1);
        assert!(store.vehicles.units.get("u1").is_none());
        assert_eq!(store.notices.latest().map(|n| n.message.as_str()), Some("Deleted unit u1"));
    }

    #[tokio::test]
    async fn status_changes_upsert_entities() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, json!({ "data": { "_id": "u1", "plate": "P1", "status": "rented" } }))
            .respond(200, json!({ "data": { "_id": "r1", "code": "RSV-1", "status": "checked_out" } }))
            .respond(200, json!({ "data": { "_id": "d1", "name": "Lee", "isAvailable": false } }));
        let hub = hub(&mock);
        let tx = hub.sender();

        set_unit_status(&hub, &tx, "u1", UnitStatus::Rented).await.expect("unit");
        set_reservation_status(&hub, &tx, "r1", ReservationStatus::CheckedOut)
            .await
            .expect("reservation");
        set_driver_available(&hub, &tx, "d1", false).await.expect("driver");
        assert_eq!(
            mock.last_request().and_then(|r| r.body),
            Some(Body::Json(json!({ "available": false })))
        );

        let mut store = Store::new();
        store.drain(&hub.actions());
        assert_eq!(store.vehicles.units.get("u1").map(|u| u.status), Some(UnitStatus::Rented));
        assert_eq!(
            store.reservations.reservations.get("r1").map(|r| r.status),
            Some(ReservationStatus::CheckedOut)
        );
        assert_eq!(store.drivers.drivers.len(), 1);
        assert_eq!(store.drivers.available().count(), 0);
        assert_eq!(store.notices.latest().map(|n| n.message.as_str()), Some("Lee is unavailable"));
    }

    #[tokio::test]
    async fn profile_update_replaces_profile() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, json!({ "data": { "_id": "me", "name": "Sam Park", "email": "sam@rent.test" } }));
        let hub = hub(&mock);
        let user = update_profile(&hub, &hub.sender(), &json!({ "name": "Sam Park" }))
            .await
            .expect("updated");
        assert_eq!(user.name, "Sam Park");
        assert_eq!(mock.last_request().map(|r| r.method), Some(Method::Put));

        let mut store = Store::new();
        store.drain(&hub.actions());
        assert_eq!(store.profile.user().map(|u| u.email.as_str()), Some("sam@rent.test"));
    }
}
