//! Reservation Service - `/reservations`

use crate::domain::reservation::{Reservation, ReservationStatus};
use crate::error::Result;
use crate::services::api_client::ApiClient;
use crate::services::resource::{Resource, ResourceKeys};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

const KEYS: ResourceKeys = ResourceKeys {
    path: "reservations",
    entity: &["reservation", "booking"],
    list: &["reservations", "bookings"],
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationQuery {
    pub branch: Option<String>,
    pub status: Option<ReservationStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl ReservationQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("branchId", self.branch.clone().unwrap_or_default()),
            (
                "status",
                self.status.map(|s| s.label().to_string()).unwrap_or_default(),
            ),
            ("from", self.from.map(|d| d.to_rfc3339()).unwrap_or_default()),
            ("to", self.to.map(|d| d.to_rfc3339()).unwrap_or_default()),
        ]
    }
}

#[derive(Clone)]
pub struct ReservationService {
    resource: Resource<Reservation>,
}

impl ReservationService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, KEYS),
        }
    }

    /// Reservations, most recent pickup first
    pub async fn list(&self, query: &ReservationQuery) -> Result<Vec<Reservation>> {
        let mut list = self.resource.list_where(&query.pairs()).await?;
        list.sort_by(|a, b| b.pickup_at.cmp(&a.pickup_at));
        Ok(list)
    }

    pub async fn get(&self, id: &str) -> Result<Reservation> {
        self.resource.get(id).await
    }

    pub async fn create(&self, body: &Value) -> Result<Reservation> {
        self.resource.create(body).await
    }

    pub async fn update(&self, id: &str, body: &Value) -> Result<Reservation> {
        self.resource.update(id, body).await
    }

    pub async fn set_status(&self, id: &str, status: ReservationStatus) -> Result<Reservation> {
        self.resource
            .patch(id, &json!({ "status": status.label() }))
            .await
    }

    /// Cancel, leaving lifecycle checks to the backend
    pub async fn cancel(&self, id: &str, reason: Option<&str>) -> Result<Reservation> {
        let mut body = json!({ "status": ReservationStatus::Cancelled.label() });
        if let Some(reason) = reason.filter(|r| !r.trim().is_empty()) {
            body["cancellationReason"] = Value::String(reason.trim().to_string());
        }
        self.resource.patch(id, &body).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.resource.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::transport::{Body, Method};
    use crate::services::transport::mock::MockTransport;
    use std::sync::Arc;

    fn service(mock: &Arc<MockTransport>) -> ReservationService {
        ReservationService::new(ApiClient::new("https://api.test", mock.clone()))
    }

    #[tokio::test]
    async fn cancel_sends_reason() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, json!({ "data": { "_id": "r1", "status": "cancelled" } }));
        let r = service(&mock).cancel("r1", Some(" customer request ")).await.expect("cancel");
        assert_eq!(r.status, ReservationStatus::Cancelled);
        let request = mock.last_request().expect("request");
        assert_eq!(request.method, Method::Patch);
        assert_eq!(
            request.body,
            Some(Body::Json(json!({ "status": "cancelled", "cancellationReason": "customer request" })))
        );
    }

    #[tokio::test]
    async fn cancel_is_sent_whatever_the_status() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, json!({ "data": { "_id": "r1", "code": "RSV-1", "status": "cancelled" } }));
        service(&mock).cancel("r1", None).await.expect("cancel");
        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Patch);
        assert_eq!(requests[0].body, Some(Body::Json(json!({ "status": "cancelled" }))));
    }

    #[tokio::test]
    async fn backend_refusal_is_reported() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(409, json!({ "message": "Reservation is on_hold" }));
        let err = service(&mock).cancel("r1", None).await.expect_err("refused");
        assert_eq!(err.as_api().expect("api").message, "Reservation is on_hold");
    }

    #[tokio::test]
    async fn list_sorted_by_pickup_desc() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, json!({ "data": [
            { "_id": "old", "pickupAt": "2026-01-01T00:00:00Z" },
            { "_id": "new", "pickupAt": "2026-06-01T00:00:00Z" }
        ]}));
        let ids: Vec<String> = service(&mock)
            .list(&ReservationQuery::default())
            .await
            .expect("list")
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["new", "old"]);
    }
}
