//! Rate Plan Service - `/rate-plans`

use crate::domain::rate_plan::{RatePlan, ScopeKind};
use crate::error::Result;
use crate::services::api_client::ApiClient;
use crate::services::resource::{Resource, ResourceKeys};
use serde_json::{Value, json};

const KEYS: ResourceKeys = ResourceKeys {
    path: "rate-plans",
    entity: &["ratePlan", "plan"],
    list: &["ratePlans", "plans"],
};

/// Server-side narrowing for plan lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatePlanQuery {
    pub branch: Option<String>,
    pub scope: Option<ScopeKind>,
    pub active: Option<bool>,
}

impl RatePlanQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("branchId", self.branch.clone().unwrap_or_default()),
            (
                "scope",
                self.scope.map(|s| s.label().to_string()).unwrap_or_default(),
            ),
            (
                "active",
                self.active.map(|a| a.to_string()).unwrap_or_default(),
            ),
        ]
    }
}

#[derive(Clone)]
pub struct RatePlanService {
    resource: Resource<RatePlan>,
}

impl RatePlanService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, KEYS),
        }
    }

    /// Plans sorted by priority (highest first), then name
    pub async fn list(&self, query: &RatePlanQuery) -> Result<Vec<RatePlan>> {
        let mut plans = self.resource.list_where(&query.pairs()).await?;
        plans.sort_by(|a, b| {
            b.priority
                .unwrap_or(0)
                .cmp(&a.priority.unwrap_or(0))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(plans)
    }

    pub async fn get(&self, id: &str) -> Result<RatePlan> {
        self.resource.get(id).await
    }

    pub async fn create(&self, body: &Value) -> Result<RatePlan> {
        self.resource.create(body).await
    }

    pub async fn update(&self, id: &str, body: &Value) -> Result<RatePlan> {
        self.resource.update(id, body).await
    }

    /// Create when `id` is `None`, update otherwise (form save)
    pub async fn save(&self, id: Option<&str>, body: &Value) -> Result<RatePlan> {
        match id.filter(|id| !id.trim().is_empty()) {
            Some(id) => self.update(id, body).await,
            None => self.create(body).await,
        }
    }

    pub async fn set_active(&self, id: &str, active: bool) -> Result<RatePlan> {
        self.resource.patch(id, &json!({ "active": active })).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.resource.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::transport::Method;
    use crate::services::transport::mock::MockTransport;
    use std::sync::Arc;

    fn service(mock: &Arc<MockTransport>) -> RatePlanService {
        RatePlanService::new(ApiClient::new("https://api.test", mock.clone()))
    }

    #[tokio::test]
    async fn list_orders_by_priority_then_name() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, json!({ "success": true, "data": { "ratePlans": [
            { "_id": "a", "name": "Base", "priority": 1 },
            { "_id": "b", "name": "Summer", "priority": 5 },
            { "_id": "c", "name": "Airport" , "priority": 1 }
        ]}}));
        let ids: Vec<String> = service(&mock)
            .list(&RatePlanQuery::default())
            .await
            .expect("plans")
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(
            mock.last_request().expect("request").url,
            "https://api.test/rate-plans"
        );
    }

    #[tokio::test]
    async fn save_creates_or_updates() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(201, json!({ "data": { "ratePlan": { "_id": "new", "name": "N" } } }))
            .respond(200, json!({ "data": { "_id": "rp1", "name": "U" } }));
        let svc = service(&mock);

        let created = svc.save(None, &json!({ "name": "N" })).await.expect("create");
        assert_eq!(created.id, "new");
        let updated = svc.save(Some("rp1"), &json!({ "name": "U" })).await.expect("update");
        assert_eq!(updated.name, "U");

        let methods: Vec<Method> = mock.requests().iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::Post, Method::Put]);
        assert_eq!(mock.requests()[1].url, "https://api.test/rate-plans/rp1");
    }

    #[tokio::test]
    async fn activation_uses_the_form_key() {
        use crate::forms::RatePlanForm;
        use crate::services::transport::Body;

        let mock = Arc::new(MockTransport::new());
        mock.respond(200, json!({ "data": { "_id": "rp1", "name": "U", "active": false } }));
        let plan = service(&mock).set_active("rp1", false).await.expect("deactivate");
        assert!(!plan.is_active());

        let request = mock.last_request().expect("request");
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.body, Some(Body::Json(json!({ "active": false }))));

        let mut form = RatePlanForm::from_plan(&plan);
        form.rates.daily = "40".into();
        let body = form.to_payload().expect("payload");
        assert_eq!(body["active"], json!(false));
    }
}
