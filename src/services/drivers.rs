//! Driver Service - `/drivers`

use crate::domain::user::DriverProfile;
use crate::error::Result;
use crate::services::api_client::ApiClient;
use crate::services::resource::{Resource, ResourceKeys};
use serde_json::{Value, json};

const KEYS: ResourceKeys = ResourceKeys {
    path: "drivers",
    entity: &["driver"],
    list: &["drivers"],
};

#[derive(Clone)]
pub struct DriverService {
    resource: Resource<DriverProfile>,
}

impl DriverService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, KEYS),
        }
    }

    pub async fn list(&self) -> Result<Vec<DriverProfile>> {
        self.resource.list().await
    }

    pub async fn get(&self, id: &str) -> Result<DriverProfile> {
        self.resource.get(id).await
    }

    pub async fn create(&self, body: &Value) -> Result<DriverProfile> {
        self.resource.create(body).await
    }

    pub async fn update(&self, id: &str, body: &Value) -> Result<DriverProfile> {
        self.resource.update(id, body).await
    }

    pub async fn set_available(&self, id: &str, available: bool) -> Result<DriverProfile> {
        self.resource
            .patch(id, &json!({ "available": available }))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.resource.delete(id).await
    }
}
