//! Branch Service - `/branches`

use crate::domain::branch::Branch;
use crate::error::Result;
use crate::services::api_client::ApiClient;
use crate::services::resource::{Resource, ResourceKeys};
use serde_json::Value;

const KEYS: ResourceKeys = ResourceKeys {
    path: "branches",
    entity: &["branch"],
    list: &["branches"],
};

#[derive(Clone)]
pub struct BranchService {
    resource: Resource<Branch>,
}

impl BranchService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, KEYS),
        }
    }

    pub async fn list(&self) -> Result<Vec<Branch>> {
        self.resource.list().await
    }

    /// Active branches only, sorted by name (dropdown data)
    pub async fn list_active(&self) -> Result<Vec<Branch>> {
        let mut branches: Vec<Branch> = self
            .resource
            .list()
            .await?
            .into_iter()
            .filter(Branch::is_active)
            .collect();
        branches.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(branches)
    }

    pub async fn get(&self, id: &str) -> Result<Branch> {
        self.resource.get(id).await
    }

    pub async fn create(&self, body: &Value) -> Result<Branch> {
        self.resource.create(body).await
    }

    pub async fn update(&self, id: &str, body: &Value) -> Result<Branch> {
        self.resource.update(id, body).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.resource.delete(id).await
    }
}
