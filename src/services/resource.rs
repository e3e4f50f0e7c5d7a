//! Generic CRUD endpoint
//!
//! Every REST collection follows the same shape (`GET /things`,
//! `GET /things/{id}`, `POST`, `PUT`, `DELETE`); resource services wrap a
//! [`Resource`] and add their own endpoints on top.

use crate::error::{Error, Result};
use crate::services::api_client::ApiClient;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::info;

/// Names under which the backend may wrap this resource
#[derive(Debug, Clone, Copy)]
pub struct ResourceKeys {
    /// URL path, e.g. "rate-plans"
    pub path: &'static str,
    /// Single-entity wrapper keys, e.g. ["ratePlan"]
    pub entity: &'static [&'static str],
    /// List wrapper keys, e.g. ["ratePlans"]
    pub list: &'static [&'static str],
}

pub struct Resource<T> {
    api: ApiClient,
    keys: ResourceKeys,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            keys: self.keys,
            _marker: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Resource<T> {
    pub fn new(api: ApiClient, keys: ResourceKeys) -> Self {
        Self {
            api,
            keys,
            _marker: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn keys(&self) -> &ResourceKeys {
        &self.keys
    }

    /// Path for one item, rejecting empty ids before any request is made
    pub fn item_path(&self, id: &str) -> Result<String> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::Invalid {
                message: format!("Missing id for {}", self.keys.path),
            });
        }
        Ok(format!("{}/{}", self.keys.path, id))
    }

    pub async fn list(&self) -> Result<Vec<T>> {
        self.list_where(&[]).await
    }

    pub async fn list_where(&self, query: &[(&str, String)]) -> Result<Vec<T>> {
        self.api.get_list(self.keys.path, query, self.keys.list).await
    }

    pub async fn get(&self, id: &str) -> Result<T> {
        self.api.get(&self.item_path(id)?, self.keys.entity).await
    }

    pub async fn create<B: Serialize>(&self, body: &B) -> Result<T> {
        let created = self.api.post(self.keys.path, body, self.keys.entity).await?;
        info!("Created {}", self.keys.path);
        Ok(created)
    }

    pub async fn update<B: Serialize>(&self, id: &str, body: &B) -> Result<T> {
        let updated = self
            .api
            .put(&self.item_path(id)?, body, self.keys.entity)
            .await?;
        info!("Updated {} {}", self.keys.path, id);
        Ok(updated)
    }

    pub async fn patch<B: Serialize>(&self, id: &str, body: &B) -> Result<T> {
        self.api
            .patch(&self.item_path(id)?, body, self.keys.entity)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete(&self.item_path(id)?).await?;
        info!("Deleted {} {}", self.keys.path, id);
        Ok(())
    }
}
