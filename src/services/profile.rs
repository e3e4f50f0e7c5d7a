//! Profile Service - `/profile`

use crate::domain::user::User;
use crate::error::Result;
use crate::services::api_client::ApiClient;
use serde_json::Value;

#[derive(Clone)]
pub struct ProfileService {
    api: ApiClient,
}

impl ProfileService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self) -> Result<User> {
        self.api.get("profile", &["user", "profile"]).await
    }

    pub async fn update(&self, changes: &Value) -> Result<User> {
        self.api.put("profile", changes, &["user", "profile"]).await
    }
}
