//! Auth Service - `/auth`

use crate::domain::user::User;
use crate::error::{Error, Result};
use crate::helpers::mask_secret;
use crate::services::api_client::ApiClient;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "jwt")]
    pub token: String,
    pub user: Option<User>,
}

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a bearer token and install it on the client
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(Error::Invalid {
                message: "Email and password are required".to_string(),
            });
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.api.post("auth/login", &request, &[]).await?;
        if response.token.is_empty() {
            return Err(Error::Invalid {
                message: "Login response did not include a token".to_string(),
            });
        }

        info!("Logged in as {} (token {})", email, mask_secret(&response.token));
        self.api.set_token(Some(response.token.clone()));
        Ok(response)
    }

    /// The user the current token belongs to
    pub async fn me(&self) -> Result<User> {
        if !self.api.is_authenticated() {
            return Err(Error::NotAuthenticated);
        }
        self.api.get("auth/me", &["user"]).await
    }

    /// Drop the token from the client
    pub fn logout(&self) {
        self.api.set_token(None);
        info!("Logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;
    use crate::services::transport::mock::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn login_installs_token() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(200, json!({ "success": true, "data": {
            "accessToken": "jwt-123",
            "user": { "_id": "u1", "email": "a@b.c", "role": "admin" }
        }}))
        .respond(200, json!({ "data": { "user": { "_id": "u1", "email": "a@b.c", "role": "admin" } } }));

        let api = ApiClient::new("https://api.test", mock.clone());
        let auth = AuthService::new(api.clone());
        let response = auth.login(" a@b.c ", "pw").await.expect("login");
        assert_eq!(response.token, "jwt-123");
        assert_eq!(api.token().as_deref(), Some("jwt-123"));

        let me = auth.me().await.expect("me");
        assert_eq!(me.role, Role::Admin);
        assert_eq!(
            mock.last_request().expect("request").bearer.as_deref(),
            Some("jwt-123")
        );
    }

    #[tokio::test]
    async fn me_without_token_fails_locally() {
        let mock = Arc::new(MockTransport::new());
        let auth = AuthService::new(ApiClient::new("https://api.test", mock.clone()));
        assert!(matches!(auth.me().await, Err(Error::NotAuthenticated)));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn bad_credentials_surface_server_message() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(401, json!({ "success": false, "message": "Invalid credentials" }));
        let auth = AuthService::new(ApiClient::new("https://api.test", mock.clone()));
        let err = auth.login("a@b.c", "nope").await.expect_err("rejected");
        let api_err = err.as_api().expect("api error");
        assert!(api_err.is_unauthorized());
        assert_eq!(api_err.message, "Invalid credentials");
    }
}
