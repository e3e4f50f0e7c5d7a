//! API Client
//!
//! Shared HTTP plumbing for every resource service: URL building, bearer
//! auth, envelope unwrapping and error normalization.

use crate::error::{ApiError, Error, Result};
use crate::services::envelope::{
    extract_message, reports_failure, to_api_error, unwrap_entity, unwrap_list,
};
use crate::services::transport::{ApiRequest, Method, RawResponse, Transport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use tracing::{Instrument, debug, info_span, warn};

/// Stateless apart from the bearer token, which is shared by all clones
#[derive(Clone)]
pub struct ApiClient {
    base_url: Arc<str>,
    transport: Arc<dyn Transport>,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').into(),
            transport,
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_token(self, token: Option<String>) -> Self {
        self.set_token(token);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token.filter(|t| !t.is_empty());
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Join `path` onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Join `path` and append URL-encoded query pairs, skipping empty values
    pub fn url_with_query(&self, path: &str, query: &[(&str, String)]) -> String {
        let pairs: Vec<(&str, &str)> = query
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        let base = self.url(path);
        if pairs.is_empty() {
            return base;
        }
        match reqwest::Url::parse_with_params(&base, &pairs) {
            Ok(url) => url.to_string(),
            Err(_) => base,
        }
    }

    /// Send a request to an absolute URL without envelope handling
    pub async fn send_raw(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let (method, url) = (request.method.as_str(), request.url.clone());
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let err = to_api_error(method, &url, Some(response.status), &response.body);
            warn!("{} {} failed: {}", method, url, err.message);
            return Err(err);
        }
        Ok(response)
    }

    /// Send a request and return the parsed JSON body
    ///
    /// A 2xx body with `success: false` is still an error.
    async fn execute(&self, method: Method, url: String, body: Option<Value>) -> Result<Value> {
        let mut request = ApiRequest::new(method, url.clone()).bearer(self.token());
        if let Some(body) = body {
            request = request.json(body);
        }
        let span = info_span!("api", method = %method, url = %url, request_id = %request.request_id);
        self.exchange(method, url, request).instrument(span).await
    }

    async fn exchange(&self, method: Method, url: String, request: ApiRequest) -> Result<Value> {
        debug!("{} {}", method, url);
        let response = self.send_raw(request).await?;
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }

        let value: Value = serde_json::from_str(&response.body).map_err(|e| ApiError {
            message: format!("Invalid JSON response: {e}"),
            status: Some(response.status),
            url: url.clone(),
            method: method.as_str().to_string(),
            payload: Some(Value::String(response.body.clone())),
        })?;

        if reports_failure(&value) {
            let message =
                extract_message(&value).unwrap_or_else(|| "Request was not successful".to_string());
            warn!("{} {} reported failure: {}", method, url, message);
            return Err(ApiError {
                message,
                status: Some(response.status),
                url,
                method: method.as_str().to_string(),
                payload: Some(value),
            }
            .into());
        }

        Ok(value)
    }

    fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
        serde_json::from_value(value).map_err(|source| Error::Json { source })
    }

    fn encode<B: Serialize>(body: &B) -> Result<Value> {
        Ok(serde_json::to_value(body)?)
    }

    /// GET a single entity
    pub async fn get<T: DeserializeOwned>(&self, path: &str, keys: &[&str]) -> Result<T> {
        let value = self.execute(Method::Get, self.url(path), None).await?;
        Self::decode(unwrap_entity(value, keys))
    }

    /// GET a list, with optional query parameters
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        keys: &[&str],
    ) -> Result<Vec<T>> {
        let url = self.url_with_query(path, query);
        let value = self.execute(Method::Get, url, None).await?;
        Self::decode(unwrap_list(value, keys))
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        keys: &[&str],
    ) -> Result<T> {
        let value = self
            .execute(Method::Post, self.url(path), Some(Self::encode(body)?))
            .await?;
        Self::decode(unwrap_entity(value, keys))
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        keys: &[&str],
    ) -> Result<T> {
        let value = self
            .execute(Method::Put, self.url(path), Some(Self::encode(body)?))
            .await?;
        Self::decode(unwrap_entity(value, keys))
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        keys: &[&str],
    ) -> Result<T> {
        let value = self
            .execute(Method::Patch, self.url(path), Some(Self::encode(body)?))
            .await?;
        Self::decode(unwrap_entity(value, keys))
    }

    /// DELETE; any 2xx body is ignored
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::Delete, self.url(path), None).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
