//! HTTP Transport
//!
//! The seam between the API client and the network. [`HttpTransport`] talks
//! to the real backend through reqwest; tests substitute an in-memory
//! implementation.

use crate::constants::REQUEST_ID_HEADER;
use crate::error::ApiError;
use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// HTTP verbs used by the services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Bytes {
        content_type: String,
        data: Vec<u8>,
    },
}

/// A fully resolved request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Body>,
    pub request_id: String,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            bearer: None,
            body: None,
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    pub fn bytes(mut self, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        self.body = Some(Body::Bytes {
            content_type: content_type.into(),
            data,
        });
        self
    }
}

/// Status and body text, before any interpretation
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests. Transport failures (DNS, refused, timeout) are returned
/// as [`ApiError`] with no status.
pub trait Transport: Send + Sync + 'static {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<RawResponse, ApiError>>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rentdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::transport("-", "-", format!("HTTP client init failed: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<RawResponse, ApiError>> {
        Box::pin(async move {
            let method = request.method.as_str();
            let mut builder = self
                .client
                .request(request.method.to_reqwest(), &request.url)
                .header(REQUEST_ID_HEADER, &request.request_id)
                .header(reqwest::header::ACCEPT, "application/json");

            if let Some(token) = &request.bearer {
                builder = builder.bearer_auth(token);
            }

            builder = match request.body {
                Some(Body::Json(value)) => builder.json(&value),
                Some(Body::Bytes { content_type, data }) => builder
                    .header(reqwest::header::CONTENT_TYPE, content_type)
                    .body(data),
                None => builder,
            };

            let response = builder.send().await.map_err(|e| {
                let message = if e.is_timeout() {
                    "Request timed out".to_string()
                } else if e.is_connect() {
                    "Could not reach the server".to_string()
                } else {
                    format!("Network error: {e}")
                };
                ApiError::transport(method, &request.url, message)
            })?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| {
                ApiError::transport(method, &request.url, format!("Failed to read response: {e}"))
            })?;

            Ok(RawResponse { status, body })
        })
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}
