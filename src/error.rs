//! Error types for rentdesk
//!
//! Centralized error handling using snafu. HTTP failures are carried as
//! [`ApiError`], the single normalized shape every screen displays.

use serde_json::Value;
use snafu::Snafu;
use std::fmt;

/// Normalized HTTP failure
///
/// Built from any non-2xx response, a `success: false` envelope, or a
/// transport failure (in which case `status` is `None`).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// Human-readable message extracted from the server payload
    pub message: String,
    /// HTTP status code, if a response was received
    pub status: Option<u16>,
    /// Full request URL
    pub url: String,
    /// HTTP method (e.g. "GET")
    pub method: String,
    /// Raw server payload (JSON when parseable, else a string value)
    pub payload: Option<Value>,
}

impl ApiError {
    /// Build an error for a request that never produced a response
    pub fn transport(method: &str, url: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            url: url.to_string(),
            method: method.to_string(),
            payload: None,
        }
    }

    /// Whether the server rejected our credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }

    /// Whether the resource does not exist
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "{} ({} {} -> {})",
                self.message, self.method, self.url, status
            ),
            None => write!(f, "{} ({} {})", self.message, self.method, self.url),
        }
    }
}

impl std::error::Error for ApiError {}

/// A single form-field validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Main error type for the application
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (file operations)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// Normalized HTTP failure from the REST backend
    #[snafu(display("{source}"))]
    Api { source: ApiError },

    /// Form validation failed
    #[snafu(display("Validation failed: {}", join_field_errors(errors)))]
    Validation { errors: Vec<FieldError> },

    /// File storage upload rejected before sending
    #[snafu(display("Storage error: {message}"))]
    Storage { message: String },

    /// No bearer token available
    #[snafu(display("Not logged in"))]
    NotAuthenticated,
}

impl Error {
    /// The normalized API error, if this is one
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api { source } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

impl From<ApiError> for Error {
    fn from(source: ApiError) -> Self {
        Error::Api { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
