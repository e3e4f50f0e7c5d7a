//! Settings - Application Configuration

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS, DEFAULT_MAX_UPLOAD_BYTES,
    DEFAULT_STORAGE_BUCKET_URL,
};
use crate::error::{Error, Result};

/// Keys accepted by [`AppSettings::set`]
pub const SETTING_KEYS: &[&str] = &[
    "api.base_url",
    "api.timeout_secs",
    "storage.bucket_url",
    "storage.public_base_url",
    "storage.token",
    "storage.max_upload_bytes",
    "log_level",
];

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppSettings {
    /// REST backend
    pub api: ApiSettings,
    /// External file storage
    pub storage: StorageSettings,
    /// Tracing filter directive (e.g. "info", "rentdesk=debug")
    pub log_level: Option<String>,
}

/// REST backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL, e.g. "https://rentals.example.com/api"
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

/// File storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Bucket endpoint accepting `PUT {bucket_url}/{key}`
    pub bucket_url: String,
    /// Public base for uploaded objects; defaults to `bucket_url`
    pub public_base_url: Option<String>,
    /// Optional bearer token for the storage service
    pub token: Option<String>,
    /// Upload size limit in bytes
    pub max_upload_bytes: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            bucket_url: DEFAULT_STORAGE_BUCKET_URL.to_string(),
            public_base_url: None,
            token: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl StorageSettings {
    pub fn public_base(&self) -> &str {
        self.public_base_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.bucket_url)
    }
}

impl AppSettings {
    /// Set one value by its dotted key
    ///
    /// A blank value clears optional settings. Required ones reject it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let optional = || (!value.is_empty()).then(|| value.to_string());
        let required = || {
            if value.is_empty() {
                Err(Error::Invalid {
                    message: format!("{key} must not be empty"),
                })
            } else {
                Ok(value.to_string())
            }
        };
        let number = || {
            value.parse::<u64>().map_err(|_| Error::Invalid {
                message: format!("{key} must be a whole number, got '{value}'"),
            })
        };

        match key.trim() {
            "api.base_url" => self.api.base_url = required()?.trim_end_matches('/').to_string(),
            "api.timeout_secs" => self.api.timeout_secs = number()?,
            "storage.bucket_url" => self.storage.bucket_url = required()?,
            "storage.public_base_url" => self.storage.public_base_url = optional(),
            "storage.token" => self.storage.token = optional(),
            "storage.max_upload_bytes" => self.storage.max_upload_bytes = number()?,
            "log_level" => self.log_level = optional(),
            other => {
                return Err(Error::Invalid {
                    message: format!(
                        "unknown setting '{other}' (expected one of: {})",
                        SETTING_KEYS.join(", ")
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_fills_defaults() {
        let settings: AppSettings = toml::from_str(
            r#"
            log_level = "debug"
            [api]
            base_url = "https://rentals.test/api"
            "#,
        )
        .expect("settings");
        assert_eq!(settings.api.base_url, "https://rentals.test/api");
        assert_eq!(settings.api.timeout_secs, DEFAULT_API_TIMEOUT_SECS);
        assert_eq!(settings.storage.public_base(), DEFAULT_STORAGE_BUCKET_URL);
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn set_by_dotted_key() {
        let mut settings = AppSettings::default();
        settings.set("api.base_url", " https://rentals.test/api/ ").expect("url");
        settings.set("storage.max_upload_bytes", "2048").expect("limit");
        settings.set("log_level", "rentdesk=debug").expect("level");
        assert_eq!(settings.api.base_url, "https://rentals.test/api");
        assert_eq!(settings.storage.max_upload_bytes, 2048);
        assert_eq!(settings.log_level.as_deref(), Some("rentdesk=debug"));

        settings.set("log_level", "").expect("clear");
        assert_eq!(settings.log_level, None);
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut settings = AppSettings::default();
        assert!(settings.set("api.timeout_secs", "soon").is_err());
        assert!(settings.set("api.base_url", "  ").is_err());
        let err = settings.set("api.colour", "red").expect_err("unknown");
        assert!(err.to_string().contains("api.base_url"));
        assert_eq!(settings, AppSettings::default());
    }
}
