//! Application Constants
//!
//! Centralized defaults shared by the service, state and CLI layers.

/// Application identifiers used for platform directories
pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "rentdesk";
pub const APP_NAME: &str = "rentdesk";

/// Default REST backend
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Default file-storage bucket
pub const DEFAULT_STORAGE_BUCKET_URL: &str = "http://localhost:9000/rentdesk-uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Environment overrides
pub const ENV_API_URL: &str = "RENTDESK_API_URL";
pub const ENV_TOKEN: &str = "RENTDESK_TOKEN";

/// Request id header attached to every API call
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Persisted file names (inside the config dir)
pub const SETTINGS_FILE: &str = "settings.toml";
pub const SESSION_FILE: &str = "session.toml";
pub const LOG_FILE_PREFIX: &str = "rentdesk.log";

/// Bounded buffer capacities
pub const NOTICE_CAPACITY: usize = 200;
pub const CHAT_HISTORY_CAPACITY: usize = 500;

/// Batch processing thresholds for the store
pub const DISPATCH_BATCH_SIZE: usize = 256;
