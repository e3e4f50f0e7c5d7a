//! Session persistence
//!
//! The bearer token is stored encrypted; everything else in plain TOML.

use crate::constants::SESSION_FILE;
use crate::domain::user::{Role, User};
use crate::error::Result;
use crate::helpers::{decrypt, encrypt, get_or_create_config_dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Who is logged in, as remembered between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.display_name().to_string(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// A logged-in session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Backend the token was issued by
    pub base_url: String,
    /// Bearer token (plain text in memory, encrypted on disk)
    pub token: String,
    pub user: Option<SessionUser>,
    /// Last update timestamp (RFC3339)
    pub updated_at: Option<String>,
}

impl Session {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            user: None,
            updated_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    pub fn with_user(mut self, user: &User) -> Self {
        self.user = Some(SessionUser::from(user));
        self
    }
}

/// Reads and writes `session.toml`
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn open_default() -> Result<Self> {
        Ok(Self::in_dir(&get_or_create_config_dir()?))
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session, if any
    ///
    /// A token that no longer decrypts is discarded rather than used.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let mut session: Session = toml::from_str(&content)?;
        match decrypt(&session.token) {
            Ok(token) => session.token = token,
            Err(e) => {
                warn!("Discarding stored session: {e}");
                return Ok(None);
            }
        }
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let mut stored = session.clone();
        stored.token = encrypt(&session.token)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(&stored)?)?;
        info!("Saved session for {}", session.base_url);
        Ok(())
    }

    /// Forget the session (logout)
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
