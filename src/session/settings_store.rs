//! Settings persistence

use crate::constants::{ENV_API_URL, SETTINGS_FILE};
use crate::domain::settings::AppSettings;
use crate::error::Result;
use crate::helpers::get_or_create_config_dir;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads and writes `settings.toml`
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store in the platform config directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::in_dir(&get_or_create_config_dir()?))
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(SETTINGS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing or empty file yields defaults
    pub fn load(&self) -> Result<AppSettings> {
        if !self.path.exists() {
            debug!("No settings file at {}, using defaults", self.path.display());
            return Ok(AppSettings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AppSettings::default());
        }

        Ok(toml::from_str(&content)?)
    }

    /// Load settings, then apply environment overrides
    pub fn load_with_env(&self) -> Result<AppSettings> {
        let mut settings = self.load()?;
        apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn save(&self, settings: &AppSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(settings)?)?;
        info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Apply `RENTDESK_API_URL` when set and non-empty
pub fn apply_env_overrides(settings: &mut AppSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        settings.api.base_url = url.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::in_dir(dir.path());
        assert_eq!(store.load().expect("load"), AppSettings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::in_dir(dir.path());
        let mut settings = AppSettings::default();
        settings.api.base_url = "https://rentals.test/api".into();
        settings.storage.max_upload_bytes = 1024;
        store.save(&settings).expect("save");
        assert_eq!(store.load().expect("load"), settings);
    }

    #[test]
    fn env_override_replaces_base_url() {
        let mut settings = AppSettings::default();
        apply_env_overrides(&mut settings, |key| {
            (key == ENV_API_URL).then(|| " https://env.test/api ".to_string())
        });
        assert_eq!(settings.api.base_url, "https://env.test/api");

        let mut untouched = AppSettings::default();
        apply_env_overrides(&mut untouched, |_| Some(String::new()));
        assert_eq!(untouched, AppSettings::default());
    }
}
