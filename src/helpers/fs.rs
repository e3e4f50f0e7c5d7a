//! File System Utilities
//!
//! Platform configuration and data directories.

use crate::constants::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use home::home_dir;
use std::fs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

/// Get or create the configuration directory
///
/// - **Linux**: `~/.config/rentdesk/`
/// - **macOS**: `~/Library/Application Support/com.rentdesk.rentdesk/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\rentdesk\rentdesk\config\`
///
/// Files left in the legacy `~/.rentdesk` directory are moved over once.
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let config_dir = dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    if let Some(home) = home_dir() {
        let legacy = home.join(format!(".{APP_NAME}"));
        if legacy.is_dir() && migrate_legacy_dir(&legacy, config_dir).is_ok() {
            let _ = fs::remove_dir_all(&legacy);
        }
    }

    Ok(config_dir.to_path_buf())
}

/// Get or create the data directory (log files)
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir();

    if !data_dir.exists() {
        fs::create_dir_all(data_dir)?;
    }

    Ok(data_dir.to_path_buf())
}

/// Copy top-level files that do not exist yet in `dst`
fn migrate_legacy_dir(src: &Path, dst: &Path) -> Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        let target = dst.join(entry.file_name());
        if !target.exists() {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_keeps_existing_files() {
        let src = tempfile::tempdir().expect("src");
        let dst = tempfile::tempdir().expect("dst");
        fs::write(src.path().join("settings.toml"), "old").expect("write");
        fs::write(src.path().join("session.toml"), "legacy").expect("write");
        fs::write(dst.path().join("settings.toml"), "new").expect("write");

        migrate_legacy_dir(src.path(), dst.path()).expect("migrate");

        let settings = fs::read_to_string(dst.path().join("settings.toml")).expect("read");
        let session = fs::read_to_string(dst.path().join("session.toml")).expect("read");
        assert_eq!(settings, "new");
        assert_eq!(session, "legacy");
    }
}
