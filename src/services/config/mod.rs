pub mod credentials;
pub mod models;

pub use credentials::{CredentialSource, CredentialStore, Credentials};
pub use models::*;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::services::fs_utils::atomic_write;
use crate::types::errors::{AppError, AppResult};

/// Settings persisted as JSON.
pub struct ConfigService {
    path: PathBuf,
    settings: Mutex<AppSettings>,
}

impl ConfigService {
    /// Load settings from `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: PathBuf) -> AppResult<Self> {
        let settings = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<AppSettings>(&content).map_err(|e| {
                AppError::Config(format!("Invalid settings file {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                AppSettings::default()
            }
            Err(e) => return Err(e.into()),
        };
        settings.validate().map_err(AppError::Config)?;

        Ok(Self {
            path,
            settings: Mutex::new(settings),
        })
    }

    /// Service over `path` that starts from defaults when the file cannot be read.
    pub fn new(path: PathBuf) -> Self {
        match Self::load(path.clone()) {
            Ok(service) => service,
            Err(e) => {
                log::error!("Failed to load settings: {e}");
                Self {
                    path,
                    settings: Mutex::new(AppSettings::default()),
                }
            }
        }
    }

    /// `<config dir>/ra-backlog-timer/settings.json`, or `./settings.json` without a config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("ra-backlog-timer").join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_settings(&self) -> AppSettings {
        self.settings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn save_settings(&self, new_settings: AppSettings) -> AppResult<()> {
        new_settings.validate().map_err(AppError::Config)?;
        atomic_write(&self.path, &serde_json::to_string_pretty(&new_settings)?)?;

        *self
            .settings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = new_settings;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
