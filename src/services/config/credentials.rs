//! RetroAchievements credential storage.
//!
//! Lookup order: system keychain (feature `keychain`), environment
//! (`RA_USERNAME` / `RA_API_KEY`, `.env` supported), then a local JSON file
//! restricted to the owner.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::fs_utils::{remove_if_exists, write_private};
use crate::types::errors::{AppError, AppResult};

#[cfg(feature = "keychain")]
const KEYCHAIN_SERVICE: &str = "ra-backlog-timer";

pub const DEFAULT_CREDENTIALS_FILE: &str = ".ra_credentials.json";
pub const USERNAME_VAR: &str = "RA_USERNAME";
pub const API_KEY_VAR: &str = "RA_API_KEY";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

// The API key never appears in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"***")
            .finish()
    }
}

/// Where a credential pair was found or stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Keychain,
    Environment,
    File,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Keychain => write!(f, "system keychain"),
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::File => write!(f, "local file"),
        }
    }
}

pub struct CredentialStore {
    file_path: PathBuf,
    use_keychain: bool,
    username_var: String,
    api_key_var: String,
}

impl CredentialStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            use_keychain: cfg!(feature = "keychain"),
            username_var: USERNAME_VAR.to_string(),
            api_key_var: API_KEY_VAR.to_string(),
        }
    }

    /// File-only store (no keychain), for tests and headless setups.
    pub fn file_only(file_path: impl Into<PathBuf>) -> Self {
        Self {
            use_keychain: false,
            ..Self::new(file_path)
        }
    }

    pub fn with_env_vars(mut self, username_var: &str, api_key_var: &str) -> Self {
        self.username_var = username_var.to_string();
        self.api_key_var = api_key_var.to_string();
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn load(&self) -> Option<(Credentials, CredentialSource)> {
        if self.use_keychain {
            if let Some(creds) = keychain::load() {
                return Some((creds, CredentialSource::Keychain));
            }
        }

        if let Some(creds) = self.load_env() {
            return Some((creds, CredentialSource::Environment));
        }

        self.load_file().map(|creds| (creds, CredentialSource::File))
    }

    fn load_env(&self) -> Option<Credentials> {
        let username = env::var(&self.username_var).ok()?;
        let api_key = env::var(&self.api_key_var).ok()?;
        Some(Credentials::new(username, api_key)).filter(Credentials::is_complete)
    }

    fn load_file(&self) -> Option<Credentials> {
        let content = fs::read_to_string(&self.file_path).ok()?;
        match serde_json::from_str::<Credentials>(&content) {
            Ok(creds) if creds.is_complete() => Some(creds),
            Ok(_) => None,
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable credentials file {}: {e}",
                    self.file_path.display()
                );
                None
            }
        }
    }

    /// Persist credentials: keychain when available, otherwise the private file.
    pub fn save(&self, creds: &Credentials) -> AppResult<CredentialSource> {
        if !creds.is_complete() {
            return Err(AppError::Credentials(
                "Username and API key are both required".to_string(),
            ));
        }

        if self.use_keychain {
            match keychain::save(creds) {
                Ok(()) => return Ok(CredentialSource::Keychain),
                Err(e) => log::warn!("Keychain unavailable, using local file: {e}"),
            }
        }

        write_private(&self.file_path, &serde_json::to_string_pretty(creds)?)?;
        Ok(CredentialSource::File)
    }

    /// Remove stored credentials from the keychain and the file. Environment is untouched.
    pub fn clear(&self) -> AppResult<()> {
        if self.use_keychain {
            if let Err(e) = keychain::clear() {
                log::debug!("Keychain clear: {e}");
            }
        }
        remove_if_exists(&self.file_path)?;
        Ok(())
    }
}

#[cfg(feature = "keychain")]
mod keychain {
    use super::{Credentials, KEYCHAIN_SERVICE};

    fn entry(account: &str) -> Result<keyring::Entry, String> {
        keyring::Entry::new(KEYCHAIN_SERVICE, account)
            .map_err(|e| format!("Failed to access keychain entry: {e}"))
    }

    pub fn load() -> Option<Credentials> {
        let username = entry("username").ok()?.get_password().ok()?;
        let api_key = entry("api_key").ok()?.get_password().ok()?;
        Some(Credentials::new(username, api_key)).filter(Credentials::is_complete)
    }

    pub fn save(creds: &Credentials) -> Result<(), String> {
        entry("username")?
            .set_password(&creds.username)
            .map_err(|e| format!("Failed to store username in keychain: {e}"))?;
        entry("api_key")?
            .set_password(&creds.api_key)
            .map_err(|e| format!("Failed to store API key in keychain: {e}"))
    }

    pub fn clear() -> Result<(), String> {
        for account in ["username", "api_key"] {
            match entry(account)?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => return Err(format!("Failed to delete {account} from keychain: {e}")),
            }
        }
        Ok(())
    }
}

#[cfg(not(feature = "keychain"))]
mod keychain {
    use super::Credentials;

    pub fn load() -> Option<Credentials> {
        None
    }

    pub fn save(_creds: &Credentials) -> Result<(), String> {
        Err("Keychain support not enabled".to_string())
    }

    pub fn clear() -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/credentials_tests.rs"]
mod tests;
