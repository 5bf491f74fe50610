//! On-disk copy of the last fetched Want to Play list.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::models::BacklogEntry;
use crate::services::fs_utils::atomic_write;
use crate::types::errors::AppResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheFile {
    username: String,
    games: Vec<BacklogEntry>,
}

pub struct BacklogCache {
    path: PathBuf,
}

impl BacklogCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached list for `username` (case-insensitive). Unreadable caches count as missing.
    pub fn load(&self, username: &str) -> Option<Vec<BacklogEntry>> {
        let content = fs::read_to_string(&self.path).ok()?;
        let cache: CacheFile = match serde_json::from_str(&content) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Ignoring unreadable backlog cache {}: {e}", self.path.display());
                return None;
            }
        };

        if cache.username.to_lowercase() != username.to_lowercase() {
            log::info!(
                "Backlog cache belongs to '{}', not '{}'",
                cache.username,
                username
            );
            return None;
        }
        Some(cache.games)
    }

    /// Entries regardless of owner, for offline reports.
    pub fn load_any(&self) -> Option<Vec<BacklogEntry>> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str::<CacheFile>(&content)
            .ok()
            .map(|c| c.games)
    }

    pub fn save(&self, username: &str, games: &[BacklogEntry]) -> AppResult<()> {
        let cache = CacheFile {
            username: username.to_string(),
            games: games.to_vec(),
        };
        atomic_write(&self.path, &serde_json::to_string_pretty(&cache)?)
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
