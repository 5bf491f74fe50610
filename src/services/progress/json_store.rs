use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ProgressRecord, ProgressStore};
use crate::services::fs_utils::atomic_write;
use crate::types::errors::{AppError, AppResult};

/// Progress file on disk: a JSON object keyed by backlog id.
#[derive(Debug)]
pub struct JsonProgressStore {
    path: PathBuf,
    records: BTreeMap<u64, ProgressRecord>,
    dirty: bool,
}

impl JsonProgressStore {
    /// Open the store, loading existing records. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                AppError::Parse(format!("Progress file {} is corrupt: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        log::debug!("Loaded {} progress records from {}", records.len(), path.display());
        Ok(Self {
            path,
            records,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonProgressStore {
    fn get(&self, id: u64) -> Option<&ProgressRecord> {
        self.records.get(&id)
    }

    fn insert(&mut self, id: u64, record: ProgressRecord) {
        self.records.insert(id, record);
        self.dirty = true;
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn flush(&mut self) -> AppResult<()> {
        if !self.dirty {
            return Ok(());
        }
        atomic_write(&self.path, &serde_json::to_string(&self.records)?)?;
        self.dirty = false;
        log::debug!("Saved {} progress records", self.records.len());
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/json_store_tests.rs"]
mod tests;
