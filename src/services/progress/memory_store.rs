use std::collections::BTreeMap;

use super::{ProgressRecord, ProgressStore};
use crate::types::errors::AppResult;

/// Volatile store, for tests and offline `match` runs.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    records: BTreeMap<u64, ProgressRecord>,
    pub flushes: usize,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn get(&self, id: u64) -> Option<&ProgressRecord> {
        self.records.get(&id)
    }

    fn insert(&mut self, id: u64, record: ProgressRecord) {
        self.records.insert(id, record);
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn flush(&mut self) -> AppResult<()> {
        self.flushes += 1;
        Ok(())
    }
}
