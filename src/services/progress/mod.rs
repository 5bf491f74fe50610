//! Resume-safe progress cache keyed by backlog id.
//!
//! The scan pipeline receives a store explicitly; nothing here is global.
pub mod json_store;
pub mod memory_store;

pub use json_store::JsonProgressStore;
pub use memory_store::MemoryProgressStore;

use serde::{Deserialize, Serialize};

use crate::services::matcher::{MatchKind, MatchResult};
use crate::types::errors::AppResult;

/// Everything computed for one backlog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub matched_title: Option<String>,
    pub match_kind: MatchKind,
    pub match_score: f64,
    /// Review note for the export; empty for exact matches.
    #[serde(default)]
    pub comment: String,
    pub beat_hours: Option<f64>,
    pub complete_hours: Option<f64>,
    pub ra_beat_hours: Option<f64>,
    pub ra_master_hours: Option<f64>,
    #[serde(default)]
    pub ra_beat_hardcore_hours: Option<f64>,
    #[serde(default)]
    pub ra_master_hardcore_hours: Option<f64>,
    pub ra_players: Option<u64>,
}

impl ProgressRecord {
    /// Record for a result with no reference times attached yet.
    pub fn from_match(result: &MatchResult, lookup_name: &str) -> Self {
        Self {
            matched_title: result.candidate().map(|c| c.title.clone()),
            match_kind: result.kind(),
            match_score: result.score(),
            comment: result.comment(lookup_name),
            beat_hours: None,
            complete_hours: None,
            ra_beat_hours: None,
            ra_master_hours: None,
            ra_beat_hardcore_hours: None,
            ra_master_hardcore_hours: None,
            ra_players: None,
        }
    }

    pub fn has_time_data(&self) -> bool {
        self.beat_hours.is_some() || self.complete_hours.is_some() || self.ra_master_hours.is_some()
    }
}

/// Key-value persistence for progress records.
pub trait ProgressStore {
    fn get(&self, id: u64) -> Option<&ProgressRecord>;
    fn insert(&mut self, id: u64, record: ProgressRecord);
    fn len(&self) -> usize;
    /// Persist pending changes. No-op for in-memory stores.
    fn flush(&mut self) -> AppResult<()>;

    fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
