#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Mutex, Once};

use ra_backlog_lib::services::backlog::{BacklogEntry, PlayerStats, PlayerStatsLookup};
use ra_backlog_lib::services::reference::{ReferenceLookup, ReferenceRecord};
use ra_backlog_lib::types::errors::AppResult;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// In-memory reference database keyed by exact search term.
#[derive(Default)]
pub struct FakeReference {
    pub results: HashMap<String, Vec<ReferenceRecord>>,
    pub calls: Mutex<usize>,
}

impl FakeReference {
    pub fn with(mut self, term: &str, id: &str, title: &str, beat: f64, complete: f64) -> Self {
        self.results.entry(term.to_string()).or_default().push(ReferenceRecord {
            id: id.to_string(),
            title: title.to_string(),
            beat_hours: Some(beat),
            complete_hours: Some(complete),
        });
        self
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl ReferenceLookup for FakeReference {
    fn name(&self) -> &str {
        "HLTB"
    }

    async fn search(&self, term: &str) -> AppResult<Vec<ReferenceRecord>> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.results.get(term).cloned().unwrap_or_default())
    }
}

/// Player stats where the mastery time equals the game id.
pub struct FakeStats;

impl PlayerStatsLookup for FakeStats {
    async fn player_stats(&self, id: u64) -> PlayerStats {
        PlayerStats {
            master_hours: Some(id as f64),
            players: Some(10),
            ..PlayerStats::default()
        }
    }
}

pub fn entry(id: u64, title: &str, system: &str) -> BacklogEntry {
    BacklogEntry {
        id,
        title: title.to_string(),
        system: system.to_string(),
        achievements: 30,
        points: 300,
    }
}
