use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::services::matcher::MatchThresholds;
use crate::services::reference::hltb_client::DEFAULT_SEARCH_URL;

pub const DEFAULT_RA_API_BASE: &str = "https://retroachievements.org/API";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Results spreadsheet; `.xlsx` or `.csv`.
    pub output_path: PathBuf,
    pub progress_path: PathBuf,
    pub backlog_cache_path: PathBuf,
    pub credentials_path: PathBuf,
    /// Entries processed concurrently during a scan.
    pub max_concurrent_requests: usize,
    /// Pause after each entry, per worker.
    pub request_delay_ms: u64,
    /// Entries per batch; progress is flushed after every batch.
    pub batch_size: usize,
    pub ra_api_base: String,
    pub hltb_search_url: String,
    pub thresholds: MatchThresholds,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("HowLongToBeat.xlsx"),
            progress_path: PathBuf::from("hltb_progress.json"),
            backlog_cache_path: PathBuf::from("ra_wanttoplay_cache.json"),
            credentials_path: PathBuf::from(super::credentials::DEFAULT_CREDENTIALS_FILE),
            max_concurrent_requests: 5,
            request_delay_ms: 300,
            batch_size: 25,
            ra_api_base: DEFAULT_RA_API_BASE.to_string(),
            hltb_search_url: DEFAULT_SEARCH_URL.to_string(),
            thresholds: MatchThresholds::default(),
        }
    }
}

impl AppSettings {
    /// Reject values the scan cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_requests == 0 {
            return Err("max_concurrent_requests must be at least 1".to_string());
        }
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".to_string());
        }
        let t = &self.thresholds;
        if !(0.0..=1.0).contains(&t.loose) || !(0.0..=1.0).contains(&t.fuzzy) || t.loose > t.fuzzy
        {
            return Err("thresholds must satisfy 0 <= loose <= fuzzy <= 1".to_string());
        }
        if !(0.0..=1.0).contains(&t.sequel_penalty) {
            return Err("sequel_penalty must be within [0, 1]".to_string());
        }
        Ok(())
    }
}
