//! Reference-length lookup: external database of game lengths.
pub mod hltb_client;

pub use hltb_client::HltbClient;

use serde::{Deserialize, Serialize};

use crate::services::matcher::Candidate;
use crate::types::errors::AppResult;

/// A game-length record returned by a reference search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub id: String,
    pub title: String,
    /// Main story hours (main + extras when the main figure is missing).
    pub beat_hours: Option<f64>,
    /// Completionist hours.
    pub complete_hours: Option<f64>,
}

impl ReferenceRecord {
    pub fn to_candidate(&self) -> Candidate {
        Candidate::new(self.id.clone(), self.title.clone())
    }
}

/// Searchable reference database.
#[allow(async_fn_in_trait)]
pub trait ReferenceLookup {
    /// Short label used in review comments ("No HLTB match found").
    fn name(&self) -> &str;

    /// Search by a normalized title variant. Zero results is `Ok(vec![])`.
    async fn search(&self, term: &str) -> AppResult<Vec<ReferenceRecord>>;
}
