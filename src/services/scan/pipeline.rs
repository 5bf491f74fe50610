use futures_util::stream::{self, StreamExt};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::time::Duration;

use crate::services::backlog::{BacklogEntry, PlayerStatsLookup};
use crate::services::config::AppSettings;
use crate::services::matcher::{
    canonical_title, normalize_title, resolve_with, Candidate, MatchResult, MatchThresholds,
    TitleNormalizer,
};
use crate::services::progress::{ProgressRecord, ProgressStore};
use crate::services::reference::{ReferenceLookup, ReferenceRecord};
use crate::types::errors::AppResult;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub max_concurrent: usize,
    pub request_delay: Duration,
    pub batch_size: usize,
    pub thresholds: MatchThresholds,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from(&AppSettings::default())
    }
}

impl From<&AppSettings> for ScanOptions {
    fn from(settings: &AppSettings) -> Self {
        Self {
            max_concurrent: settings.max_concurrent_requests.max(1),
            request_delay: Duration::from_millis(settings.request_delay_ms),
            batch_size: settings.batch_size.max(1),
            thresholds: settings.thresholds,
        }
    }
}

/// Counters reported at the end of a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub total: usize,
    /// Already in the progress store before this run.
    pub from_cache: usize,
    pub fetched: usize,
    /// Fetched but no reference match was found.
    pub unmatched: usize,
    /// Reference search failed; left out of the store so the next run retries.
    pub failed: usize,
}

/// Outcome of searching the reference database for one title.
#[derive(Debug, Clone)]
pub struct TitleLookup {
    pub result: MatchResult,
    /// The reference record behind the chosen candidate.
    pub record: Option<ReferenceRecord>,
    /// Search terms actually sent.
    pub searched: Vec<String>,
    /// Last search error, kept only when no acceptable match was found.
    pub error: Option<String>,
}

/// One processed backlog entry.
#[derive(Debug, Clone)]
pub struct ProcessedEntry {
    pub record: ProgressRecord,
    /// Set when the reference lookup errored; the record is then not final.
    pub error: Option<String>,
}

impl ProcessedEntry {
    pub fn is_resolved(&self) -> bool {
        self.error.is_none()
    }
}

pub struct ScanPipeline<'a, R, P> {
    reference: &'a R,
    stats: &'a P,
    options: ScanOptions,
}

impl<'a, R, P> ScanPipeline<'a, R, P>
where
    R: ReferenceLookup,
    P: PlayerStatsLookup,
{
    pub fn new(reference: &'a R, stats: &'a P, options: ScanOptions) -> Self {
        Self {
            reference,
            stats,
            options,
        }
    }

    /// Search terms in preference order: normalized variants, then the base
    /// title before a `:` or ` - ` subtitle separator.
    pub fn search_terms(raw: &str) -> Vec<String> {
        let mut terms = normalize_title(raw);
        if terms.len() == 1 && terms[0].is_empty() {
            return Vec::new();
        }

        let stripped = TitleNormalizer::standard().strip_decorations(raw);
        let first_segment = stripped.split('|').next().unwrap_or_default();
        let base = [":", " - "]
            .iter()
            .find_map(|sep| first_segment.split_once(sep).map(|(head, _)| head))
            .map(canonical_title)
            .filter(|b| !b.is_empty());
        if let Some(base) = base {
            if !terms.contains(&base) {
                terms.push(base);
            }
        }
        terms
    }

    /// Search and resolve one title. Later terms are only searched while the
    /// best match is below the acceptable floor.
    pub async fn lookup_title(&self, raw: &str) -> TitleLookup {
        let terms = Self::search_terms(raw);
        let mut records: Vec<ReferenceRecord> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut searched = Vec::new();
        let mut result = MatchResult::NoMatch;
        let mut last_error = None;

        for term in terms {
            match self.reference.search(&term).await {
                Ok(found) => {
                    for record in found {
                        if seen.insert(record.id.clone()) {
                            records.push(record);
                        }
                    }
                }
                Err(e) => {
                    warn!("{} search for '{}' failed: {e}", self.reference.name(), term);
                    last_error = Some(e.to_string());
                }
            }
            searched.push(term);

            let candidates: Vec<Candidate> = records.iter().map(ReferenceRecord::to_candidate).collect();
            result = resolve_with(raw, &candidates, &self.options.thresholds);
            if result.score() >= self.options.thresholds.acceptable {
                break;
            }
        }

        let record = result
            .candidate()
            .and_then(|c| records.iter().find(|r| r.id == c.id))
            .cloned();
        debug!("'{}' -> {:?} after {} searches", raw, result.kind(), searched.len());

        let error = if result.score() >= self.options.thresholds.acceptable {
            None
        } else {
            last_error
        };

        TitleLookup {
            result,
            record,
            searched,
            error,
        }
    }

    /// Full record for one entry: reference match plus player statistics.
    ///
    /// A failed reference search yields an `Error: ...` comment and an unresolved entry.
    pub async fn process_entry(&self, entry: &BacklogEntry) -> ProcessedEntry {
        let (lookup, stats) = futures_util::join!(
            self.lookup_title(&entry.title),
            self.stats.player_stats(entry.id)
        );

        let mut record = ProgressRecord::from_match(&lookup.result, self.reference.name());
        if let Some(reference) = &lookup.record {
            record.beat_hours = reference.beat_hours;
            record.complete_hours = reference.complete_hours;
        }
        record.ra_beat_hours = stats.beat_hours;
        record.ra_master_hours = stats.master_hours;
        record.ra_beat_hardcore_hours = stats.beat_hardcore_hours;
        record.ra_master_hardcore_hours = stats.master_hardcore_hours;
        record.ra_players = stats.players;
        if let Some(e) = &lookup.error {
            record.comment = format!("Error: {e}");
        }

        ProcessedEntry {
            record,
            error: lookup.error,
        }
    }

    /// Process every entry missing from `store`, in batches.
    ///
    /// `on_record` sees each finished entry (completion order within a batch),
    /// failed lookups included. Only resolved entries are stored.
    pub async fn run<S, F>(
        &self,
        entries: &[BacklogEntry],
        store: &mut S,
        mut on_record: F,
    ) -> AppResult<ScanStats>
    where
        S: ProgressStore,
        F: FnMut(&BacklogEntry, &ProgressRecord),
    {
        let pending: Vec<&BacklogEntry> = entries.iter().filter(|e| !store.contains(e.id)).collect();
        let mut stats = ScanStats {
            total: entries.len(),
            from_cache: entries.len() - pending.len(),
            ..ScanStats::default()
        };
        info!(
            "Scan: {} entries, {} cached, {} to fetch",
            stats.total,
            stats.from_cache,
            pending.len()
        );

        let delay = self.options.request_delay;
        for batch in pending.chunks(self.options.batch_size) {
            let finished: Vec<(&BacklogEntry, ProcessedEntry)> = stream::iter(batch.iter().copied())
                .map(|entry| async move {
                    let processed = self.process_entry(entry).await;
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    (entry, processed)
                })
                .buffer_unordered(self.options.max_concurrent)
                .collect()
                .await;

            for (entry, processed) in finished {
                on_record(entry, &processed.record);
                if !processed.is_resolved() {
                    stats.failed += 1;
                    continue;
                }
                if processed.record.matched_title.is_none() {
                    stats.unmatched += 1;
                }
                store.insert(entry.id, processed.record);
                stats.fetched += 1;
            }
            store.flush()?;
            debug!("Saved progress: {}/{}", stats.fetched, pending.len());
        }
        if stats.failed > 0 {
            warn!("{} entries failed and will be retried on the next scan", stats.failed);
        }

        Ok(stats)
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
