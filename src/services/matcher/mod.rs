//! Title matcher: normalizer, scorer and resolver.
//!
//! Pure and stateless; no I/O happens here. Callers own candidate fetching,
//! caching and persistence.
pub mod normalizer;
pub mod resolver;
pub mod rules;
pub mod scoring;
pub mod types;

pub use normalizer::{canonical_title, fold_diacritics, normalize_title, TitleNormalizer};
pub use resolver::{classify, explain, resolve, resolve_with, MatchReport};
pub use scoring::{base_similarity, score, score_with, sequel_marker, SequelMarker};
pub use types::{Candidate, MatchKind, MatchResult, MatchThresholds, ScoredCandidate};

use rayon::prelude::*;

/// One backlog title with the candidates fetched for it.
#[derive(Debug, Clone)]
pub struct MatchJob {
    pub title: String,
    pub candidates: Vec<Candidate>,
}

/// Resolve many titles in parallel. Output order follows `jobs`.
pub fn resolve_all(jobs: &[MatchJob], thresholds: &MatchThresholds) -> Vec<MatchResult> {
    jobs.par_iter()
        .map(|job| resolve_with(&job.title, &job.candidates, thresholds))
        .collect()
}
