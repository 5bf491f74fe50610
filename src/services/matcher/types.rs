//! Domain types for the title matcher.
//!
//! Contains: Candidate, ScoredCandidate, MatchKind, MatchResult, MatchThresholds.

use serde::{Deserialize, Serialize};

/// A reference record proposed as a possible match for a backlog title.
///
/// Supplied per query by the caller; the matcher never caches candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Identifier in the reference database.
    pub id: String,
    /// Title exactly as the reference database spells it.
    pub title: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A candidate scored against one normalized query variant.
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub candidate: &'a Candidate,
    /// Canonical (normalized) form of the candidate title.
    pub normalized: String,
    /// Similarity in `[0.0, 1.0]` after the sequel adjustment.
    pub score: f64,
    /// Distance between the candidate's raw title length and the query's raw length.
    pub length_gap: usize,
}

/// Sort scored candidates deterministically: score desc → length gap asc → title asc → id asc.
///
/// Input order never influences the result.
pub fn sort_scored_deterministic(scored: &mut [ScoredCandidate<'_>]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.length_gap.cmp(&b.length_gap))
            .then_with(|| a.candidate.title.cmp(&b.candidate.title))
            .then_with(|| a.candidate.id.cmp(&b.candidate.id))
    });
}

/// Confidence class of a resolved match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    Exact,
    Fuzzy,
    Loose,
    Poor,
    NoMatch,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::Exact => write!(f, "Exact"),
            MatchKind::Fuzzy => write!(f, "Fuzzy"),
            MatchKind::Loose => write!(f, "Loose"),
            MatchKind::Poor => write!(f, "Poor"),
            MatchKind::NoMatch => write!(f, "NoMatch"),
        }
    }
}

/// Classified outcome of resolving one backlog title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MatchResult {
    /// Normalized query and normalized candidate title are identical.
    Exact { candidate: Candidate },
    /// Score at or above the fuzzy threshold.
    Fuzzy { candidate: Candidate, score: f64 },
    /// Score between the loose and fuzzy thresholds.
    Loose { candidate: Candidate, score: f64 },
    /// Best available candidate, below the loose threshold.
    Poor { candidate: Candidate, score: f64 },
    /// Empty candidate set, empty title, or every score at the floor.
    NoMatch,
}

impl MatchResult {
    /// Build a result from an already decided class.
    pub fn from_kind(kind: MatchKind, candidate: Candidate, score: f64) -> Self {
        match kind {
            MatchKind::Exact => MatchResult::Exact { candidate },
            MatchKind::Fuzzy => MatchResult::Fuzzy { candidate, score },
            MatchKind::Loose => MatchResult::Loose { candidate, score },
            MatchKind::Poor => MatchResult::Poor { candidate, score },
            MatchKind::NoMatch => MatchResult::NoMatch,
        }
    }

    pub fn kind(&self) -> MatchKind {
        match self {
            MatchResult::Exact { .. } => MatchKind::Exact,
            MatchResult::Fuzzy { .. } => MatchKind::Fuzzy,
            MatchResult::Loose { .. } => MatchKind::Loose,
            MatchResult::Poor { .. } => MatchKind::Poor,
            MatchResult::NoMatch => MatchKind::NoMatch,
        }
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            MatchResult::Exact { candidate }
            | MatchResult::Fuzzy { candidate, .. }
            | MatchResult::Loose { candidate, .. }
            | MatchResult::Poor { candidate, .. } => Some(candidate),
            MatchResult::NoMatch => None,
        }
    }

    /// Score of the chosen candidate (`1.0` for exact, `0.0` for no match).
    pub fn score(&self) -> f64 {
        match self {
            MatchResult::Exact { .. } => 1.0,
            MatchResult::Fuzzy { score, .. }
            | MatchResult::Loose { score, .. }
            | MatchResult::Poor { score, .. } => *score,
            MatchResult::NoMatch => 0.0,
        }
    }

    /// Human-readable review note for the export; empty for exact matches.
    ///
    /// `lookup_name` names the reference database (e.g. "HLTB").
    pub fn comment(&self, lookup_name: &str) -> String {
        match self {
            MatchResult::Exact { .. } => String::new(),
            MatchResult::Fuzzy { candidate, .. } => format!("Fuzzy match: {}", candidate.title),
            MatchResult::Loose { candidate, score } => format!(
                "Loose match ({}%): {}",
                percent(*score),
                candidate.title
            ),
            MatchResult::Poor { candidate, score } => format!(
                "Poor match ({}%): {} - VERIFY",
                percent(*score),
                candidate.title
            ),
            MatchResult::NoMatch => format!("No {lookup_name} match found"),
        }
    }
}

fn percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

/// Score boundaries used by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchThresholds {
    /// Lower bound (inclusive) of `Fuzzy`.
    pub fuzzy: f64,
    /// Lower bound (inclusive) of `Loose`.
    pub loose: f64,
    /// Below this, fallback variants are tried.
    pub acceptable: f64,
    /// At or below this, the result is `NoMatch` instead of `Poor`.
    pub no_confidence: f64,
    /// Multiplier applied when sequel markers disagree.
    pub sequel_penalty: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            fuzzy: 0.80,
            loose: 0.50,
            acceptable: 0.50,
            no_confidence: 0.0,
            sequel_penalty: 0.6,
        }
    }
}
