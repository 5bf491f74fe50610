//! Match resolution: raw backlog title + candidate set → classified result.
//!
//! Pure and stateless. The primary variant is scored first; fallback variants
//! (alternate pipe segments) are only consulted when the primary's best score
//! stays below the acceptable floor, and may only replace it with a strictly
//! higher score.

use serde::Serialize;

use super::normalizer::TitleNormalizer;
use super::scoring::score_with;
use super::types::{
    sort_scored_deterministic, Candidate, MatchKind, MatchResult, MatchThresholds, ScoredCandidate,
};

/// Classify a score. `exact` must come from a direct string comparison.
pub fn classify(score: f64, exact: bool, thresholds: &MatchThresholds) -> MatchKind {
    if exact {
        MatchKind::Exact
    } else if score >= thresholds.fuzzy {
        MatchKind::Fuzzy
    } else if score >= thresholds.loose {
        MatchKind::Loose
    } else if score > thresholds.no_confidence {
        MatchKind::Poor
    } else {
        MatchKind::NoMatch
    }
}

/// Resolve with the default thresholds.
pub fn resolve(raw: &str, candidates: &[Candidate]) -> MatchResult {
    resolve_with(raw, candidates, &MatchThresholds::default())
}

pub fn resolve_with(raw: &str, candidates: &[Candidate], thresholds: &MatchThresholds) -> MatchResult {
    explain(raw, candidates, thresholds).result
}

/// One ranked line of a [`MatchReport`].
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub id: String,
    pub title: String,
    pub normalized: String,
    pub score: f64,
}

/// Ranking produced for one query variant.
#[derive(Debug, Clone, Serialize)]
pub struct VariantRanking {
    pub variant: String,
    pub ranked: Vec<RankedCandidate>,
}

/// Full trace of a resolution, for the `match` command and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    /// All normalized variants, primary first.
    pub variants: Vec<String>,
    /// Rankings for the variants actually tried.
    pub rankings: Vec<VariantRanking>,
    pub result: MatchResult,
}

/// Score every candidate against one normalized variant, best first.
pub fn rank_candidates<'a>(
    variant: &str,
    raw: &str,
    candidates: &'a [Candidate],
    normalized: &[String],
    thresholds: &MatchThresholds,
) -> Vec<ScoredCandidate<'a>> {
    let raw_len = raw.chars().count();
    let mut scored: Vec<ScoredCandidate<'a>> = candidates
        .iter()
        .zip(normalized)
        .map(|(candidate, norm)| ScoredCandidate {
            candidate,
            normalized: norm.clone(),
            score: score_with(variant, norm, thresholds.sequel_penalty),
            length_gap: candidate.title.chars().count().abs_diff(raw_len),
        })
        .collect();
    sort_scored_deterministic(&mut scored);
    scored
}

/// Resolve a raw title and keep the per-variant rankings.
pub fn explain(raw: &str, candidates: &[Candidate], thresholds: &MatchThresholds) -> MatchReport {
    let normalizer = TitleNormalizer::standard();
    let variants = normalizer.normalize(raw);
    let mut rankings = Vec::new();

    if candidates.is_empty() || variants[0].is_empty() {
        return MatchReport {
            variants,
            rankings,
            result: MatchResult::NoMatch,
        };
    }

    let normalized: Vec<String> = candidates
        .iter()
        .map(|c| normalizer.canonical(&c.title))
        .collect();

    // (variant index, winner)
    let mut best: Option<(usize, ScoredCandidate<'_>)> = None;

    for (index, variant) in variants.iter().enumerate() {
        if index == 1 {
            let primary_ok = best
                .as_ref()
                .is_some_and(|(_, primary)| primary.score >= thresholds.acceptable);
            if primary_ok {
                break;
            }
        }

        let ranked = rank_candidates(variant, raw, candidates, &normalized, thresholds);
        rankings.push(VariantRanking {
            variant: variant.clone(),
            ranked: ranked
                .iter()
                .map(|s| RankedCandidate {
                    id: s.candidate.id.clone(),
                    title: s.candidate.title.clone(),
                    normalized: s.normalized.clone(),
                    score: s.score,
                })
                .collect(),
        });

        let Some(top) = ranked.into_iter().next() else {
            continue;
        };
        let replace = match &best {
            None => true,
            Some((_, current)) => top.score > current.score,
        };
        if replace {
            if index > 0 {
                log::debug!(
                    "Fallback variant '{}' improved '{}' to {:.3}",
                    variant,
                    raw,
                    top.score
                );
            }
            best = Some((index, top));
        }
    }

    let result = match best {
        Some((index, winner)) => {
            let exact = variants[index] == winner.normalized;
            let kind = classify(winner.score, exact, thresholds);
            MatchResult::from_kind(kind, winner.candidate.clone(), winner.score)
        }
        None => MatchResult::NoMatch,
    };

    MatchReport {
        variants,
        rankings,
        result,
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
