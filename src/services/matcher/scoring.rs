//! Similarity scoring between normalized titles.
//!
//! The base similarity is a string ratio; a sequel adjustment then discounts
//! pairs whose trailing sequel markers disagree (`aladdin` vs `aladdin iii`).
//! Both functions operate on normalized forms only.

use regex::Regex;
use std::sync::LazyLock;

use super::rules::SEQUEL_KEYWORDS;
use super::types::MatchThresholds;

/// Ceiling for non-identical strings, so only equality scores 1.0.
const MAX_INEXACT_SIMILARITY: f64 = 0.99;

/// Roman numerals up to XXIX.
static RE_ROMAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^x{0,2}(?:ix|iv|v?i{0,3})$").expect("Invalid regex"));

/// Trailing marker that identifies a follow-up release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequelMarker {
    /// Arabic or Roman numeral, compared by value (`ii` == `2`).
    Numeral(u32),
    Keyword(&'static str),
}

/// Detect a sequel marker on the last token of a normalized title.
///
/// Single-token titles never carry a marker (`1942` is a title, not a sequel).
/// A lone `i` is not treated as a numeral.
pub fn sequel_marker(normalized: &str) -> Option<SequelMarker> {
    let mut tokens = normalized.split_whitespace();
    let last = tokens.next_back()?;
    tokens.next_back()?;

    if !last.is_empty() && last.len() <= 4 && last.chars().all(|c| c.is_ascii_digit()) {
        return last.parse().ok().map(SequelMarker::Numeral);
    }

    if RE_ROMAN.is_match(last) {
        if let Some(value) = roman_value(last) {
            if value >= 2 {
                return Some(SequelMarker::Numeral(value));
            }
        }
    }

    SEQUEL_KEYWORDS
        .iter()
        .copied()
        .find(|k| *k == last)
        .map(SequelMarker::Keyword)
}

fn roman_value(token: &str) -> Option<u32> {
    let digits = token
        .chars()
        .map(|c| match c {
            'i' => Some(1i64),
            'v' => Some(5),
            'x' => Some(10),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    let mut total = 0i64;
    for (i, value) in digits.iter().enumerate() {
        match digits.get(i + 1) {
            Some(next) if next > value => total -= value,
            _ => total += value,
        }
    }
    u32::try_from(total).ok().filter(|v| *v > 0)
}

/// Symmetric similarity in `[0.0, 1.0]`, exactly 1.0 iff the strings are equal.
///
/// Best of normalized Levenshtein (typos) and Sørensen-Dice over bigrams
/// (reordered or prefixed words such as `disneys aladdin`).
pub fn base_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let edit = strsim::normalized_levenshtein(a, b);
    let dice = strsim::sorensen_dice(a, b);
    edit.max(dice).clamp(0.0, MAX_INEXACT_SIMILARITY)
}

/// Score a normalized query against a normalized candidate title.
pub fn score(query: &str, candidate: &str) -> f64 {
    score_with(query, candidate, MatchThresholds::default().sequel_penalty)
}

/// [`score`] with an explicit sequel penalty factor.
pub fn score_with(query: &str, candidate: &str, sequel_penalty: f64) -> f64 {
    let base = base_similarity(query, candidate);
    if base == 0.0 {
        return 0.0;
    }

    if sequel_marker(query) != sequel_marker(candidate) {
        base * sequel_penalty
    } else {
        base
    }
}

#[cfg(test)]
#[path = "tests/scoring_tests.rs"]
mod tests;
