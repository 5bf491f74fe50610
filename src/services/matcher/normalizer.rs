//! Title normalization for backlog and reference titles.
//!
//! Turns a decorated catalog title into one or more comparable variants.
//! Pipeline (order matters, later steps assume earlier cleanup):
//! 1. Strip tilde and bracket tags (`~Hack~`, `[Subset - Bonus]`)
//! 2. Strip parenthetical annotations whose parts are all known (`(USA)`, `(Rev 1)`)
//! 3. Apply franchise overrides (`Pokémon ... Version` → `Pokemon ...`)
//! 4. Fold diacritics to base Latin letters
//! 5. Split alternate titles on `|`
//! 6. Per variant: move `, The`, lowercase, drop punctuation, collapse whitespace

use deunicode::deunicode_char;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::rules::{
    token_parts, Delimiter, OverrideRule, TokenClass, DEFAULT_OVERRIDES, DEFAULT_TOKEN_CLASSES,
};

static RE_TRAILING_THE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?),\s*the$").expect("Invalid regex"));

static STANDARD: LazyLock<TitleNormalizer> = LazyLock::new(|| {
    TitleNormalizer::new(DEFAULT_TOKEN_CLASSES.clone(), DEFAULT_OVERRIDES.clone())
});

/// Configurable title normalizer.
///
/// Holds the token classes and override rules it applies; `standard()` is the
/// shared instance with the built-in tables.
#[derive(Debug, Clone)]
pub struct TitleNormalizer {
    classes: Vec<TokenClass>,
    overrides: Vec<OverrideRule>,
}

impl Default for TitleNormalizer {
    fn default() -> Self {
        STANDARD.clone()
    }
}

impl TitleNormalizer {
    pub fn new(classes: Vec<TokenClass>, overrides: Vec<OverrideRule>) -> Self {
        Self { classes, overrides }
    }

    /// Shared normalizer with the built-in token classes and overrides.
    pub fn standard() -> &'static TitleNormalizer {
        &STANDARD
    }

    pub fn with_token_class(mut self, class: TokenClass) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_override(mut self, rule: OverrideRule) -> Self {
        self.overrides.push(rule);
        self
    }

    /// Normalize a raw title into its variants, primary first.
    ///
    /// Never empty: a blank or all-decoration title yields `[""]`.
    pub fn normalize(&self, raw: &str) -> Vec<String> {
        let cleaned = self.strip_decorations(raw);
        let overridden = self.apply_overrides(&cleaned);
        let folded = fold_diacritics(&overridden);

        let mut variants: Vec<String> = Vec::new();
        for segment in folded.split('|') {
            let variant = finish_variant(segment.trim());
            if !variant.is_empty() && !variants.contains(&variant) {
                variants.push(variant);
            }
        }

        if variants.is_empty() {
            variants.push(String::new());
        }
        variants
    }

    /// Single comparable form of a title: all variants joined by a space.
    ///
    /// Used for candidate titles, which are compared as a whole.
    pub fn canonical(&self, raw: &str) -> String {
        self.normalize(raw).join(" ")
    }

    /// Steps 1-2: remove decoration tokens, leaving unknown parentheticals in place.
    pub fn strip_decorations(&self, raw: &str) -> String {
        let mut text: String = raw.nfc().collect();

        for delimiter in Delimiter::ORDER {
            let classes: Vec<&TokenClass> = self
                .classes
                .iter()
                .filter(|c| c.delimiter == delimiter)
                .collect();
            if classes.is_empty() {
                continue;
            }

            text = delimiter
                .token_regex()
                .replace_all(&text, |caps: &regex::Captures| {
                    let inner = caps.get(1).map_or("", |m| m.as_str());
                    if is_decoration(&classes, inner) {
                        " ".to_string()
                    } else {
                        caps[0].to_string()
                    }
                })
                .into_owned();
        }

        text
    }

    fn apply_overrides(&self, title: &str) -> String {
        let mut out = title.to_string();
        for rule in &self.overrides {
            if let Some(rewritten) = rule.apply(&out) {
                log::trace!("Override '{}' applied: '{}' -> '{}'", rule.name, out, rewritten);
                out = rewritten;
            }
        }
        out
    }
}

/// A token is decoration when a catch-all class covers its delimiter, or when
/// every comma/slash separated part is accepted by some class.
fn is_decoration(classes: &[&TokenClass], inner: &str) -> bool {
    if classes.iter().any(|c| c.accepts_all()) {
        return true;
    }
    let parts = token_parts(inner);
    !parts.is_empty()
        && parts
            .iter()
            .all(|part| classes.iter().any(|c| c.accepts_part(part)))
}

fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || ('\u{00C0}'..='\u{024F}').contains(&c)
        || ('\u{1E00}'..='\u{1EFF}').contains(&c)
}

/// Fold diacritics on Latin letters to their base form.
///
/// Combining marks are dropped only when they sit on a Latin base letter, so
/// other scripts (e.g. kana voicing marks) survive the round trip. Letters with
/// no decomposition (`ß`, `ø`, `æ`, `ł`) are transliterated.
pub fn fold_diacritics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut on_latin = false;

    for c in text.nfd() {
        if is_combining_mark(c) {
            if !on_latin {
                out.push(c);
            }
            continue;
        }

        on_latin = is_latin_letter(c);
        if on_latin && !c.is_ascii() && c.is_alphabetic() {
            if let Some(ascii) = deunicode_char(c) {
                out.push_str(ascii);
                continue;
            }
        }
        out.push(c);
    }

    out.nfc().collect()
}

/// Step 6 for one pipe segment.
fn finish_variant(segment: &str) -> String {
    let reordered = match RE_TRAILING_THE.captures(segment) {
        Some(caps) => format!("The {}", &caps[1]),
        None => segment.to_string(),
    };

    let mut cleaned = String::with_capacity(reordered.len());
    for c in reordered.to_lowercase().chars() {
        match c {
            '\'' | '\u{2019}' | '`' => {}
            c if c.is_alphanumeric() || c.is_whitespace() => cleaned.push(c),
            _ => cleaned.push(' '),
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize with the standard tables. See [`TitleNormalizer::normalize`].
pub fn normalize_title(raw: &str) -> Vec<String> {
    STANDARD.normalize(raw)
}

/// Canonical form with the standard tables. See [`TitleNormalizer::canonical`].
pub fn canonical_title(raw: &str) -> String {
    STANDARD.canonical(raw)
}

#[cfg(test)]
#[path = "tests/normalizer_tests.rs"]
mod tests;
