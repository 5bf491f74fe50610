//! Data tables driving title normalization and sequel detection.
//!
//! Decoration tags are described as token classes (delimiter shape + keyword
//! allow-list) and franchise spellings as an ordered override list, so new
//! conventions are added here as data without touching the normalizer.

use regex::Regex;
use std::sync::LazyLock;

// ── Token classes ────────────────────────────────────────────────────

/// Delimiter shape of a decoration token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `~Hack~`, `~Homebrew~`
    Tilde,
    /// `[Subset - Bonus]`, `[!]`
    Bracket,
    /// `(USA)`, `(Rev 1)`
    Paren,
}

impl Delimiter {
    /// Stripping order: tags first, then parenthetical annotations.
    pub const ORDER: [Delimiter; 3] = [Delimiter::Tilde, Delimiter::Bracket, Delimiter::Paren];

    /// Regex matching one token of this shape; group 1 is the inner text.
    pub fn token_regex(self) -> &'static Regex {
        match self {
            Delimiter::Tilde => &RE_TILDE,
            Delimiter::Bracket => &RE_BRACKET,
            Delimiter::Paren => &RE_PAREN,
        }
    }
}

static RE_TILDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~([^~]*)~").expect("Invalid regex"));
static RE_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]").expect("Invalid regex"));
static RE_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*)\)").expect("Invalid regex"));

/// Which inner texts a token class accepts as decoration.
#[derive(Debug, Clone)]
pub enum Keywords {
    /// Every token of this shape is decoration.
    Any,
    /// Each comma/slash separated part must match one of these (anchored, case-insensitive).
    Parts(Vec<Regex>),
}

/// One class of decoration token, e.g. "region code in parentheses".
#[derive(Debug, Clone)]
pub struct TokenClass {
    pub name: &'static str,
    pub delimiter: Delimiter,
    pub keywords: Keywords,
}

impl TokenClass {
    /// Class that strips every token with the given delimiter.
    pub fn any(name: &'static str, delimiter: Delimiter) -> Self {
        Self {
            name,
            delimiter,
            keywords: Keywords::Any,
        }
    }

    /// Class built from regex fragments (e.g. `Rev\s*[A-Z0-9]*`).
    pub fn from_patterns(
        name: &'static str,
        delimiter: Delimiter,
        patterns: &[&str],
    ) -> Result<Self, regex::Error> {
        let compiled = patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i)^(?:{p})$")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name,
            delimiter,
            keywords: Keywords::Parts(compiled),
        })
    }

    /// Class built from literal keywords (e.g. `USA`, `Mega Drive`).
    pub fn from_literals(
        name: &'static str,
        delimiter: Delimiter,
        literals: &[&str],
    ) -> Result<Self, regex::Error> {
        let escaped: Vec<String> = literals.iter().map(|l| regex::escape(l)).collect();
        let refs: Vec<&str> = escaped.iter().map(String::as_str).collect();
        Self::from_patterns(name, delimiter, &refs)
    }

    /// Whether a single part (already split and trimmed) belongs to this class.
    pub fn accepts_part(&self, part: &str) -> bool {
        match &self.keywords {
            Keywords::Any => true,
            Keywords::Parts(patterns) => patterns.iter().any(|re| re.is_match(part)),
        }
    }

    pub fn accepts_all(&self) -> bool {
        matches!(self.keywords, Keywords::Any)
    }
}

/// Split the inner text of a token into its comma/slash separated parts.
pub fn token_parts(inner: &str) -> Vec<&str> {
    inner
        .split([',', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

const REGION_CODES: &[&str] = &[
    "USA", "Europe", "Japan", "World", "Asia", "Australia", "Brazil", "Canada", "China", "France",
    "Germany", "Hong Kong", "Italy", "Korea", "Netherlands", "Scandinavia", "Spain", "Sweden",
    "Taiwan", "UK", "J", "U", "E", "JU", "UE", "JUE", "PAL", "NTSC", "NTSC-U", "NTSC-J",
];

const LANGUAGE_CODES: &[&str] = &[
    "En", "Fr", "De", "Es", "It", "Ja", "Nl", "Pt", "Sv", "No", "Da", "Fi", "Zh", "Ko", "Pl", "Ru",
];

const REVISION_PATTERNS: &[&str] = &[r"Rev\s*[A-Z0-9]*", r"v\d+(?:\.\d+)*[a-z]?", r"Alt\s*\d*"];

const RELEASE_MARKERS: &[&str] = &[
    r"Beta(?:\s*\d+)?",
    r"Proto(?:type)?(?:\s*\d+)?",
    r"Sample",
    r"Demo",
    r"Kiosk",
    r"Unl(?:icensed)?",
    r"Virtual Console",
    r"PSN",
    r"XBLA",
    r"Disc\s*\d+",
    r"Hack",
    r"Homebrew",
];

const PLATFORM_NAMES: &[&str] = &[
    "Genesis", "Mega Drive", "Sega Genesis", "SNES", "Super Famicom", "Super Nintendo", "NES",
    "Famicom", "Game Boy", "Game Boy Color", "Game Boy Advance", "GB", "GBC", "GBA", "N64",
    "Nintendo 64", "Nintendo DS", "DS", "NDS", "Nintendo 3DS", "3DS", "PlayStation",
    "PlayStation 2", "PlayStation Portable", "PS1", "PSX", "PS2", "PSP", "GameCube",
    "Master System", "Game Gear", "Sega CD", "Mega CD", "32X", "Saturn", "Dreamcast", "Arcade",
    "PC Engine", "TurboGrafx-16", "TurboGrafx CD", "Atari 2600", "Atari 7800", "Atari Lynx",
    "Lynx", "Neo Geo", "Neo Geo Pocket", "Virtual Boy", "WonderSwan", "MSX", "Wii",
];

/// Standard token classes, in application order.
pub static DEFAULT_TOKEN_CLASSES: LazyLock<Vec<TokenClass>> = LazyLock::new(|| {
    vec![
        TokenClass::any("ra-tag", Delimiter::Tilde),
        TokenClass::any("bracket-tag", Delimiter::Bracket),
        TokenClass::from_literals("region", Delimiter::Paren, REGION_CODES)
            .expect("Invalid region table"),
        TokenClass::from_literals("language", Delimiter::Paren, LANGUAGE_CODES)
            .expect("Invalid language table"),
        TokenClass::from_patterns("revision", Delimiter::Paren, REVISION_PATTERNS)
            .expect("Invalid revision table"),
        TokenClass::from_patterns("release", Delimiter::Paren, RELEASE_MARKERS)
            .expect("Invalid release table"),
        TokenClass::from_literals("platform", Delimiter::Paren, PLATFORM_NAMES)
            .expect("Invalid platform table"),
    ]
});

// ── Franchise overrides ──────────────────────────────────────────────

/// Spelling override for a title family, applied before generic diacritic folding.
#[derive(Debug, Clone)]
pub struct OverrideRule {
    pub name: &'static str,
    /// The rule fires only when this matches the title.
    pub family: Regex,
    /// Rewrites applied in order.
    pub rewrites: Vec<(Regex, String)>,
}

impl OverrideRule {
    pub fn new(
        name: &'static str,
        family: &str,
        rewrites: &[(&str, &str)],
    ) -> Result<Self, regex::Error> {
        let rewrites = rewrites
            .iter()
            .map(|(pattern, replacement)| Ok((Regex::new(pattern)?, replacement.to_string())))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self {
            name,
            family: Regex::new(family)?,
            rewrites,
        })
    }

    /// Apply the rewrites if the title belongs to this family.
    pub fn apply(&self, title: &str) -> Option<String> {
        if !self.family.is_match(title) {
            return None;
        }
        let mut out = title.to_string();
        for (pattern, replacement) in &self.rewrites {
            out = pattern.replace_all(&out, replacement.as_str()).into_owned();
        }
        Some(out)
    }
}

/// Standard franchise overrides, in application order.
pub static DEFAULT_OVERRIDES: LazyLock<Vec<OverrideRule>> = LazyLock::new(|| {
    vec![OverrideRule::new(
        "pokemon",
        r"(?i)\bpok[eé]mon\b",
        &[("é", "e"), ("É", "E"), (r"(?i)\s+version\b", "")],
    )
    .expect("Invalid override table")]
});

// ── Sequel keywords ──────────────────────────────────────────────────

/// Trailing words that mark a follow-up release.
pub const SEQUEL_KEYWORDS: &[&str] = &[
    "returns",
    "revenge",
    "reloaded",
    "resurrection",
    "sequel",
    "continues",
];
