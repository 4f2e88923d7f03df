//! Title normalization for near-duplicate detection
//!
//! The catalog lists the same work many times over: reprints, binding
//! variants, anniversary editions. Comparing normalized titles instead
//! of raw ones collapses those listings to one suggestion.

use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Edition and volume noise the default normalizer drops, spelled the
/// way tokens look after diacritic folding (so `edición` is listed as
/// `edicion`). Catalog-specific; override via [`TitleNormalizer::new`].
pub const DEFAULT_TITLE_STOPWORDS: &[&str] = &[
    "edicion",
    "ed",
    "reedicion",
    "tomo",
    "volumen",
    "vol",
    "parte",
    "nueva",
    "nuevo",
    "especial",
    "aniversario",
    "ilustrada",
    "ilustrado",
    "revisada",
    "revisado",
    "ampliada",
    "ampliado",
    "bolsillo",
    "rustica",
    "tapa",
    "pasta",
    "dura",
    "blanda",
    "primera",
    "primero",
    "segunda",
    "segundo",
    "tercera",
    "tercero",
    "cuarta",
    "cuarto",
    "quinta",
    "quinto",
    "sexta",
    "sexto",
    "septima",
    "septimo",
    "octava",
    "octavo",
    "novena",
    "noveno",
    "decima",
    "decimo",
];

/// Normalizes titles into comparison keys.
///
/// - Folds to ASCII lowercase (dropping diacritics and punctuation)
/// - Collapses whitespace
/// - Removes stopword tokens, bare 4-digit years, and digit ordinals
///   such as `2a` or `3ra`
///
/// The result depends only on the input title, never on other records.
pub struct TitleNormalizer {
    stopwords: HashSet<String>,
}

impl Default for TitleNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE_STOPWORDS.iter().map(|s| s.to_string()))
    }
}

impl TitleNormalizer {
    pub fn new(stopwords: impl IntoIterator<Item = String>) -> Self {
        Self {
            stopwords: stopwords.into_iter().collect(),
        }
    }

    /// Normalize a title for comparison.
    pub fn normalize(&self, title: &str) -> String {
        let folded: String = title
            // Unicode normalize (NFKD to separate combining characters)
            .nfkd()
            // Keep only ASCII alphanumeric and space
            .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace())
            .collect::<String>()
            .to_lowercase();

        let collapsed = collapse_whitespace(&folded).trim().to_string();

        let kept: Vec<&str> = collapsed
            .split(' ')
            .filter(|token| !token.is_empty() && !self.is_noise(token))
            .collect();

        // A title made entirely of noise tokens ("1984") keeps its
        // folded form rather than collapsing to the empty key, which
        // would merge unrelated records.
        if kept.is_empty() {
            collapsed
        } else {
            kept.join(" ")
        }
    }

    fn is_noise(&self, token: &str) -> bool {
        self.stopwords.contains(token) || is_bare_year(token) || is_digit_ordinal(token)
    }
}

/// Normalize with the default stopword list.
pub fn normalize_title(title: &str) -> String {
    lazy_static::lazy_static! {
        static ref DEFAULT: TitleNormalizer = TitleNormalizer::default();
    }
    DEFAULT.normalize(title)
}

/// Bare 4-digit year tokens ("2014") are edition noise.
fn is_bare_year(token: &str) -> bool {
    token.len() == 4 && token.chars().all(|c| c.is_ascii_digit())
}

/// Digit ordinals as Spanish listings abbreviate them: `1a`, `2o`,
/// `3ra`, `4ta`, `9na`. Bare cardinals are kept - they distinguish
/// genuinely different works.
fn is_digit_ordinal(token: &str) -> bool {
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || digits.len() > 2 {
        return false;
    }

    matches!(
        &token[digits.len()..],
        "a" | "o" | "era" | "ra" | "ro" | "da" | "do" | "ta" | "to" | "va" | "vo" | "na" | "no"
    )
}

/// Collapse multiple whitespace characters into a single space
fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;

    for c in s.chars() {
        if c.is_ascii_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }

    result
}
