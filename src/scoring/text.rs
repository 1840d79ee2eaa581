//! Text normalization and fuzzy similarity.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Options for text normalization before fuzzy comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Normalize Unicode to NFKC form
    pub normalize_unicode: bool,

    /// Fix ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,

    /// Join words hyphenated at line breaks
    pub fix_hyphenation: bool,

    /// Fold case
    pub lowercase: bool,

    /// Drop punctuation and symbols
    pub strip_punctuation: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            fix_hyphenation: true,
            lowercase: true,
            strip_punctuation: false,
        }
    }
}

/// Cleans paragraph text so that extraction artifacts do not count as
/// differences.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    options: NormalizeOptions,
    hyphenation_regex: Regex,
    ligature_map: Vec<(&'static str, &'static str)>,
}

impl TextNormalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            hyphenation_regex: Regex::new(r"(\p{L})-\s*\n\s*(\p{Ll})")
                .expect("hyphenation pattern"),
            ligature_map: vec![
                ("\u{FB00}", "ff"),  // ﬀ
                ("\u{FB01}", "fi"),  // ﬁ
                ("\u{FB02}", "fl"),  // ﬂ
                ("\u{FB03}", "ffi"), // ﬃ
                ("\u{FB04}", "ffl"), // ﬄ
                ("\u{FB05}", "st"),  // ﬅ (long s + t)
                ("\u{FB06}", "st"),  // ﬆ
            ],
        }
    }

    /// Normalize a text.
    pub fn normalize(&self, text: &str) -> String {
        let mut result = text.to_string();

        // Ligatures are mapped even when NFKC is off.
        if self.options.fix_ligatures {
            for (ligature, replacement) in &self.ligature_map {
                result = result.replace(ligature, replacement);
            }
        }

        if self.options.normalize_unicode {
            result = result.nfkc().collect();
        }

        if self.options.fix_hyphenation {
            result = self.hyphenation_regex.replace_all(&result, "$1$2").to_string();
        }

        if self.options.lowercase {
            result = result.to_lowercase();
        }

        if self.options.strip_punctuation {
            result = result
                .chars()
                .filter(|c| c.is_alphanumeric() || c.is_whitespace())
                .collect();
        }

        result.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

/// Normalized edit similarity in [0, 1].
///
/// Two empty strings are identical (1.0); exactly one empty string shares
/// nothing with the other (0.0).
pub fn fuzzy_ratio(a: &str, b: &str) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => strsim::normalized_levenshtein(a, b),
    }
}

/// Edit similarity of the texts with their tokens sorted, so that word order
/// changes between translations are not penalized.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    fuzzy_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Best of [`fuzzy_ratio`] and [`token_sort_ratio`].
pub fn text_similarity(a: &str, b: &str) -> f64 {
    fuzzy_ratio(a, b).max(token_sort_ratio(a, b))
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ligatures_and_case() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("The \u{FB01}nal  Oﬃce"), "the final office");
    }

    #[test]
    fn test_normalize_hyphenation() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("infor-\nmation"), "information");
        assert_eq!(normalizer.normalize("long-term"), "long-term");
    }

    #[test]
    fn test_normalize_strip_punctuation() {
        let normalizer = TextNormalizer::new(NormalizeOptions {
            strip_punctuation: true,
            ..Default::default()
        });
        assert_eq!(normalizer.normalize("Art. 5, (b)!"), "art 5 b");
    }

    #[test]
    fn test_normalize_whitespace() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.normalize("  a \n\t b  "), "a b");
        assert_eq!(normalizer.normalize(""), "");
    }

    #[test]
    fn test_fuzzy_ratio_edges() {
        assert_eq!(fuzzy_ratio("", ""), 1.0);
        assert_eq!(fuzzy_ratio("abc", ""), 0.0);
        assert_eq!(fuzzy_ratio("", "abc"), 0.0);
        assert_eq!(fuzzy_ratio("abc", "abc"), 1.0);
        assert_eq!(fuzzy_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_token_sort_ratio_ignores_order() {
        assert_eq!(token_sort_ratio("rights human", "human rights"), 1.0);
        assert!(fuzzy_ratio("rights human", "human rights") < 1.0);
        assert_eq!(text_similarity("rights human", "human rights"), 1.0);
    }
}
