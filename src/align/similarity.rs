//! Coarse binary similarity used for positional repair.
//!
//! This is a cheap pre-filter, separate from [`crate::scoring::MatchScorer`]:
//! two paragraphs are similar when any rule of [`SimilarityRule::ORDERED`]
//! holds. Rules are evaluated in priority order so the first match can be
//! reported.

use std::collections::BTreeSet;

use crate::model::ParagraphFeatures;

/// Minimum special-character occurrences for [`SimilarityRule::SameSpecialCharacters`].
pub const MIN_SPECIAL_CHARACTERS: usize = 3;

/// Word count below which a paragraph counts as short.
pub const SHORT_PARAGRAPH_WORDS: usize = 5;

/// Largest word count difference (exclusive) between two short paragraphs.
pub const MAX_SHORT_WORD_DIFFERENCE: usize = 3;

/// A named similarity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimilarityRule {
    /// Both carry the same non-empty set of numbers
    SameNumbers,
    /// Both carry the same punctuation multiset of at least
    /// [`MIN_SPECIAL_CHARACTERS`] occurrences
    SameSpecialCharacters,
    /// Both are short and of comparable length
    ShortWithCloseWordCount,
}

impl SimilarityRule {
    /// Rules in evaluation order.
    pub const ORDERED: [SimilarityRule; 3] = [
        SimilarityRule::SameNumbers,
        SimilarityRule::SameSpecialCharacters,
        SimilarityRule::ShortWithCloseWordCount,
    ];

    /// Rule name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            SimilarityRule::SameNumbers => "same_numbers",
            SimilarityRule::SameSpecialCharacters => "same_special_characters",
            SimilarityRule::ShortWithCloseWordCount => "short_with_close_word_count",
        }
    }

    /// Check if the rule holds for a pair.
    pub fn matches(&self, a: &ParagraphFeatures, b: &ParagraphFeatures) -> bool {
        match self {
            SimilarityRule::SameNumbers => same_numbers(a, b),
            SimilarityRule::SameSpecialCharacters => same_special_characters(a, b),
            SimilarityRule::ShortWithCloseWordCount => short_with_close_word_count(a, b),
        }
    }
}

/// First rule that holds for the pair, if any.
pub fn first_matching_rule(a: &ParagraphFeatures, b: &ParagraphFeatures) -> Option<SimilarityRule> {
    SimilarityRule::ORDERED
        .into_iter()
        .find(|rule| rule.matches(a, b))
}

/// Check if two paragraphs are similar under any rule.
pub fn are_similar(a: &ParagraphFeatures, b: &ParagraphFeatures) -> bool {
    first_matching_rule(a, b).is_some()
}

fn same_numbers(a: &ParagraphFeatures, b: &ParagraphFeatures) -> bool {
    if a.numbers.is_empty() || b.numbers.is_empty() {
        return false;
    }
    let set_a: BTreeSet<u64> = a.numbers.iter().copied().collect();
    let set_b: BTreeSet<u64> = b.numbers.iter().copied().collect();
    set_a == set_b
}

fn same_special_characters(a: &ParagraphFeatures, b: &ParagraphFeatures) -> bool {
    let (chars_a, chars_b) = (&a.non_alphanumeric_characters, &b.non_alphanumeric_characters);
    if chars_a.len() < MIN_SPECIAL_CHARACTERS || chars_a.len() != chars_b.len() {
        return false;
    }

    let mut sorted_a = chars_a.clone();
    let mut sorted_b = chars_b.clone();
    sorted_a.sort_unstable();
    sorted_b.sort_unstable();
    sorted_a == sorted_b
}

fn short_with_close_word_count(a: &ParagraphFeatures, b: &ParagraphFeatures) -> bool {
    let (words_a, words_b) = (a.word_count(), b.word_count());
    words_a < SHORT_PARAGRAPH_WORDS
        && words_b < SHORT_PARAGRAPH_WORDS
        && words_a.abs_diff(words_b) < MAX_SHORT_WORD_DIFFERENCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str) -> ParagraphFeatures {
        ParagraphFeatures::with_text(text)
    }

    const LONG_EN: &str = "The committee shall meet at least once every year to review the report";
    const LONG_FR: &str = "Le comité se réunit au moins une fois par an pour examiner le rapport";

    #[test]
    fn test_same_numbers() {
        let a = p("In 2019 the council adopted resolution 45 after long debates");
        let b = p("En 2019 le conseil a adopté la résolution 45 après de longs débats");
        assert!(SimilarityRule::SameNumbers.matches(&a, &b));
        assert_eq!(first_matching_rule(&a, &b), Some(SimilarityRule::SameNumbers));
    }

    #[test]
    fn test_same_numbers_ignores_order_and_duplicates() {
        let a = p("45 and 2019 and 45");
        let b = p("2019, 45");
        assert!(SimilarityRule::SameNumbers.matches(&a, &b));
    }

    #[test]
    fn test_same_numbers_requires_non_empty() {
        assert!(!SimilarityRule::SameNumbers.matches(&p(LONG_EN), &p(LONG_FR)));
        assert!(!SimilarityRule::SameNumbers.matches(&p("1"), &p("no numbers here")));
    }

    #[test]
    fn test_same_special_characters() {
        let a = p("The parties (as defined) agree: terms apply, subject to review here");
        let b = p("Les parties (telles que définies) conviennent: termes, sous réserve");
        assert!(SimilarityRule::SameSpecialCharacters.matches(&a, &b));
    }

    #[test]
    fn test_special_characters_need_three() {
        let a = p("one, two. three four five six");
        let b = p("un, deux. trois quatre cinq six");
        assert!(!SimilarityRule::SameSpecialCharacters.matches(&a, &b));
    }

    #[test]
    fn test_special_characters_multiset() {
        let a = p("a, b, c. d e f g");
        let b = p("a, b. c. d e f g");
        assert!(!SimilarityRule::SameSpecialCharacters.matches(&a, &b));
    }

    #[test]
    fn test_short_with_close_word_count() {
        assert!(SimilarityRule::ShortWithCloseWordCount.matches(&p("Chapter one"), &p("Chapitre un")));
        assert!(SimilarityRule::ShortWithCloseWordCount.matches(&p("A"), &p("B C D")));
        assert!(!SimilarityRule::ShortWithCloseWordCount.matches(&p("A"), &p("B C D E")));
        assert!(!SimilarityRule::ShortWithCloseWordCount.matches(&p("one two three four five"), &p("un")));
    }

    #[test]
    fn test_placeholder_is_short() {
        let placeholder = ParagraphFeatures::placeholder(0);
        assert!(are_similar(&placeholder, &p("Title")));
        assert!(!are_similar(&placeholder, &p(LONG_EN)));
    }

    #[test]
    fn test_dissimilar_long_paragraphs() {
        assert!(!are_similar(&p(LONG_EN), &p(LONG_FR)));
        assert_eq!(first_matching_rule(&p(LONG_EN), &p(LONG_FR)), None);
    }

    #[test]
    fn test_rule_priority() {
        let a = p("Art. 5");
        let b = p("Art. 5");
        assert_eq!(first_matching_rule(&a, &b), Some(SimilarityRule::SameNumbers));

        let a = p("See: (a)");
        let b = p("Voir: (b)");
        assert_eq!(
            first_matching_rule(&a, &b),
            Some(SimilarityRule::SameSpecialCharacters)
        );
    }
}
