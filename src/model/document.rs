//! Aligned document output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::LanguageParagraphSet;
use crate::align::RepairStats;
use crate::error::{Error, Result};
use crate::scoring::{MatchScore, MatchScorer};

/// All language versions of a document after alignment.
///
/// Every set has the same length as the main set, so a row index addresses
/// the same logical paragraph in every language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedDocument {
    /// Language code of the reference sequence, `None` when empty
    pub main_language: Option<String>,

    /// Aligned language sets, main set included
    pub languages: Vec<LanguageParagraphSet>,

    /// Repairs applied per other language
    #[serde(default)]
    pub repairs: BTreeMap<String, RepairStats>,
}

impl AlignedDocument {
    /// Create an aligned document.
    pub fn new(main_language: Option<String>, languages: Vec<LanguageParagraphSet>) -> Self {
        Self {
            main_language,
            languages,
            repairs: BTreeMap::new(),
        }
    }

    /// Attach per-language repair statistics.
    pub fn with_repairs(mut self, repairs: BTreeMap<String, RepairStats>) -> Self {
        self.repairs = repairs;
        self
    }

    /// Check if the document has no languages.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Number of aligned rows (length of the main sequence).
    pub fn row_count(&self) -> usize {
        self.main().map(LanguageParagraphSet::len).unwrap_or(0)
    }

    /// Language codes in input order.
    pub fn language_codes(&self) -> Vec<&str> {
        self.languages.iter().map(|l| l.language.as_str()).collect()
    }

    /// The main-language set.
    pub fn main(&self) -> Option<&LanguageParagraphSet> {
        let main_language = self.main_language.as_deref()?;
        self.get(main_language)
    }

    /// A language set by code.
    pub fn get(&self, language: &str) -> Option<&LanguageParagraphSet> {
        self.languages.iter().find(|l| l.language == language)
    }

    /// Row-wise text pairs between the main language and `other`.
    pub fn pairs(&self, other: &str) -> Result<Vec<ParagraphPair>> {
        let (main, other) = self.main_and(other)?;
        Ok(main
            .paragraphs
            .iter()
            .zip(&other.paragraphs)
            .map(|(m, o)| ParagraphPair::new(m.text.clone(), o.text.clone()))
            .collect())
    }

    /// Row-wise text pairs annotated with their match score.
    pub fn scored_pairs(&self, other: &str, scorer: &MatchScorer) -> Result<Vec<ScoredPair>> {
        let (main, other) = self.main_and(other)?;
        Ok(main
            .paragraphs
            .iter()
            .zip(&other.paragraphs)
            .enumerate()
            .map(|(position, (m, o))| ScoredPair {
                position,
                pair: ParagraphPair::new(m.text.clone(), o.text.clone()),
                score: scorer.score(m, o),
            })
            .collect())
    }

    fn main_and(&self, other: &str) -> Result<(&LanguageParagraphSet, &LanguageParagraphSet)> {
        let main = self
            .main()
            .ok_or_else(|| Error::Other("aligned document has no main language".to_string()))?;
        let other = self
            .get(other)
            .ok_or_else(|| Error::UnknownLanguage(other.to_string()))?;
        Ok((main, other))
    }
}

/// The same logical paragraph in the main and one other language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParagraphPair {
    /// Main-language text
    pub main_language_text: String,
    /// Other-language text (empty for a placeholder)
    pub other_language_text: String,
}

impl ParagraphPair {
    /// Create a pair.
    pub fn new(main_language_text: impl Into<String>, other_language_text: impl Into<String>) -> Self {
        Self {
            main_language_text: main_language_text.into(),
            other_language_text: other_language_text.into(),
        }
    }
}

/// A row of an aligned document with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPair {
    /// Row index
    pub position: usize,
    /// Texts of the row
    pub pair: ParagraphPair,
    /// Similarity between the two paragraphs
    pub score: MatchScore,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParagraphFeatures;

    fn sample() -> AlignedDocument {
        AlignedDocument::new(
            Some("en".to_string()),
            vec![
                LanguageParagraphSet::main(
                    "en",
                    vec![
                        ParagraphFeatures::with_text("Article 1"),
                        ParagraphFeatures::with_text("Scope of the treaty."),
                    ],
                ),
                LanguageParagraphSet::new(
                    "fr",
                    vec![
                        ParagraphFeatures::with_text("Article 1"),
                        ParagraphFeatures::placeholder(1),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_pairs() {
        let doc = sample();
        let pairs = doc.pairs("fr").unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ParagraphPair::new("Article 1", "Article 1"));
        assert_eq!(pairs[1].other_language_text, "");
    }

    #[test]
    fn test_pairs_unknown_language() {
        let doc = sample();
        assert!(matches!(doc.pairs("de"), Err(Error::UnknownLanguage(_))));
    }

    #[test]
    fn test_scored_pairs() {
        let doc = sample();
        let scored = doc.scored_pairs("fr", &MatchScorer::default()).unwrap();
        assert_eq!(scored.len(), 2);
        assert!((scored[0].score.overall_score - 1.0).abs() < 1e-9);
        assert!(scored[1].score.overall_score < 1.0);
    }

    #[test]
    fn test_row_count_and_codes() {
        let doc = sample();
        assert_eq!(doc.row_count(), 2);
        assert_eq!(doc.language_codes(), vec!["en", "fr"]);
        assert_eq!(AlignedDocument::default().row_count(), 0);
    }
}
