//! Per-language paragraph sequences.

use serde::{Deserialize, Serialize};

use super::ParagraphFeatures;

/// The ordered paragraphs of one language version of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageParagraphSet {
    /// Language code (e.g., "en")
    pub language: String,

    /// Paragraphs in reading order
    pub paragraphs: Vec<ParagraphFeatures>,

    /// Whether this is the alignment reference
    #[serde(default)]
    pub is_main_language: bool,
}

impl LanguageParagraphSet {
    /// Create a non-main set.
    pub fn new(language: impl Into<String>, paragraphs: Vec<ParagraphFeatures>) -> Self {
        Self {
            language: language.into(),
            paragraphs,
            is_main_language: false,
        }
    }

    /// Create a set flagged as main language.
    pub fn main(language: impl Into<String>, paragraphs: Vec<ParagraphFeatures>) -> Self {
        Self {
            is_main_language: true,
            ..Self::new(language, paragraphs)
        }
    }

    /// Number of paragraphs.
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Check if the set has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Number of placeholder paragraphs.
    pub fn placeholder_count(&self) -> usize {
        self.paragraphs.iter().filter(|p| p.is_placeholder()).count()
    }

    /// Paragraph texts in order.
    pub fn texts(&self) -> Vec<&str> {
        self.paragraphs.iter().map(|p| p.text.as_str()).collect()
    }

    /// Assign `index = position` to every paragraph.
    pub fn reindex(&mut self) {
        for (position, paragraph) in self.paragraphs.iter_mut().enumerate() {
            paragraph.index = position;
        }
    }
}
