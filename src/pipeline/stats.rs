//! Statistics collected while preparing a language sequence.

use serde::{Deserialize, Serialize};

/// Counts collected by [`super::prepare_segments`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparationStats {
    /// Raw segments received
    pub segment_count: u32,

    /// Segments skipped as malformed (lenient mode only)
    pub malformed_count: u32,

    /// Paragraphs dropped by the noise filter
    pub filtered_count: u32,

    /// Page-spanning pairs merged
    pub merged_count: u32,

    /// Paragraphs in the prepared sequence
    pub paragraph_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,
}

impl PreparationStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the word count of a text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &PreparationStats) {
        self.segment_count += other.segment_count;
        self.malformed_count += other.malformed_count;
        self.filtered_count += other.filtered_count;
        self.merged_count += other.merged_count;
        self.paragraph_count += other.paragraph_count;
        self.word_count += other.word_count;
    }
}
