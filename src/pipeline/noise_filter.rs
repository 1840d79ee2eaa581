//! Removal of page-local artifacts before alignment.
//!
//! Running headers, footers, captions and pictures are placed differently in
//! each translation, so they would desynchronize the sequences.

use std::collections::HashSet;

use super::options::DEFAULT_ALLOWED_TYPES;
use crate::model::{ParagraphFeatures, SegmentType};

/// Keeps only paragraphs whose type is in an allow-list.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    allowed: HashSet<SegmentType>,
}

impl NoiseFilter {
    /// Create a filter with an explicit allow-list.
    pub fn new(allowed: impl IntoIterator<Item = SegmentType>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Check if a paragraph type survives filtering.
    pub fn allows(&self, paragraph_type: SegmentType) -> bool {
        self.allowed.contains(&paragraph_type)
    }

    /// Filter a sequence, preserving order.
    pub fn filter(&self, paragraphs: Vec<ParagraphFeatures>) -> Vec<ParagraphFeatures> {
        let before = paragraphs.len();
        let kept: Vec<_> = paragraphs
            .into_iter()
            .filter(|p| self.allows(p.paragraph_type))
            .collect();

        log::debug!("NoiseFilter: kept {} of {} paragraphs", kept.len(), before);
        kept
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_TYPES)
    }
}
