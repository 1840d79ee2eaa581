//! Preparation options and configuration.

use std::collections::HashSet;

use crate::model::SegmentType;

/// Segment types kept by the noise filter unless configured otherwise.
pub const DEFAULT_ALLOWED_TYPES: [SegmentType; 5] = [
    SegmentType::Formula,
    SegmentType::ListItem,
    SegmentType::Title,
    SegmentType::Text,
    SegmentType::SectionHeader,
];

/// Options for turning raw segments into alignable paragraph sequences.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Error handling mode for malformed segments
    pub error_mode: ErrorMode,

    /// Segment types that survive noise filtering
    pub allowed_types: HashSet<SegmentType>,

    /// Whether to merge paragraphs split across a page boundary
    pub merge_page_spans: bool,

    /// Whether to compute indentation from each page's dominant left margin
    pub annotate_indentation: bool,

    /// Whether to use parallel processing across languages
    pub parallel: bool,
}

impl PipelineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip malformed segments).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Replace the allow-list of segment types.
    pub fn with_allowed_types(mut self, types: impl IntoIterator<Item = SegmentType>) -> Self {
        self.allowed_types = types.into_iter().collect();
        self
    }

    /// Enable or disable page-span merging.
    pub fn with_page_merge(mut self, merge: bool) -> Self {
        self.merge_page_spans = merge;
        self
    }

    /// Enable or disable indentation annotation.
    pub fn with_indentation(mut self, annotate: bool) -> Self {
        self.annotate_indentation = annotate;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            allowed_types: DEFAULT_ALLOWED_TYPES.into_iter().collect(),
            merge_page_spans: true,
            annotate_indentation: true,
            parallel: true,
        }
    }
}

/// Error handling mode for malformed segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Reject the whole batch on the first malformed segment
    #[default]
    Strict,
    /// Skip malformed segments and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_options_builder() {
        let options = PipelineOptions::new()
            .lenient()
            .with_allowed_types([SegmentType::Text])
            .with_page_merge(false)
            .sequential();

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.allowed_types.len(), 1);
        assert!(!options.merge_page_spans);
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = PipelineOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.parallel);
        assert!(options.merge_page_spans);
        assert!(options.allowed_types.contains(&SegmentType::Formula));
        assert!(!options.allowed_types.contains(&SegmentType::Table));
    }
}
