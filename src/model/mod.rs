//! Data model for cross-lingual paragraph alignment.
//!
//! Raw segments come from an upstream PDF segmentation provider. They are
//! turned into [`ParagraphFeatures`], grouped per language into
//! [`LanguageParagraphSet`]s, and after alignment collected into an
//! [`AlignedDocument`].

mod document;
mod language;
mod paragraph;
mod segment;

pub use document::{AlignedDocument, ParagraphPair, ScoredPair};
pub use language::LanguageParagraphSet;
pub use paragraph::{extract_non_alphanumeric, extract_numbers, extract_words, ParagraphFeatures};
pub use segment::{BoundingBox, FontInfo, RawSegment, SegmentDocument, SegmentType};
