//! Paragraph similarity scoring.
//!
//! [`MatchScorer`] rates how likely two paragraphs from different language
//! versions are the same logical paragraph, over thirteen normalized
//! dimensions combined by a configurable weighted mean.

mod scorer;
mod text;
mod weights;

pub use scorer::{MatchScore, MatchScorer, ScoreDimension};
pub use text::{fuzzy_ratio, text_similarity, token_sort_ratio, NormalizeOptions, TextNormalizer};
pub use weights::ScoreWeights;
