//! Cross-lingual paragraph alignment.
//!
//! Given one main-language sequence and any number of other-language
//! sequences of the same document, [`SequenceAligner`] inserts placeholders
//! so that position *i* denotes the same logical paragraph everywhere.

mod aligner;
mod similarity;

pub use aligner::{align_sequence, select_main, RepairStats, SequenceAligner};
pub use similarity::{
    are_similar, first_matching_rule, SimilarityRule, MAX_SHORT_WORD_DIFFERENCE,
    MIN_SPECIAL_CHARACTERS, SHORT_PARAGRAPH_WORDS,
};
