//! Positional repair of other-language sequences against the main language.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::similarity::are_similar;
use crate::model::{AlignedDocument, LanguageParagraphSet, ParagraphFeatures};

/// What the aligner changed in one other-language sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairStats {
    /// Placeholders appended because the language ran out of paragraphs
    pub appended: usize,

    /// Placeholders inserted to shift a paragraph one position later
    pub inserted: usize,

    /// Positions left as they were although nothing matched
    pub uncorrected: usize,

    /// Trailing paragraphs dropped beyond the main sequence length
    pub truncated: usize,
}

impl RepairStats {
    /// Total placeholders added.
    pub fn placeholders(&self) -> usize {
        self.appended + self.inserted
    }
}

/// Aligns every other-language sequence to the main-language sequence.
///
/// The main sequence is read-only. Each other sequence is walked once over
/// the main positions:
///
/// 1. past its end, a placeholder is appended;
/// 2. a candidate similar to the main paragraph stays in place;
/// 3. a candidate similar to the *next* main paragraph is pushed one
///    position later by a placeholder;
/// 4. otherwise the candidate stays uncorrected.
///
/// Only single-position drift is repaired. Afterwards every sequence has the
/// main sequence's length and other-language indices equal their positions.
#[derive(Debug, Clone)]
pub struct SequenceAligner {
    parallel: bool,
}

impl SequenceAligner {
    /// Create an aligner that processes languages in parallel.
    pub fn new() -> Self {
        Self { parallel: true }
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

    /// Align all language sets of one document.
    ///
    /// Takes ownership of the sets and returns them aligned, in input order.
    /// Language codes are expected to be distinct; repair statistics are
    /// keyed by code.
    pub fn align(&self, sets: Vec<LanguageParagraphSet>) -> AlignedDocument {
        let Some(main_index) = select_main(&sets) else {
            return AlignedDocument::default();
        };

        let mut sets = sets;
        let main = sets.remove(main_index);
        let main_language = Some(main.language.clone());

        if sets.is_empty() {
            return AlignedDocument::new(main_language, vec![main]);
        }

        let repair = |set: LanguageParagraphSet| {
            let (paragraphs, stats) = align_sequence(&main.paragraphs, set.paragraphs);
            log::debug!(
                "Aligned {} to {}: {} placeholders, {} uncorrected, {} truncated",
                set.language,
                main.language,
                stats.placeholders(),
                stats.uncorrected,
                stats.truncated
            );
            let mut aligned = LanguageParagraphSet {
                language: set.language,
                paragraphs,
                is_main_language: set.is_main_language,
            };
            aligned.reindex();
            (aligned, stats)
        };

        let repaired: Vec<(LanguageParagraphSet, RepairStats)> = if self.parallel {
            sets.into_par_iter().map(repair).collect()
        } else {
            sets.into_iter().map(repair).collect()
        };

        let mut repairs = BTreeMap::new();
        let mut languages = Vec::with_capacity(repaired.len() + 1);
        for (set, stats) in repaired {
            repairs.insert(set.language.clone(), stats);
            languages.push(set);
        }
        languages.insert(main_index, main);

        AlignedDocument::new(main_language, languages).with_repairs(repairs)
    }
}

impl Default for SequenceAligner {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the main-language set: the first flagged one, else the first set.
pub fn select_main(sets: &[LanguageParagraphSet]) -> Option<usize> {
    if sets.is_empty() {
        return None;
    }

    let flagged: Vec<usize> = sets
        .iter()
        .enumerate()
        .filter(|(_, set)| set.is_main_language)
        .map(|(i, _)| i)
        .collect();

    match flagged.as_slice() {
        [] => {
            log::warn!(
                "No main language flagged; using first set ({}) as main",
                sets[0].language
            );
            Some(0)
        }
        [only] => Some(*only),
        [first, ..] => {
            log::warn!(
                "{} sets flagged as main language; using {}",
                flagged.len(),
                sets[*first].language
            );
            Some(*first)
        }
    }
}

/// Align one other-language sequence to the main sequence.
///
/// Returns exactly `main.len()` paragraphs.
pub fn align_sequence(
    main: &[ParagraphFeatures],
    other: Vec<ParagraphFeatures>,
) -> (Vec<ParagraphFeatures>, RepairStats) {
    let mut stats = RepairStats::default();
    let mut aligned = Vec::with_capacity(main.len());
    let mut remaining = other.into_iter().peekable();

    for (position, reference) in main.iter().enumerate() {
        let Some(candidate) = remaining.peek() else {
            aligned.push(ParagraphFeatures::placeholder(position));
            stats.appended += 1;
            continue;
        };

        if are_similar(reference, candidate) {
            aligned.extend(remaining.next());
            continue;
        }

        let belongs_to_next = main
            .get(position + 1)
            .is_some_and(|next| are_similar(next, candidate));

        if belongs_to_next {
            aligned.push(ParagraphFeatures::placeholder(position));
            stats.inserted += 1;
        } else {
            log::trace!("No match at position {}; leaving candidate in place", position);
            stats.uncorrected += 1;
            aligned.extend(remaining.next());
        }
    }

    stats.truncated = remaining.count();
    (aligned, stats)
}
