//! # paralign
//!
//! Cross-lingual paragraph alignment for translated PDF documents.
//!
//! Given the layout segments of several language versions of the same
//! document, this library turns each into a paragraph sequence and repairs
//! the sequences so that position *i* refers to the same logical paragraph
//! in every language.
//!
//! ## Quick Start
//!
//! ```no_run
//! use paralign::{align_files, render};
//!
//! fn main() -> paralign::Result<()> {
//!     // The first file is the main language unless one is flagged
//!     let doc = align_files(&["report_en.json", "report_fr.json"])?;
//!
//!     for pair in doc.pairs("fr")? {
//!         println!("{} | {}", pair.main_language_text, pair.other_language_text);
//!     }
//!
//!     let json = render::to_json(&doc, render::JsonFormat::Pretty)?;
//!     std::fs::write("aligned.json", json)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Preparation pipeline**: feature extraction, noise filtering, page-span merging
//! - **Positional repair**: single-position drift fixed with placeholders
//! - **Match scoring**: thirteen weighted similarity dimensions
//! - **Evaluation**: precision/recall/F1 benchmark with character-level mistake diffs
//! - **Parallel processing**: Uses Rayon across languages and documents

pub mod align;
pub mod error;
pub mod eval;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod scoring;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use rayon::prelude::*;

// Re-export commonly used types
pub use align::{are_similar, RepairStats, SequenceAligner, SimilarityRule};
pub use error::{Error, Result};
pub use eval::{AlignmentLabel, AlignmentResult, Benchmark, BenchmarkReport, MistakeReport};
pub use model::{
    AlignedDocument, BoundingBox, FontInfo, LanguageParagraphSet, ParagraphFeatures,
    ParagraphPair, RawSegment, ScoredPair, SegmentDocument, SegmentType,
};
pub use pipeline::{ErrorMode, PipelineOptions, PreparationStats};
pub use render::{JsonFormat, TextOptions};
pub use scoring::{MatchScore, MatchScorer, ScoreDimension, ScoreWeights};

/// Align in-memory segment documents with default options.
///
/// # Example
///
/// ```
/// use paralign::{align_documents, BoundingBox, RawSegment, SegmentDocument, SegmentType};
///
/// let segment = |text: &str| {
///     RawSegment::new(1, BoundingBox::new(72.0, 90.0, 400.0, 20.0), (612.0, 792.0), text, SegmentType::Text)
/// };
/// let en = SegmentDocument::new("en", vec![segment("Title"), segment("Article 3 of 2021")]).main();
/// let fr = SegmentDocument::new("fr", vec![segment("Article 3 de 2021")]);
///
/// let doc = align_documents(&[en, fr]).unwrap();
/// assert_eq!(doc.get("fr").unwrap().texts(), vec!["", "Article 3 de 2021"]);
/// ```
pub fn align_documents(documents: &[SegmentDocument]) -> Result<AlignedDocument> {
    Ok(Paralign::new().run(documents)?.document)
}

/// Load segment documents from JSON files and align them.
pub fn align_files<P: AsRef<Path>>(paths: &[P]) -> Result<AlignedDocument> {
    let documents = paths
        .iter()
        .map(SegmentDocument::from_file)
        .collect::<Result<Vec<_>>>()?;
    align_documents(&documents)
}

/// Builder for preparing and aligning language versions of a document.
///
/// # Example
///
/// ```no_run
/// use paralign::{Paralign, SegmentDocument, SegmentType};
///
/// let en = SegmentDocument::from_file("report_en.json")?;
/// let fr = SegmentDocument::from_file("report_fr.json")?;
///
/// let alignment = Paralign::new()
///     .lenient()
///     .with_main_language("en")
///     .with_allowed_types([SegmentType::Text, SegmentType::Title])
///     .run(&[en, fr])?;
/// println!("{}", alignment.to_text());
/// # Ok::<(), paralign::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Paralign {
    options: PipelineOptions,
    weights: ScoreWeights,
    main_language: Option<String>,
}

impl Paralign {
    /// Create a new Paralign builder.
    pub fn new() -> Self {
        Self {
            options: PipelineOptions::default(),
            weights: ScoreWeights::default(),
            main_language: None,
        }
    }

    /// Skip malformed segments instead of failing.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Set the segment types kept for alignment.
    pub fn with_allowed_types(mut self, types: impl IntoIterator<Item = SegmentType>) -> Self {
        self.options = self.options.with_allowed_types(types);
        self
    }

    /// Enable or disable page-span merging.
    pub fn with_page_merge(mut self, merge: bool) -> Self {
        self.options = self.options.with_page_merge(merge);
        self
    }

    /// Set the score weights used for scored output.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Use this language as the main language, overriding document flags.
    pub fn with_main_language(mut self, language: impl Into<String>) -> Self {
        self.main_language = Some(language.into());
        self
    }

    /// Replace all preparation options.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Prepare every document into a paragraph set.
    pub fn prepare(
        &self,
        documents: &[SegmentDocument],
    ) -> Result<Vec<(LanguageParagraphSet, PreparationStats)>> {
        let prepare_one =
            |document: &SegmentDocument| -> Result<(LanguageParagraphSet, PreparationStats)> {
                let (mut set, stats) = pipeline::prepare_document(document, &self.options)?;
                if let Some(main) = &self.main_language {
                    set.is_main_language = set.language == *main;
                }
                Ok((set, stats))
            };

        if self.options.parallel {
            documents.par_iter().map(prepare_one).collect()
        } else {
            documents.iter().map(prepare_one).collect()
        }
    }

    /// Prepare and align the documents.
    ///
    /// Every document must carry a distinct language code.
    pub fn run(&self, documents: &[SegmentDocument]) -> Result<Alignment> {
        let mut seen = HashSet::new();
        for document in documents {
            if !seen.insert(document.language.as_str()) {
                return Err(Error::Other(format!(
                    "duplicate language: {}",
                    document.language
                )));
            }
        }

        if let Some(main) = &self.main_language {
            if !documents.iter().any(|d| d.language == *main) {
                return Err(Error::UnknownLanguage(main.clone()));
            }
        }

        let scorer = MatchScorer::new(self.weights)?;
        let prepared = self.prepare(documents)?;

        let mut sets = Vec::with_capacity(prepared.len());
        let mut stats = BTreeMap::new();
        for (set, set_stats) in prepared {
            stats.insert(set.language.clone(), set_stats);
            sets.push(set);
        }

        let document = SequenceAligner::new()
            .with_parallel(self.options.parallel)
            .align(sets);

        Ok(Alignment {
            document,
            stats,
            scorer,
        })
    }
}

impl Default for Paralign {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of aligning a document.
#[derive(Debug, Clone)]
pub struct Alignment {
    /// The aligned document
    pub document: AlignedDocument,
    /// Preparation statistics per language
    pub stats: BTreeMap<String, PreparationStats>,
    scorer: MatchScorer,
}

impl Alignment {
    /// Row-wise text pairs between the main language and `other`.
    pub fn pairs(&self, other: &str) -> Result<Vec<ParagraphPair>> {
        self.document.pairs(other)
    }

    /// Row-wise pairs with match scores, using the configured weights.
    pub fn scored_pairs(&self, other: &str) -> Result<Vec<ScoredPair>> {
        self.document.scored_pairs(other, &self.scorer)
    }

    /// Preparation statistics summed over all languages.
    pub fn total_stats(&self) -> PreparationStats {
        let mut total = PreparationStats::new();
        for stats in self.stats.values() {
            total.merge(stats);
        }
        total
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Convert to a plain-text row view.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document, &TextOptions::default())
    }

    /// Get the aligned document.
    pub fn document(&self) -> &AlignedDocument {
        &self.document
    }
}
