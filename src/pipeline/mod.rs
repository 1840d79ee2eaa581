//! Preparation of per-language paragraph sequences.
//!
//! Raw segments go through feature extraction, noise filtering, page-span
//! merging and indentation annotation, in that order.

mod layout;
mod noise_filter;
mod options;
mod page_merge;
mod stats;

pub use layout::{annotate_indentation, MarginStatistics};
pub use noise_filter::NoiseFilter;
pub use options::{ErrorMode, PipelineOptions, DEFAULT_ALLOWED_TYPES};
pub use page_merge::{is_continuation, merge_page_spans};
pub use stats::PreparationStats;

use crate::error::Result;
use crate::model::{LanguageParagraphSet, ParagraphFeatures, RawSegment, SegmentDocument};

/// Turn raw segments into an alignable paragraph sequence.
///
/// In [`ErrorMode::Strict`] the first malformed segment rejects the batch;
/// in [`ErrorMode::Lenient`] it is skipped with a warning. Errors report the
/// segment's batch position; prepared paragraphs are indexed by their
/// position in the returned sequence.
pub fn prepare_segments(
    segments: &[RawSegment],
    options: &PipelineOptions,
) -> Result<(Vec<ParagraphFeatures>, PreparationStats)> {
    let mut stats = PreparationStats::new();
    stats.segment_count = segments.len() as u32;

    let mut paragraphs = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        match ParagraphFeatures::from_segment(segment, index) {
            Ok(paragraph) => paragraphs.push(paragraph),
            Err(e) => match options.error_mode {
                ErrorMode::Strict => return Err(e),
                ErrorMode::Lenient => {
                    log::warn!("Skipping segment: {}", e);
                    stats.malformed_count += 1;
                }
            },
        }
    }

    let extracted = paragraphs.len();
    let filter = NoiseFilter::new(options.allowed_types.iter().copied());
    let mut paragraphs = filter.filter(paragraphs);
    stats.filtered_count = (extracted - paragraphs.len()) as u32;

    if options.merge_page_spans {
        let before = paragraphs.len();
        paragraphs = merge_page_spans(paragraphs);
        stats.merged_count = (before - paragraphs.len()) as u32;
    }

    if options.annotate_indentation {
        annotate_indentation(&mut paragraphs);
    }

    for (position, paragraph) in paragraphs.iter_mut().enumerate() {
        paragraph.index = position;
    }

    stats.paragraph_count = paragraphs.len() as u32;
    for paragraph in &paragraphs {
        stats.count_text(&paragraph.text);
    }

    Ok((paragraphs, stats))
}

/// Prepare one language's segment document into a paragraph set.
pub fn prepare_document(
    document: &SegmentDocument,
    options: &PipelineOptions,
) -> Result<(LanguageParagraphSet, PreparationStats)> {
    let (paragraphs, stats) = prepare_segments(&document.segments, options)?;
    log::debug!(
        "Prepared {}: {} segments -> {} paragraphs",
        document.language,
        stats.segment_count,
        stats.paragraph_count
    );

    let set = LanguageParagraphSet {
        language: document.language.clone(),
        paragraphs,
        is_main_language: document.is_main_language,
    };
    Ok((set, stats))
}
