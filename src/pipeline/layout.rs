//! Page margin statistics and paragraph indentation.

use std::collections::{BTreeMap, HashMap};

use crate::model::ParagraphFeatures;

/// Left-edge statistics for one page.
#[derive(Debug, Clone, Default)]
pub struct MarginStatistics {
    /// Dominant (most common) left edge in points
    pub dominant_left: f32,
    /// Observed left edges with frequency, keyed at 0.1pt precision
    pub left_histogram: HashMap<i32, usize>,
}

impl MarginStatistics {
    /// Add a left-edge observation.
    pub fn add_left(&mut self, left: f32) {
        let key = (left * 10.0).round() as i32;
        *self.left_histogram.entry(key).or_insert(0) += 1;
    }

    /// Calculate the dominant left margin. Ties go to the leftmost edge.
    pub fn analyze(&mut self) {
        let dominant = self
            .left_histogram
            .iter()
            .max_by(|(key_a, count_a), (key_b, count_b)| {
                count_a.cmp(count_b).then_with(|| key_b.cmp(key_a))
            })
            .map(|(key, _)| *key);

        self.dominant_left = dominant.map(|key| key as f32 / 10.0).unwrap_or(0.0);
    }
}

/// Set each paragraph's `indentation` to its left-edge offset from the
/// dominant left margin of the page it starts on.
pub fn annotate_indentation(paragraphs: &mut [ParagraphFeatures]) {
    let mut pages: BTreeMap<u32, MarginStatistics> = BTreeMap::new();
    for paragraph in paragraphs.iter() {
        pages
            .entry(paragraph.page_number)
            .or_default()
            .add_left(paragraph.bounding_box.left);
    }

    for stats in pages.values_mut() {
        stats.analyze();
    }

    for paragraph in paragraphs.iter_mut() {
        let margin = pages
            .get(&paragraph.page_number)
            .map(|stats| stats.dominant_left)
            .unwrap_or(paragraph.bounding_box.left);
        paragraph.indentation = paragraph.bounding_box.left - margin;
    }
}
