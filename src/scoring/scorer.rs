//! Multi-dimensional paragraph similarity.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::text::{fuzzy_ratio, text_similarity, TextNormalizer};
use super::ScoreWeights;
use crate::error::Result;
use crate::model::ParagraphFeatures;

/// One axis of the match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreDimension {
    /// Same position in the source sequence
    Index,
    /// Same layout class
    SegmentType,
    /// Same start page
    Page,
    /// Fuzzy similarity of normalized text
    TextFuzzyMatch,
    /// Closeness of word counts
    NumberOfWords,
    /// Overlap of number sets
    Numbers,
    /// Fuzzy similarity of first words
    FirstWord,
    /// Overlap of punctuation multisets
    SpecialCharacters,
    /// Closeness of bounding boxes relative to page size
    BoundingBoxes,
    /// Closeness of relative left edges
    Alignment,
    /// Closeness of indentation from the page margin
    Indentation,
    /// Matching bold/italic flags
    FontStyle,
    /// Closeness of font sizes
    FontSize,
}

impl ScoreDimension {
    /// All dimensions in reporting order.
    pub const ALL: [ScoreDimension; 13] = [
        ScoreDimension::Index,
        ScoreDimension::SegmentType,
        ScoreDimension::Page,
        ScoreDimension::TextFuzzyMatch,
        ScoreDimension::NumberOfWords,
        ScoreDimension::Numbers,
        ScoreDimension::FirstWord,
        ScoreDimension::SpecialCharacters,
        ScoreDimension::BoundingBoxes,
        ScoreDimension::Alignment,
        ScoreDimension::Indentation,
        ScoreDimension::FontStyle,
        ScoreDimension::FontSize,
    ];

    /// Field name of the dimension.
    pub fn name(&self) -> &'static str {
        match self {
            ScoreDimension::Index => "index",
            ScoreDimension::SegmentType => "segment_type",
            ScoreDimension::Page => "page",
            ScoreDimension::TextFuzzyMatch => "text_fuzzy_match",
            ScoreDimension::NumberOfWords => "number_of_words",
            ScoreDimension::Numbers => "numbers",
            ScoreDimension::FirstWord => "first_word",
            ScoreDimension::SpecialCharacters => "special_characters",
            ScoreDimension::BoundingBoxes => "bounding_boxes",
            ScoreDimension::Alignment => "alignment",
            ScoreDimension::Indentation => "indentation",
            ScoreDimension::FontStyle => "font_style",
            ScoreDimension::FontSize => "font_size",
        }
    }
}

/// Similarity of two paragraphs; every field is in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub index: f64,
    pub segment_type: f64,
    pub page: f64,
    pub text_fuzzy_match: f64,
    pub number_of_words: f64,
    pub numbers: f64,
    pub first_word: f64,
    pub special_characters: f64,
    pub bounding_boxes: f64,
    pub alignment: f64,
    pub indentation: f64,
    pub font_style: f64,
    pub font_size: f64,
    /// Weighted mean of the sub-scores
    pub overall_score: f64,
}

impl MatchScore {
    /// Sub-score of one dimension.
    pub fn get(&self, dimension: ScoreDimension) -> f64 {
        match dimension {
            ScoreDimension::Index => self.index,
            ScoreDimension::SegmentType => self.segment_type,
            ScoreDimension::Page => self.page,
            ScoreDimension::TextFuzzyMatch => self.text_fuzzy_match,
            ScoreDimension::NumberOfWords => self.number_of_words,
            ScoreDimension::Numbers => self.numbers,
            ScoreDimension::FirstWord => self.first_word,
            ScoreDimension::SpecialCharacters => self.special_characters,
            ScoreDimension::BoundingBoxes => self.bounding_boxes,
            ScoreDimension::Alignment => self.alignment,
            ScoreDimension::Indentation => self.indentation,
            ScoreDimension::FontStyle => self.font_style,
            ScoreDimension::FontSize => self.font_size,
        }
    }
}

/// Scores paragraph pairs across the thirteen dimensions.
#[derive(Debug, Clone)]
pub struct MatchScorer {
    weights: ScoreWeights,
    normalizer: TextNormalizer,
}

impl MatchScorer {
    /// Create a scorer with validated weights.
    pub fn new(weights: ScoreWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            weights,
            normalizer: TextNormalizer::default(),
        })
    }

    /// Replace the text normalizer.
    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// The weights in use.
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score `candidate` against `reference`.
    pub fn score(&self, reference: &ParagraphFeatures, candidate: &ParagraphFeatures) -> MatchScore {
        let mut score = MatchScore {
            index: equal(reference.index, candidate.index),
            segment_type: equal(reference.paragraph_type, candidate.paragraph_type),
            page: equal(reference.page_number, candidate.page_number),
            text_fuzzy_match: self.text_score(reference, candidate),
            number_of_words: word_count_score(reference.word_count(), candidate.word_count()),
            numbers: numbers_score(&reference.numbers, &candidate.numbers),
            first_word: fuzzy_ratio(
                &reference.first_word.to_lowercase(),
                &candidate.first_word.to_lowercase(),
            ),
            special_characters: special_characters_score(
                &reference.non_alphanumeric_characters,
                &candidate.non_alphanumeric_characters,
            ),
            bounding_boxes: bounding_box_score(reference, candidate),
            alignment: alignment_score(reference, candidate),
            indentation: indentation_score(reference, candidate),
            font_style: font_style_score(reference, candidate),
            font_size: font_size_score(reference.font.size, candidate.font.size),
            overall_score: 0.0,
        };
        score.overall_score = self.weighted_mean(&score);
        score
    }

    fn text_score(&self, reference: &ParagraphFeatures, candidate: &ParagraphFeatures) -> f64 {
        let a = self.normalizer.normalize(&reference.text);
        let b = self.normalizer.normalize(&candidate.text);
        text_similarity(&a, &b)
    }

    fn weighted_mean(&self, score: &MatchScore) -> f64 {
        let total = self.weights.total();
        let weighted: f64 = ScoreDimension::ALL
            .iter()
            .map(|d| self.weights.get(*d) * score.get(*d))
            .sum();
        unit(weighted / total)
    }
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            normalizer: TextNormalizer::default(),
        }
    }
}

/// Clamp to [0, 1], mapping NaN to 0.
fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn equal<T: PartialEq>(a: T, b: T) -> f64 {
    if a == b {
        1.0
    } else {
        0.0
    }
}

fn word_count_score(a: usize, b: usize) -> f64 {
    let diff = a.abs_diff(b) as f64;
    let scale = a.max(b).max(1) as f64;
    1.0 - (diff / scale).min(1.0)
}

fn numbers_score(a: &[u64], b: &[u64]) -> f64 {
    let a: BTreeSet<u64> = a.iter().copied().collect();
    let b: BTreeSet<u64> = b.iter().copied().collect();

    let union = a.union(&b).count();
    if union == 0 {
        return 1.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

fn special_characters_score(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in a {
        *counts.entry(*c).or_insert(0) += 1;
    }

    let mut shared = 0usize;
    for c in b {
        if let Some(count) = counts.get_mut(c) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    shared as f64 / a.len().max(b.len()) as f64
}

/// Coordinate as a fraction of the page dimension; 0 on a degenerate page.
fn relative(value: f32, page_dimension: f32) -> f64 {
    if page_dimension > 0.0 {
        (value / page_dimension) as f64
    } else {
        0.0
    }
}

fn bounding_box_score(a: &ParagraphFeatures, b: &ParagraphFeatures) -> f64 {
    let edges = |p: &ParagraphFeatures| {
        let bbox = &p.bounding_box;
        [
            relative(bbox.left, p.page_width),
            relative(bbox.top, p.page_height),
            relative(bbox.right(), p.page_width),
            relative(bbox.bottom(), p.page_height),
        ]
    };

    let (ea, eb) = (edges(a), edges(b));
    let mean_delta = ea
        .iter()
        .zip(eb.iter())
        .map(|(x, y)| (x - y).abs())
        .sum::<f64>()
        / 4.0;
    unit(1.0 - mean_delta)
}

fn alignment_score(a: &ParagraphFeatures, b: &ParagraphFeatures) -> f64 {
    let left_a = relative(a.bounding_box.left, a.page_width);
    let left_b = relative(b.bounding_box.left, b.page_width);
    unit(1.0 - (left_a - left_b).abs())
}

fn indentation_score(a: &ParagraphFeatures, b: &ParagraphFeatures) -> f64 {
    let delta = (a.indentation - b.indentation).abs() as f64;
    let scale = a.page_width.max(b.page_width) as f64;
    if scale > 0.0 {
        unit(1.0 - delta / scale)
    } else if delta == 0.0 {
        1.0
    } else {
        0.0
    }
}

fn font_style_score(a: &ParagraphFeatures, b: &ParagraphFeatures) -> f64 {
    let matches = (a.font.bold == b.font.bold) as u8 + (a.font.italic == b.font.italic) as u8;
    matches as f64 / 2.0
}

fn font_size_score(a: f32, b: f32) -> f64 {
    let (a, b) = (a.max(0.0) as f64, b.max(0.0) as f64);
    let scale = a.max(b);
    if scale == 0.0 {
        return 1.0;
    }
    unit(1.0 - (a - b).abs() / scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, FontInfo, SegmentType};

    fn body(text: &str) -> ParagraphFeatures {
        ParagraphFeatures::with_text(text)
            .with_bounding_box(BoundingBox::new(72.0, 100.0, 468.0, 60.0))
            .with_font(FontInfo::new(11.0, false, false))
    }

    #[test]
    fn test_reflexive_on_regular_paragraph() {
        let p = body("Article 5 (2): the parties agree; see annex 3.");
        let score = MatchScorer::default().score(&p, &p);
        assert_eq!(score.overall_score, 1.0);
        for dimension in ScoreDimension::ALL {
            assert_eq!(score.get(dimension), 1.0, "{}", dimension.name());
        }
    }

    #[test]
    fn test_reflexive_on_placeholder() {
        let p = ParagraphFeatures::placeholder(0);
        let score = MatchScorer::default().score(&p, &p);
        assert_eq!(score.overall_score, 1.0);
    }

    #[test]
    fn test_completely_different_paragraphs() {
        let a = ParagraphFeatures::with_text("")
            .at_index(0)
            .on_page(1)
            .with_type(SegmentType::Title)
            .with_page_size(100.0, 100.0)
            .with_bounding_box(BoundingBox::new(0.0, 0.0, 0.0, 0.0))
            .with_font(FontInfo::new(0.0, true, true));

        let mut b = ParagraphFeatures::with_text("zzz 42 qq; xx, ww: 7!")
            .at_index(9)
            .on_page(6)
            .with_type(SegmentType::ListItem)
            .with_page_size(100.0, 100.0)
            .with_bounding_box(BoundingBox::new(90.0, 90.0, 10.0, 10.0))
            .with_font(FontInfo::new(20.0, false, false));
        b.indentation = 90.0;

        let score = MatchScorer::default().score(&a, &b);
        assert!(score.overall_score < 0.05, "score {}", score.overall_score);
        assert_eq!(score.text_fuzzy_match, 0.0);
        assert_eq!(score.number_of_words, 0.0);
        assert_eq!(score.numbers, 0.0);
        assert_eq!(score.special_characters, 0.0);
        assert_eq!(score.font_style, 0.0);
        assert_eq!(score.font_size, 0.0);
    }

    #[test]
    fn test_half_structural_match() {
        let a = body("");
        let b = body("Zwei 2 Teile; fertig.").on_page(3);

        let score = MatchScorer::default().score(&a, &b);
        // index, type, box, alignment, indentation, font style and size match;
        // page and all text dimensions do not.
        assert_eq!(score.page, 0.0);
        assert_eq!(score.text_fuzzy_match, 0.0);
        assert!(
            (0.4..=0.6).contains(&score.overall_score),
            "score {}",
            score.overall_score
        );
    }

    #[test]
    fn test_word_count_score() {
        assert_eq!(word_count_score(0, 0), 1.0);
        assert_eq!(word_count_score(10, 5), 0.5);
        assert_eq!(word_count_score(0, 3), 0.0);
    }

    #[test]
    fn test_numbers_score_is_set_jaccard() {
        assert_eq!(numbers_score(&[], &[]), 1.0);
        assert_eq!(numbers_score(&[1, 2], &[]), 0.0);
        assert_eq!(numbers_score(&[1, 2, 2], &[2, 3]), 1.0 / 3.0);
    }

    #[test]
    fn test_special_characters_multiset() {
        assert_eq!(special_characters_score(&[], &[]), 1.0);
        assert_eq!(special_characters_score(&['.', '.', ','], &['.', ',']), 2.0 / 3.0);
        assert_eq!(special_characters_score(&['('], &[')']), 0.0);
    }

    #[test]
    fn test_font_scores() {
        assert_eq!(font_size_score(0.0, 0.0), 1.0);
        assert_eq!(font_size_score(10.0, 20.0), 0.5);

        let a = body("x").with_font(FontInfo::new(11.0, true, false));
        let b = body("x").with_font(FontInfo::new(11.0, true, true));
        assert_eq!(font_style_score(&a, &b), 0.5);
    }

    #[test]
    fn test_degenerate_page_size() {
        let a = body("x").with_page_size(0.0, 0.0);
        let b = body("x").with_page_size(0.0, 0.0);
        let score = MatchScorer::default().score(&a, &b);
        assert_eq!(score.bounding_boxes, 1.0);
        assert_eq!(score.alignment, 1.0);
    }

    #[test]
    fn test_weights_shift_overall() {
        let a = body("Identical text");
        let b = body("Identical text").on_page(2);

        let uniform = MatchScorer::default().score(&a, &b).overall_score;
        let ignore_page =
            MatchScorer::new(ScoreWeights::default().with(ScoreDimension::Page, 0.0)).unwrap();
        assert!(uniform < 1.0);
        assert_eq!(ignore_page.score(&a, &b).overall_score, 1.0);
    }

    #[test]
    fn test_new_rejects_invalid_weights() {
        assert!(MatchScorer::new(ScoreWeights::uniform(0.0)).is_err());
    }
}
