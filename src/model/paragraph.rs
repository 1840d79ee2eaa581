//! Paragraph feature records and their extraction from raw segments.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{BoundingBox, FontInfo, RawSegment, SegmentType};
use crate::error::{Error, Result};

/// Page width used by [`ParagraphFeatures::with_text`] (US Letter).
const LETTER_WIDTH: f32 = 612.0;
/// Page height used by [`ParagraphFeatures::with_text`] (US Letter).
const LETTER_HEIGHT: f32 = 792.0;

/// A paragraph with the features used for cross-language matching.
///
/// Token features (`words`, `numbers`, `non_alphanumeric_characters`,
/// `first_word`) are always derived from `text`; use [`set_text`] to change
/// the text so they stay consistent.
///
/// [`set_text`]: ParagraphFeatures::set_text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphFeatures {
    /// Page the paragraph starts on (1-indexed, 0 for placeholders)
    pub page_number: u32,

    /// Page the paragraph ends on
    pub last_page_number: u32,

    /// Paragraph text
    pub text: String,

    /// Position on the page
    pub bounding_box: BoundingBox,

    /// Page width in points
    pub page_width: f32,

    /// Page height in points
    pub page_height: f32,

    /// Layout class
    pub paragraph_type: SegmentType,

    /// Position within the source sequence
    pub index: usize,

    /// Whitespace-separated tokens
    pub words: Vec<String>,

    /// Digit runs found in the text, in order
    pub numbers: Vec<u64>,

    /// Punctuation and symbol characters, in order, duplicates kept
    pub non_alphanumeric_characters: Vec<char>,

    /// First whitespace-separated token (punctuation included)
    pub first_word: String,

    /// Dominant font
    pub font: FontInfo,

    /// Offset of the left edge from the page's dominant left margin
    #[serde(default)]
    pub indentation: f32,
}

impl ParagraphFeatures {
    /// Build the features of a raw segment found at `index` in its batch.
    ///
    /// Fails with [`Error::MalformedSegment`] when a geometry field, the
    /// text or the type is missing, or a coordinate is not finite.
    pub fn from_segment(segment: &RawSegment, index: usize) -> Result<Self> {
        let malformed = |field: &'static str| Error::MalformedSegment { index, field };

        let finite = |value: Option<f32>, field: &'static str| -> Result<f32> {
            match value {
                Some(v) if v.is_finite() => Ok(v),
                _ => Err(malformed(field)),
            }
        };

        let page_number = segment.page_number.ok_or_else(|| malformed("page_number"))?;
        let bounding_box = BoundingBox::new(
            finite(segment.left, "left")?,
            finite(segment.top, "top")?,
            finite(segment.width, "width")?,
            finite(segment.height, "height")?,
        );
        let page_width = finite(segment.page_width, "page_width")?;
        let page_height = finite(segment.page_height, "page_height")?;
        let text = segment.text.as_deref().ok_or_else(|| malformed("text"))?;
        let paragraph_type = segment.segment_type.ok_or_else(|| malformed("type"))?;

        let mut paragraph = Self {
            page_number,
            last_page_number: page_number,
            text: String::new(),
            bounding_box,
            page_width,
            page_height,
            paragraph_type,
            index,
            words: Vec::new(),
            numbers: Vec::new(),
            non_alphanumeric_characters: Vec::new(),
            first_word: String::new(),
            font: segment.font.unwrap_or_default(),
            indentation: 0.0,
        };
        paragraph.set_text(text);
        Ok(paragraph)
    }

    /// Create a body-text paragraph on page 1 of a Letter-size page.
    pub fn with_text(text: impl AsRef<str>) -> Self {
        let mut paragraph = Self::placeholder(0);
        paragraph.page_number = 1;
        paragraph.last_page_number = 1;
        paragraph.page_width = LETTER_WIDTH;
        paragraph.page_height = LETTER_HEIGHT;
        paragraph.set_text(text.as_ref());
        paragraph
    }

    /// Create an empty paragraph marking a missing counterpart.
    pub fn placeholder(index: usize) -> Self {
        Self {
            page_number: 0,
            last_page_number: 0,
            text: String::new(),
            bounding_box: BoundingBox::default(),
            page_width: 0.0,
            page_height: 0.0,
            paragraph_type: SegmentType::Text,
            index,
            words: Vec::new(),
            numbers: Vec::new(),
            non_alphanumeric_characters: Vec::new(),
            first_word: String::new(),
            font: FontInfo::default(),
            indentation: 0.0,
        }
    }

    /// Set the page the paragraph starts and ends on.
    pub fn on_page(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self.last_page_number = page_number;
        self
    }

    /// Set the layout class.
    pub fn with_type(mut self, paragraph_type: SegmentType) -> Self {
        self.paragraph_type = paragraph_type;
        self
    }

    /// Set the position within the source sequence.
    pub fn at_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Set the bounding box.
    pub fn with_bounding_box(mut self, bounding_box: BoundingBox) -> Self {
        self.bounding_box = bounding_box;
        self
    }

    /// Set the page dimensions.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the font.
    pub fn with_font(mut self, font: FontInfo) -> Self {
        self.font = font;
        self
    }

    /// Replace the text and recompute every token feature.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.words = extract_words(text);
        self.numbers = extract_numbers(text);
        self.non_alphanumeric_characters = extract_non_alphanumeric(text);
        self.first_word = self.words.first().cloned().unwrap_or_default();
    }

    /// Number of words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Check if this paragraph has no content (e.g., an alignment placeholder).
    pub fn is_placeholder(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Whitespace tokenization.
pub fn extract_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Maximal ASCII digit runs parsed as integers, order preserved.
///
/// Runs that overflow `u64` are dropped.
pub fn extract_numbers(text: &str) -> Vec<u64> {
    static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();
    let re = DIGIT_RUN.get_or_init(|| Regex::new(r"[0-9]+").expect("digit run pattern"));

    re.find_iter(text)
        .filter_map(|m| match m.as_str().parse::<u64>() {
            Ok(n) => Some(n),
            Err(_) => {
                log::debug!("Dropping digit run too long for u64: {}", m.as_str());
                None
            }
        })
        .collect()
}

/// Characters that are neither alphanumeric nor whitespace, in order.
pub fn extract_non_alphanumeric(text: &str) -> Vec<char> {
    text.chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .collect()
}
