//! Raw segment types produced by the upstream PDF segmentation provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::Result;

/// Layout class assigned to a segment by the segmentation provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum SegmentType {
    /// Document or chapter title
    Title,
    /// Body text
    #[default]
    Text,
    /// List item
    ListItem,
    /// Section header
    SectionHeader,
    /// Formula
    Formula,
    /// Footnote
    Footnote,
    /// Running page header
    PageHeader,
    /// Running page footer
    PageFooter,
    /// Picture
    Picture,
    /// Caption of a picture or table
    Caption,
    /// Table
    Table,
}

impl SegmentType {
    /// All segment types in declaration order.
    pub const ALL: [SegmentType; 11] = [
        SegmentType::Title,
        SegmentType::Text,
        SegmentType::ListItem,
        SegmentType::SectionHeader,
        SegmentType::Formula,
        SegmentType::Footnote,
        SegmentType::PageHeader,
        SegmentType::PageFooter,
        SegmentType::Picture,
        SegmentType::Caption,
        SegmentType::Table,
    ];

    /// Canonical upper-case name, as used in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentType::Title => "TITLE",
            SegmentType::Text => "TEXT",
            SegmentType::ListItem => "LIST_ITEM",
            SegmentType::SectionHeader => "SECTION_HEADER",
            SegmentType::Formula => "FORMULA",
            SegmentType::Footnote => "FOOTNOTE",
            SegmentType::PageHeader => "PAGE_HEADER",
            SegmentType::PageFooter => "PAGE_FOOTER",
            SegmentType::Picture => "PICTURE",
            SegmentType::Caption => "CAPTION",
            SegmentType::Table => "TABLE",
        }
    }
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentType {
    type Err = String;

    /// Accepts the canonical names as well as the human-readable labels some
    /// segmenters emit ("List item", "section-header", ...).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();

        SegmentType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| format!("unknown segment type: {}", s))
    }
}

impl TryFrom<String> for SegmentType {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Axis-aligned box in page coordinates (points, origin top-left).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Box width
    pub width: f32,
    /// Box height
    pub height: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(left, top, right - left, bottom - top)
    }

    /// Area of the box.
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }
}

/// Dominant font of a segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FontInfo {
    /// Font size in points
    #[serde(default)]
    pub size: f32,
    /// Bold face
    #[serde(default)]
    pub bold: bool,
    /// Italic face
    #[serde(default)]
    pub italic: bool,
}

impl FontInfo {
    /// Create font info.
    pub fn new(size: f32, bold: bool, italic: bool) -> Self {
        Self { size, bold, italic }
    }
}

/// One typed block as delivered by the segmentation provider.
///
/// Geometry, text and type are optional at the serialization level so that a
/// missing field surfaces as a [`crate::Error::MalformedSegment`] instead of
/// a silent default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSegment {
    /// Page number (1-indexed)
    pub page_number: Option<u32>,
    /// Left edge
    pub left: Option<f32>,
    /// Top edge
    pub top: Option<f32>,
    /// Width
    pub width: Option<f32>,
    /// Height
    pub height: Option<f32>,
    /// Page width in points
    pub page_width: Option<f32>,
    /// Page height in points
    pub page_height: Option<f32>,
    /// Extracted text
    pub text: Option<String>,
    /// Segment type
    #[serde(rename = "type")]
    pub segment_type: Option<SegmentType>,
    /// Font information, when the provider reports it
    #[serde(default)]
    pub font: Option<FontInfo>,
}

impl RawSegment {
    /// Create a fully populated segment.
    pub fn new(
        page_number: u32,
        bounding_box: BoundingBox,
        page_size: (f32, f32),
        text: impl Into<String>,
        segment_type: SegmentType,
    ) -> Self {
        Self {
            page_number: Some(page_number),
            left: Some(bounding_box.left),
            top: Some(bounding_box.top),
            width: Some(bounding_box.width),
            height: Some(bounding_box.height),
            page_width: Some(page_size.0),
            page_height: Some(page_size.1),
            text: Some(text.into()),
            segment_type: Some(segment_type),
            font: None,
        }
    }

    /// Attach font information.
    pub fn with_font(mut self, font: FontInfo) -> Self {
        self.font = Some(font);
        self
    }
}

/// All segments of one language's document, in reading order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentDocument {
    /// Language code (e.g., "en")
    pub language: String,

    /// Whether this language is the alignment reference
    #[serde(default)]
    pub is_main_language: bool,

    /// Segments in reading order
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

impl SegmentDocument {
    /// Create a document for a language.
    pub fn new(language: impl Into<String>, segments: Vec<RawSegment>) -> Self {
        Self {
            language: language.into(),
            is_main_language: false,
            segments,
        }
    }

    /// Flag this document as the main language.
    pub fn main(mut self) -> Self {
        self.is_main_language = true;
        self
    }

    /// Parse a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
