//! Configurable weights for the match score.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ScoreDimension;
use crate::error::{Error, Result};

/// Weight of each [`ScoreDimension`] in the overall score.
///
/// Missing fields in a JSON document fall back to the uniform default of 1.0,
/// so a file only needs to name the weights it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    /// Weight of [`ScoreDimension::Index`]
    pub index: f64,
    /// Weight of [`ScoreDimension::SegmentType`]
    pub segment_type: f64,
    /// Weight of [`ScoreDimension::Page`]
    pub page: f64,
    /// Weight of [`ScoreDimension::TextFuzzyMatch`]
    pub text_fuzzy_match: f64,
    /// Weight of [`ScoreDimension::NumberOfWords`]
    pub number_of_words: f64,
    /// Weight of [`ScoreDimension::Numbers`]
    pub numbers: f64,
    /// Weight of [`ScoreDimension::FirstWord`]
    pub first_word: f64,
    /// Weight of [`ScoreDimension::SpecialCharacters`]
    pub special_characters: f64,
    /// Weight of [`ScoreDimension::BoundingBoxes`]
    pub bounding_boxes: f64,
    /// Weight of [`ScoreDimension::Alignment`]
    pub alignment: f64,
    /// Weight of [`ScoreDimension::Indentation`]
    pub indentation: f64,
    /// Weight of [`ScoreDimension::FontStyle`]
    pub font_style: f64,
    /// Weight of [`ScoreDimension::FontSize`]
    pub font_size: f64,
}

impl ScoreWeights {
    /// Same weight for every dimension.
    pub fn uniform(weight: f64) -> Self {
        Self {
            index: weight,
            segment_type: weight,
            page: weight,
            text_fuzzy_match: weight,
            number_of_words: weight,
            numbers: weight,
            first_word: weight,
            special_characters: weight,
            bounding_boxes: weight,
            alignment: weight,
            indentation: weight,
            font_style: weight,
            font_size: weight,
        }
    }

    /// Weight of one dimension.
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

    /// Set the weight of one dimension.
    pub fn with(mut self, dimension: ScoreDimension, weight: f64) -> Self {
        let slot = match dimension {
            ScoreDimension::Index => &mut self.index,
            ScoreDimension::SegmentType => &mut self.segment_type,
            ScoreDimension::Page => &mut self.page,
            ScoreDimension::TextFuzzyMatch => &mut self.text_fuzzy_match,
            ScoreDimension::NumberOfWords => &mut self.number_of_words,
            ScoreDimension::Numbers => &mut self.numbers,
            ScoreDimension::FirstWord => &mut self.first_word,
            ScoreDimension::SpecialCharacters => &mut self.special_characters,
            ScoreDimension::BoundingBoxes => &mut self.bounding_boxes,
            ScoreDimension::Alignment => &mut self.alignment,
            ScoreDimension::Indentation => &mut self.indentation,
            ScoreDimension::FontStyle => &mut self.font_style,
            ScoreDimension::FontSize => &mut self.font_size,
        };
        *slot = weight;
        self
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        ScoreDimension::ALL.iter().map(|d| self.get(*d)).sum()
    }

    /// Check that the weights define a weighted mean.
    pub fn validate(&self) -> Result<()> {
        for dimension in ScoreDimension::ALL {
            let weight = self.get(dimension);
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidWeights(format!(
                    "{} has weight {}",
                    dimension.name(),
                    weight
                )));
            }
        }

        if self.total() <= 0.0 {
            return Err(Error::InvalidWeights("all weights are zero".to_string()));
        }

        Ok(())
    }

    /// Parse and validate weights from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let weights: ScoreWeights = serde_json::from_str(json)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Load and validate weights from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}
