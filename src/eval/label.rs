//! Ground-truth alignment labels.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::ParagraphPair;

/// Hand-labelled paragraph pairs for one document in two languages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentLabel {
    /// Main-language code
    pub main_language: String,

    /// Other-language code
    pub other_language: String,

    /// Identifier of the main-language segment document
    pub main_document_id: String,

    /// Identifier of the other-language segment document
    pub other_document_id: String,

    /// Correct main/other text pairs
    #[serde(default)]
    pub paragraphs: Vec<ParagraphPair>,
}

impl AlignmentLabel {
    /// Name used for this label in reports.
    pub fn name(&self) -> String {
        format!(
            "{}_{}_{}",
            self.main_document_id, self.main_language, self.other_language
        )
    }

    /// Parse a label from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a label from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Load labels from a JSON file or from every `.json` file of a directory.
///
/// Directory entries are returned sorted by file name.
pub fn load_labels<P: AsRef<Path>>(path: P) -> Result<Vec<AlignmentLabel>> {
    let path = path.as_ref();
    if path.is_file() {
        return Ok(vec![AlignmentLabel::from_file(path)?]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let file = entry?.path();
        if file.extension().is_some_and(|ext| ext == "json") {
            files.push(file);
        }
    }
    files.sort();

    log::debug!("Loading {} labels from {}", files.len(), path.display());
    files.iter().map(AlignmentLabel::from_file).collect()
}
