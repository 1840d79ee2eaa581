//! Error types for paralign library.

use std::io;
use thiserror::Error;

/// Result type alias for paralign operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while preparing, aligning or evaluating documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A raw segment is missing a required field or carries an unusable value.
    #[error("Malformed segment {index}: missing or invalid `{field}`")]
    MalformedSegment {
        /// Position of the segment in its input batch
        index: usize,
        /// Name of the offending field
        field: &'static str,
    },

    /// Score weights cannot produce a weighted mean.
    #[error("Invalid score weights: {0}")]
    InvalidWeights(String),

    /// A language code was requested that the aligned document does not contain.
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// A segment document referenced by a label could not be located.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Error while running the alignment benchmark.
    #[error("Benchmark error: {0}")]
    Benchmark(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
