//! Error types for pdfsieve.

use std::io;
use thiserror::Error;

/// Result type alias for pdfsieve operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing and ranking.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input documents or configuration.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error extracting text content from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// No sections survived extraction across the whole run.
    ///
    /// Fatal: ranking an empty candidate list would silently produce an
    /// empty result, so the run aborts instead.
    #[error("no content extracted from any input document")]
    NoContent,

    /// The embedding model failed to produce vectors.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// The embedding model returned a vector of unexpected dimensionality.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Error reading or writing run configuration / results.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::PdfParse(err.to_string())
    }
}
