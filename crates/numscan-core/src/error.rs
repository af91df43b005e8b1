//! Error types for the numscan-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the numscan library.
#[derive(Error, Debug)]
pub enum NumscanError {
    /// Text source error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while obtaining page text from a document.
///
/// These are the only failures that leave the library; anything that goes
/// wrong with an individual number match is handled inside the extractor.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The input document does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No text source handles this kind of file.
    #[error("unsupported file type: {0}")]
    Unsupported(String),

    /// Failed to open/parse the document.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Failed to extract text from the document.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// Reading the document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the numscan library.
pub type Result<T> = std::result::Result<T, NumscanError>;
