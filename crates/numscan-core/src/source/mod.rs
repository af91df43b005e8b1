//! Page text sources.

mod pdf;
mod plain;

pub use pdf::PdfSource;
pub use plain::PlainTextSource;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::models::config::SourceConfig;

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Text of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-indexed).
    pub number: u32,
    /// Raw page text.
    pub text: String,
}

impl PageText {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Supplier of ordered page text for one document.
pub trait TextSource {
    /// Read every page, in page order.
    fn pages(&self) -> Result<Vec<PageText>>;
}

/// Pages already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<PageText>,
}

impl MemorySource {
    pub fn new(pages: Vec<PageText>) -> Self {
        Self { pages }
    }

    /// Number the given texts as consecutive pages starting at 1.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = texts
            .into_iter()
            .zip(1..)
            .map(|(text, number)| PageText::new(number, text))
            .collect();
        Self { pages }
    }
}

impl TextSource for MemorySource {
    fn pages(&self) -> Result<Vec<PageText>> {
        Ok(self.pages.clone())
    }
}

/// Pick a text source for `path` based on its extension.
pub fn open_source(path: &Path, config: &SourceConfig) -> Result<Box<dyn TextSource>> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Ok(Box::new(
            PdfSource::new(path).with_fallback(config.pdf_fallback),
        )),
        "txt" | "text" => Ok(Box::new(
            PlainTextSource::new(path).with_separator(config.page_separator.clone()),
        )),
        _ => Err(SourceError::Unsupported(extension)),
    }
}
