//! PDF page text using lopdf, with pdf-extract as a per-page fallback.

use std::path::{Path, PathBuf};

use lopdf::Document;
use tracing::{debug, warn};

use super::{PageText, Result, TextSource};
use crate::error::SourceError;

/// PDF text source.
#[derive(Debug, Clone)]
pub struct PdfSource {
    path: PathBuf,
    fallback: bool,
}

impl PdfSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            fallback: true,
        }
    }

    /// Fall back to pdf-extract for pages lopdf cannot read.
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Load the document, decrypting it if it only has an empty password.
    ///
    /// Returns the document and the (decrypted) bytes for pdf-extract.
    fn load(&self) -> Result<(Document, Vec<u8>)> {
        if !self.path.exists() {
            return Err(SourceError::NotFound(self.path.clone()));
        }

        let data = std::fs::read(&self.path)?;
        let mut doc = Document::load_mem(&data).map_err(|e| SourceError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(SourceError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| SourceError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            return Ok((doc, decrypted));
        }

        Ok((doc, data))
    }

    /// Text of every page according to pdf-extract, in page order.
    fn extract_by_pages(&self, raw: &[u8]) -> Result<Vec<String>> {
        pdf_extract::extract_text_from_mem_by_pages(raw)
            .map_err(|e| SourceError::TextExtraction(e.to_string()))
    }
}

impl TextSource for PdfSource {
    fn pages(&self) -> Result<Vec<PageText>> {
        let (doc, raw) = self.load()?;
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        debug!("Loaded PDF with {} pages", page_numbers.len());

        let mut extracted = Vec::with_capacity(page_numbers.len());
        for number in page_numbers {
            match doc.extract_text(&[number]) {
                Ok(text) => extracted.push((number, Some(text))),
                Err(e) if self.fallback => {
                    warn!("Text extraction failed on page {}: {}, using pdf-extract", number, e);
                    extracted.push((number, None));
                }
                Err(e) => {
                    return Err(SourceError::TextExtraction(format!("page {}: {}", number, e)));
                }
            }
        }

        fill_missing_pages(extracted, || self.extract_by_pages(&raw))
    }
}

/// Resolve pages lopdf could not read from `fallback`, which returns the text
/// of every page in document order. `fallback` only runs if a page is missing.
fn fill_missing_pages<F>(extracted: Vec<(u32, Option<String>)>, fallback: F) -> Result<Vec<PageText>>
where
    F: FnOnce() -> Result<Vec<String>>,
{
    let mut fallback = Some(fallback);
    let mut fallback_pages = Vec::new();
    let mut pages = Vec::with_capacity(extracted.len());

    for (index, (number, text)) in extracted.into_iter().enumerate() {
        let text = match text {
            Some(text) => text,
            None => {
                if let Some(fallback) = fallback.take() {
                    fallback_pages = fallback()?;
                }
                fallback_pages.get_mut(index).map(std::mem::take).unwrap_or_else(|| {
                    debug!("No fallback text for page {}", number);
                    String::new()
                })
            }
        };
        pages.push(PageText::new(number, text));
    }

    Ok(pages)
}
