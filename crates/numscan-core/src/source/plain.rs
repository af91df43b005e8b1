//! Plain text files, one page per separator-delimited section.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{PageText, Result, TextSource};
use crate::error::SourceError;

/// Text file source. Pages are split on a separator (form feed by default,
/// which is what `pdftotext` emits between pages).
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    path: PathBuf,
    separator: String,
}

impl PlainTextSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            separator: "\u{0c}".to_string(),
        }
    }

    /// Set the page separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    fn split_pages(&self, content: &str) -> Vec<PageText> {
        if content.is_empty() {
            return Vec::new();
        }

        if self.separator.is_empty() {
            return vec![PageText::new(1, content)];
        }

        // A trailing separator closes the last page rather than opening a new one
        let content = content
            .strip_suffix(self.separator.as_str())
            .unwrap_or(content);

        content
            .split(self.separator.as_str())
            .zip(1..)
            .map(|(text, number)| PageText::new(number, text))
            .collect()
    }
}

impl TextSource for PlainTextSource {
    fn pages(&self) -> Result<Vec<PageText>> {
        if !self.path.exists() {
            return Err(SourceError::NotFound(self.path.clone()));
        }

        let content = std::fs::read_to_string(&self.path)?;
        let pages = self.split_pages(&content);
        debug!("Read {} pages from {}", pages.len(), self.path.display());
        Ok(pages)
    }
}
