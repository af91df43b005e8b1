//! Configuration structures for the number scanning pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{NumscanError, Result};

/// Main configuration for the numscan pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumscanConfig {
    /// Number extraction configuration.
    pub extraction: ExtractionConfig,

    /// Report configuration.
    pub report: ReportConfig,

    /// Text source configuration.
    pub source: SourceConfig,
}

/// Number extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Characters of surrounding text kept on each side of a match.
    pub context_chars: usize,

    /// Characters scanned on each side of a context-scale phrase.
    pub window_chars: usize,

    /// Maximum pages to scan (0 = unlimited).
    pub max_pages: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            context_chars: 50,
            window_chars: 200,
            max_pages: 0,
        }
    }
}

/// Report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of findings listed per category.
    pub top_n: usize,

    /// Context characters shown per finding.
    pub context_display_chars: usize,

    /// Absolute tolerance used when looking up a target value.
    pub match_tolerance: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            context_display_chars: 150,
            match_tolerance: 0.1,
        }
    }
}

/// Text source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Use pdf-extract for PDF pages lopdf cannot read.
    pub pdf_fallback: bool,

    /// Separator between pages in plain text files.
    pub page_separator: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            pdf_fallback: true,
            page_separator: "\u{0c}".to_string(),
        }
    }
}

impl NumscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| NumscanError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| NumscanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_documented_constants() {
        let config = NumscanConfig::default();
        assert_eq!(config.extraction.context_chars, 50);
        assert_eq!(config.extraction.window_chars, 200);
        assert_eq!(config.report.top_n, 5);
        assert_eq!(config.report.context_display_chars, 150);
        assert_eq!(config.source.page_separator, "\u{0c}");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: NumscanConfig =
            serde_json::from_str(r#"{"report": {"top_n": 10}}"#).unwrap();
        assert_eq!(config.report.top_n, 10);
        assert_eq!(config.report.match_tolerance, 0.1);
        assert_eq!(config.extraction, ExtractionConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = NumscanConfig::default();
        config.extraction.window_chars = 120;
        config.save(&path).unwrap();

        assert_eq!(NumscanConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            NumscanConfig::from_file(&path),
            Err(NumscanError::Config(_))
        ));
    }
}
