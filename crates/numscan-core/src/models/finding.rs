//! Number finding models.

use serde::{Deserialize, Serialize};

/// Common view over both finding kinds, used by deduplication and ranking.
pub trait NumberFinding {
    /// Normalized numeric value.
    fn value(&self) -> f64;

    /// Matched number text, exactly as it appears in the document.
    fn original_text(&self) -> &str;

    /// Page the number was found on (1-indexed).
    fn page(&self) -> u32;
}

/// A number found verbatim in the text, with no scale applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Parsed value of `original_text`.
    pub value: f64,

    /// Matched text, grouping commas included.
    pub original_text: String,

    /// Page number (1-indexed).
    pub page: u32,

    /// Whitespace-normalized text around the match.
    pub context: String,
}

/// A number combined with a magnitude scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledFinding {
    /// Parsed value of `original_text` times the scale multiplier.
    pub value: f64,

    /// Matched number text, without the scale word.
    pub original_text: String,

    /// Name of the scale rule that applied, e.g. `million` or
    /// `thousands (from context)`.
    pub scale_name: String,

    /// Page number (1-indexed).
    pub page: u32,

    /// Whitespace-normalized text around the match.
    pub context: String,
}

impl NumberFinding for Finding {
    fn value(&self) -> f64 {
        self.value
    }

    fn original_text(&self) -> &str {
        &self.original_text
    }

    fn page(&self) -> u32 {
        self.page
    }
}

impl NumberFinding for ScaledFinding {
    fn value(&self) -> f64 {
        self.value
    }

    fn original_text(&self) -> &str {
        &self.original_text
    }

    fn page(&self) -> u32 {
        self.page
    }
}
