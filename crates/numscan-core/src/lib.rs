//! Core library for finding numbers in document text.
//!
//! This crate provides:
//! - Page text sources (PDF, plain text, in-memory)
//! - Bare number and magnitude scale recognition ("5 million", "amounts in thousands")
//! - Deduplication, ranking and lookup over the findings

pub mod error;
pub mod models;
pub mod numbers;
pub mod source;

pub use error::{NumscanError, Result, SourceError};
pub use models::config::NumscanConfig;
pub use models::finding::{Finding, NumberFinding, ScaledFinding};
pub use numbers::{extract_numbers, Findings, NumberExtractor, Summary};
pub use source::{open_source, MemorySource, PageText, PdfSource, PlainTextSource, TextSource};

