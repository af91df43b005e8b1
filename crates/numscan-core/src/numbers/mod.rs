//! Number and scale extraction.

mod extractor;
pub mod ranking;
pub mod rules;

pub use extractor::{extract_numbers, Findings, NumberExtractor, Summary};
pub use ranking::{deduplicate, find_value, largest, top_n};
