//! Data models shared across the pipeline.

pub mod config;
pub mod finding;

pub use config::{ExtractionConfig, NumscanConfig, ReportConfig, SourceConfig};
pub use finding::{Finding, NumberFinding, ScaledFinding};
