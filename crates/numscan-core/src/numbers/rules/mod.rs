//! Rule-based number and scale recognition.

pub mod context;
pub mod normalize;
pub mod patterns;

pub use context::context_snippet;
pub use normalize::parse_number;
pub use patterns::{multiplier_for, Scale, ScaleRule, CONTEXT_RULES, NUMBER_PATTERN, SUFFIX_RULES, TEXT_RUN};
