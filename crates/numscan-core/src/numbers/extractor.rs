//! Number extraction over document pages.
//!
//! Three independent passes run over every page:
//! - unscaled: every bare number, verbatim;
//! - direct-scaled: numbers followed by a scale word ("5 million");
//! - context-scaled: bare numbers near a scale heading ("amounts in thousands").
//!
//! The passes do not exclude each other, so the "5" in "5 million" is both an
//! unscaled and a scaled finding, and a number near two heading phrases is
//! recorded once per phrase.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::models::config::ExtractionConfig;
use crate::models::finding::{Finding, ScaledFinding};
use crate::source::PageText;

use super::ranking;
use super::rules::context::{chars_after, chars_before, context_snippet};
use super::rules::{parse_number, CONTEXT_RULES, NUMBER_PATTERN, SUFFIX_RULES, TEXT_RUN};

/// Pages between progress log lines.
const PROGRESS_INTERVAL: u32 = 10;

/// Findings of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Findings {
    /// Numbers found verbatim.
    pub unscaled: Vec<Finding>,
    /// Numbers with a scale applied.
    pub scaled: Vec<ScaledFinding>,
    /// Number of pages scanned.
    pub pages_scanned: usize,
}

/// Counts and extremes of a run, after deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub pages_scanned: usize,
    pub unscaled_total: usize,
    pub unscaled_unique: usize,
    pub scaled_total: usize,
    pub scaled_unique: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_unscaled: Option<Finding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_scaled: Option<ScaledFinding>,
}

impl Findings {
    pub fn unique_unscaled(&self) -> Vec<Finding> {
        ranking::deduplicate(&self.unscaled)
    }

    pub fn unique_scaled(&self) -> Vec<ScaledFinding> {
        ranking::deduplicate(&self.scaled)
    }

    pub fn largest_unscaled(&self) -> Option<Finding> {
        ranking::largest(&self.unscaled)
    }

    pub fn largest_scaled(&self) -> Option<ScaledFinding> {
        ranking::largest(&self.scaled)
    }

    pub fn top_unscaled(&self, n: usize) -> Vec<Finding> {
        ranking::top_n(&self.unscaled, n)
    }

    pub fn top_scaled(&self, n: usize) -> Vec<ScaledFinding> {
        ranking::top_n(&self.scaled, n)
    }

    /// Look up `target` among the unscaled findings.
    pub fn find_value(&self, target: f64, tolerance: f64) -> Option<Finding> {
        ranking::find_value(&self.unscaled, target, tolerance)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            pages_scanned: self.pages_scanned,
            unscaled_total: self.unscaled.len(),
            unscaled_unique: self.unique_unscaled().len(),
            scaled_total: self.scaled.len(),
            scaled_unique: self.unique_scaled().len(),
            largest_unscaled: self.largest_unscaled(),
            largest_scaled: self.largest_scaled(),
        }
    }
}

/// Scans page text for unscaled and scaled numbers.
#[derive(Debug, Clone)]
pub struct NumberExtractor {
    /// Context characters on each side of a match.
    context_chars: usize,
    /// Characters scanned on each side of a scale heading.
    window_chars: usize,
    /// Maximum pages to scan (0 = unlimited).
    max_pages: usize,
}

impl NumberExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            context_chars: config.context_chars,
            window_chars: config.window_chars,
            max_pages: config.max_pages,
        }
    }

    pub fn with_context_chars(mut self, chars: usize) -> Self {
        self.context_chars = chars;
        self
    }

    pub fn with_window_chars(mut self, chars: usize) -> Self {
        self.window_chars = chars;
        self
    }

    pub fn with_max_pages(mut self, pages: usize) -> Self {
        self.max_pages = pages;
        self
    }

    /// Run all passes over `pages`.
    pub fn extract(&self, pages: &[PageText]) -> Findings {
        self.extract_with_progress(pages, |_| {})
    }

    /// Run all passes over `pages`, calling `on_page` after each page.
    pub fn extract_with_progress<F>(&self, pages: &[PageText], mut on_page: F) -> Findings
    where
        F: FnMut(&PageText),
    {
        let limit = match self.max_pages {
            0 => pages.len(),
            n => n.min(pages.len()),
        };

        let mut findings = Findings::default();
        for (i, page) in pages[..limit].iter().enumerate() {
            findings.unscaled.extend(self.find_unscaled(page));
            findings.scaled.extend(self.find_direct_scaled(page));
            findings.scaled.extend(self.find_context_scaled(page));
            findings.pages_scanned += 1;

            let done = i as u32 + 1;
            if done % PROGRESS_INTERVAL == 0 {
                info!("Processed {} pages...", done);
            }
            on_page(page);
        }

        debug!(
            "Scanned {} pages: {} unscaled, {} scaled findings",
            findings.pages_scanned,
            findings.unscaled.len(),
            findings.scaled.len()
        );

        findings
    }

    /// Every bare number on the page.
    pub fn find_unscaled(&self, page: &PageText) -> Vec<Finding> {
        let text = page.text.as_str();

        scan_bare_numbers(text)
            .into_iter()
            .filter_map(|(start, end)| {
                let original = &text[start..end];
                let value = parse_token(original, page.number)?;
                Some(Finding {
                    value,
                    original_text: original.to_string(),
                    page: page.number,
                    context: context_snippet(text, start, end, self.context_chars),
                })
            })
            .collect()
    }

    /// Numbers immediately followed by a scale word, one rule at a time.
    pub fn find_direct_scaled(&self, page: &PageText) -> Vec<ScaledFinding> {
        let text = page.text.as_str();
        let mut results = Vec::new();

        for rule in SUFFIX_RULES.iter() {
            for caps in rule.pattern.captures_iter(text) {
                let (Some(full), Some(number)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let Some(value) = parse_token(number.as_str(), page.number) else {
                    continue;
                };

                results.push(ScaledFinding {
                    value: value * rule.multiplier,
                    original_text: number.as_str().to_string(),
                    scale_name: rule.name.to_string(),
                    page: page.number,
                    context: context_snippet(text, full.start(), full.end(), self.context_chars),
                });
            }
        }

        results
    }

    /// Bare numbers near the first occurrence of each scale heading.
    pub fn find_context_scaled(&self, page: &PageText) -> Vec<ScaledFinding> {
        let text = page.text.as_str();
        let mut results = Vec::new();

        for rule in CONTEXT_RULES.iter() {
            let Some(phrase) = rule.pattern.find(text) else {
                continue;
            };

            let window_start = chars_before(text, phrase.start(), self.window_chars);
            let window_end = chars_after(text, phrase.end(), self.window_chars);
            let window = &text[window_start..window_end];
            trace!(
                "Scale phrase '{}' on page {}, scanning {} bytes",
                phrase.as_str(),
                page.number,
                window.len()
            );

            for (start, end) in scan_bare_numbers(window) {
                let original = &window[start..end];
                let Some(value) = parse_token(original, page.number) else {
                    continue;
                };

                let mut context = context_snippet(window, start, end, self.context_chars);
                context.push_str(&format!(" [scale: {}]", rule.name));

                results.push(ScaledFinding {
                    value: value * rule.multiplier,
                    original_text: original.to_string(),
                    scale_name: rule.name.to_string(),
                    page: page.number,
                    context,
                });
            }
        }

        results
    }
}

impl Default for NumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract numbers from `pages` with default settings.
pub fn extract_numbers(pages: &[PageText]) -> Findings {
    NumberExtractor::new().extract(pages)
}

/// Byte spans of bare numbers in `text`.
///
/// Runs of non-whitespace are matched one at a time, which keeps the
/// lookaround engine's backtracking bounded by the longest run instead of the
/// page. If the engine still gives up on a run, the rest of that run is
/// skipped.
fn scan_bare_numbers(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();

    for run in TEXT_RUN.find_iter(text) {
        for m in NUMBER_PATTERN.find_iter(run.as_str()) {
            match m {
                Ok(m) => spans.push((run.start() + m.start(), run.start() + m.end())),
                Err(e) => {
                    debug!("Skipping rest of a {}-byte text run: {}", run.len(), e);
                    break;
                }
            }
        }
    }

    spans
}

fn parse_token(token: &str, page: u32) -> Option<f64> {
    let value = parse_number(token);
    if value.is_none() {
        trace!("Skipping malformed number '{}' on page {}", token, page);
    }
    value
}
