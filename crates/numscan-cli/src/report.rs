//! Report building and output formats.

use serde::Serialize;

use numscan_core::models::config::ReportConfig;
use numscan_core::{Finding, Findings, ScaledFinding, Summary};

/// Output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text report
    Text,
    /// JSON report
    Json,
    /// CSV of every deduplicated finding
    Csv,
}

/// Outcome of looking up a target value.
#[derive(Debug, Serialize)]
pub struct TargetLookup {
    pub target: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<Finding>,
}

/// Everything reported for one document.
#[derive(Debug, Serialize)]
pub struct Report {
    pub source: String,
    pub summary: Summary,
    pub top_unscaled: Vec<Finding>,
    pub top_scaled: Vec<ScaledFinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetLookup>,
    #[serde(skip)]
    findings: Findings,
}

impl Report {
    pub fn new(source: impl Into<String>, findings: Findings, config: &ReportConfig, target: Option<f64>) -> Self {
        let target = target.map(|target| TargetLookup {
            target,
            found: findings.find_value(target, config.match_tolerance),
        });

        Self {
            source: source.into(),
            summary: findings.summary(),
            top_unscaled: findings.top_unscaled(config.top_n),
            top_scaled: findings.top_scaled(config.top_n),
            target,
            findings,
        }
    }

    pub fn render(&self, format: OutputFormat, config: &ReportConfig) -> anyhow::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.format_text(config.context_display_chars)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Csv => self.format_csv(),
        }
    }

    fn format_text(&self, context_chars: usize) -> String {
        let mut output = String::new();

        output.push_str("=== TOP UNSCALED NUMBERS (DEDUPLICATED) ===\n");
        for (i, number) in self.top_unscaled.iter().enumerate() {
            output.push_str(&format!("{}. Value: {}\n", i + 1, number.value));
            output.push_str(&format!("   Original text: {}\n", number.original_text));
            output.push_str(&format!("   Page: {}\n", number.page));
            output.push_str(&format!("   Context: {}...\n\n", truncate_chars(&number.context, context_chars)));
        }

        output.push_str("\n=== TOP SCALED NUMBERS (DEDUPLICATED) ===\n");
        for (i, number) in self.top_scaled.iter().enumerate() {
            output.push_str(&format!("{}. Scaled value: {}\n", i + 1, number.value));
            output.push_str(&format!("   Original text: {}\n", number.original_text));
            output.push_str(&format!("   Scaling factor: {}\n", number.scale_name));
            output.push_str(&format!("   Page: {}\n", number.page));
            output.push_str(&format!("   Context: {}...\n\n", truncate_chars(&number.context, context_chars)));
        }

        let summary = &self.summary;
        output.push_str("\n=== SUMMARY ===\n");
        output.push_str(&format!("Pages scanned: {}\n", summary.pages_scanned));
        output.push_str(&format!(
            "Total unscaled numbers found: {} (Deduplicated: {})\n",
            summary.unscaled_total, summary.unscaled_unique
        ));
        output.push_str(&format!(
            "Total scaled numbers found: {} (Deduplicated: {})\n",
            summary.scaled_total, summary.scaled_unique
        ));

        if let Some(largest) = &summary.largest_unscaled {
            output.push_str(&format!("\nLargest unscaled number: {}\n", largest.value));
            output.push_str(&format!("Original text: {}\n", largest.original_text));
            output.push_str(&format!("Page: {}\n", largest.page));
        }

        if let Some(largest) = &summary.largest_scaled {
            output.push_str(&format!("\nLargest scaled number: {}\n", largest.value));
            output.push_str(&format!("Original text: {}\n", largest.original_text));
            output.push_str(&format!("Scaling factor: {}\n", largest.scale_name));
            output.push_str(&format!("Page: {}\n", largest.page));
        }

        if let Some(lookup) = &self.target {
            match &lookup.found {
                Some(number) => {
                    output.push_str(&format!("\n=== FOUND TARGET NUMBER {} ===\n", lookup.target));
                    output.push_str(&format!("Value: {}\n", number.value));
                    output.push_str(&format!("Original text: {}\n", number.original_text));
                    output.push_str(&format!("Page: {}\n", number.page));
                    output.push_str(&format!("Context: {}\n", number.context));
                }
                None => {
                    output.push_str(&format!(
                        "\nWARNING: Target number {} not found in results\n",
                        lookup.target
                    ));
                }
            }
        }

        output
    }

    fn format_csv(&self) -> anyhow::Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        wtr.write_record(["kind", "value", "original_text", "scale_name", "page", "context"])?;

        for number in self.findings.unique_unscaled() {
            let value = number.value.to_string();
            let page = number.page.to_string();
            wtr.write_record([
                "unscaled",
                value.as_str(),
                number.original_text.as_str(),
                "",
                page.as_str(),
                number.context.as_str(),
            ])?;
        }

        for number in self.findings.unique_scaled() {
            let value = number.value.to_string();
            let page = number.page.to_string();
            wtr.write_record([
                "scaled",
                value.as_str(),
                number.original_text.as_str(),
                number.scale_name.as_str(),
                page.as_str(),
                number.context.as_str(),
            ])?;
        }

        Ok(String::from_utf8(wtr.into_inner()?)?)
    }
}

/// First `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numscan_core::{extract_numbers, PageText};

    fn report(text: &str, target: Option<f64>) -> Report {
        let findings = extract_numbers(&[PageText::new(1, text)]);
        Report::new("test.txt", findings, &ReportConfig::default(), target)
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("€€€€", 2), "€€");
    }

    #[test]
    fn test_text_report() {
        let text = report("The project cost 5 million dollars, not 1,234.", Some(1234.0))
            .format_text(150);

        assert!(text.contains("1. Value: 1234\n   Original text: 1,234"));
        assert!(text.contains("Scaling factor: million"));
        assert!(text.contains("Largest scaled number: 5000000"));
        assert!(text.contains("=== FOUND TARGET NUMBER 1234 ==="));
    }

    #[test]
    fn test_text_report_missing_target() {
        let text = report("nothing numeric", Some(35110.0)).format_text(150);
        assert!(text.contains("WARNING: Target number 35110 not found in results"));
        assert!(!text.contains("Largest unscaled number"));
    }

    #[test]
    fn test_json_report() {
        let json = report("Amounts in millions: 7", None)
            .render(OutputFormat::Json, &ReportConfig::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["scaled_unique"], 1);
        assert_eq!(value["top_scaled"][0]["value"], 7e6);
        assert!(value.get("target").is_none());
    }

    #[test]
    fn test_csv_report() {
        let csv = report("12 and 3 thousand", None)
            .render(OutputFormat::Csv, &ReportConfig::default())
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "kind,value,original_text,scale_name,page,context");
        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("scaled,3000,3,thousand,1,"));
    }
}
