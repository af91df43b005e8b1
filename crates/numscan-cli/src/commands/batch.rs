//! Batch command - scan multiple documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use crate::report::{OutputFormat, Report};

use super::scan::scan_file;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern
    #[arg(required = true)]
    input: String,

    /// Directory for per-document reports
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Format of per-document reports
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write summary.csv to the output directory
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of scanning a single file.
struct BatchResult {
    path: PathBuf,
    report: Option<Report>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt" | "text")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to scan",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = scan_file(&path, &config, None, false).and_then(|report| {
            if let Some(ref output_dir) = args.output_dir {
                let output = report.render(args.format, &config.report)?;
                fs::write(report_path(output_dir, &path, args.format), output)?;
            }
            Ok(report)
        });
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(report) => {
                results.push(BatchResult {
                    path,
                    report: Some(report),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to scan {}: {}", path.display(), error_msg);
                    results.push(BatchResult {
                        path,
                        report: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to scan {}: {}", path.display(), error_msg);
                    anyhow::bail!("Scanning failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    for result in &results {
        match (&result.report, &result.error) {
            (Some(report), _) => {
                let summary = &report.summary;
                let largest_unscaled = summary
                    .largest_unscaled
                    .as_ref()
                    .map_or("-".to_string(), |f| f.value.to_string());
                let largest_scaled = summary
                    .largest_scaled
                    .as_ref()
                    .map_or("-".to_string(), |f| f.value.to_string());
                println!(
                    "{} {}: {} pages, {} unscaled, {} scaled, largest {} / {} ({}ms)",
                    style("✓").green(),
                    result.path.display(),
                    summary.pages_scanned,
                    summary.unscaled_unique,
                    summary.scaled_unique,
                    largest_unscaled,
                    largest_scaled,
                    result.processing_time_ms
                );
            }
            (None, Some(error)) => {
                println!("{} {}: {}", style("✗").red(), result.path.display(), error);
            }
            (None, None) => {}
        }
    }

    if args.summary {
        let summary_dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let summary_path = summary_dir.join("summary.csv");
        fs::write(&summary_path, summary_csv(&results)?)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    println!(
        "{} Scanned {} files ({} failed) in {:.1}s",
        style("ℹ").blue(),
        results.len(),
        failed,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn report_path(output_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    let extension = match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
    };
    output_dir.join(format!("{}.{}", stem, extension))
}

fn summary_csv(results: &[BatchResult]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "file",
        "status",
        "pages",
        "unscaled_unique",
        "scaled_unique",
        "largest_unscaled",
        "largest_scaled",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let path = result.path.display().to_string();
        let time = result.processing_time_ms.to_string();
        match &result.report {
            Some(report) => {
                let s = &report.summary;
                let pages = s.pages_scanned.to_string();
                let unscaled = s.unscaled_unique.to_string();
                let scaled = s.scaled_unique.to_string();
                let largest_unscaled = s
                    .largest_unscaled
                    .as_ref()
                    .map(|f| f.value.to_string())
                    .unwrap_or_default();
                let largest_scaled = s
                    .largest_scaled
                    .as_ref()
                    .map(|f| f.value.to_string())
                    .unwrap_or_default();
                wtr.write_record([
                    path.as_str(),
                    "ok",
                    pages.as_str(),
                    unscaled.as_str(),
                    scaled.as_str(),
                    largest_unscaled.as_str(),
                    largest_scaled.as_str(),
                    time.as_str(),
                    "",
                ])?;
            }
            None => {
                wtr.write_record([
                    path.as_str(),
                    "error",
                    "",
                    "",
                    "",
                    "",
                    "",
                    time.as_str(),
                    result.error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_path() {
        assert_eq!(
            report_path(Path::new("out"), Path::new("docs/fy25.pdf"), OutputFormat::Json),
            PathBuf::from("out/fy25.json")
        );
        assert_eq!(
            report_path(Path::new("out"), Path::new("a.txt"), OutputFormat::Text),
            PathBuf::from("out/a.txt")
        );
    }

    #[test]
    fn test_summary_csv_error_row() {
        let results = vec![BatchResult {
            path: PathBuf::from("broken.pdf"),
            report: None,
            error: Some("failed to parse document".to_string()),
            processing_time_ms: 3,
        }];
        let csv = summary_csv(&results).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("broken.pdf,error,"));
    }
}
