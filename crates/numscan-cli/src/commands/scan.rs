//! Scan command - report numbers found in a single document.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use numscan_core::{open_source, NumberExtractor, NumscanConfig};

use crate::report::{OutputFormat, Report};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input document (PDF or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Number of findings listed per category
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Report whether this value appears among the plain numbers
    #[arg(short, long, allow_hyphen_values = true)]
    target: Option<f64>,

    /// Maximum pages to scan (0 = unlimited)
    #[arg(long)]
    max_pages: Option<usize>,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(top_n) = args.top_n {
        config.report.top_n = top_n;
    }
    if let Some(max_pages) = args.max_pages {
        config.extraction.max_pages = max_pages;
    }

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Scanning file: {}", args.input.display());

    let report = scan_file(&args.input, &config, args.target, true)?;
    let output = report.render(args.format, &config.report)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read, scan and summarise one document.
pub fn scan_file(
    path: &Path,
    config: &NumscanConfig,
    target: Option<f64>,
    show_progress: bool,
) -> anyhow::Result<Report> {
    let pages = open_source(path, &config.source)?.pages()?;
    debug!("{} has {} pages", path.display(), pages.len());

    let pb = if show_progress {
        ProgressBar::new(pages.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} pages {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let extractor = NumberExtractor::from_config(&config.extraction);
    let findings = extractor.extract_with_progress(&pages, |page| {
        pb.set_message(format!("page {}", page.number));
        pb.inc(1);
    });
    pb.finish_and_clear();

    Ok(Report::new(
        path.display().to_string(),
        findings,
        &config.report,
        target,
    ))
}
