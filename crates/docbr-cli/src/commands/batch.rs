//! Batch processing command for multiple PDF files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use docbr_core::{DocumentKind, DocumentService, ErrorResponse, ServiceResponse, TextBackend};

use super::load_config;
use super::output::{format_response, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Document type (vehicle, medical, cpf); text only when omitted
    #[arg(short, long)]
    document: Option<DocumentKind>,

    /// Text backend (fast, layout, precise)
    #[arg(short, long)]
    backend: Option<TextBackend>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    response: Option<ServiceResponse>,
    error: Option<ErrorResponse>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;

    if args.document.is_some() {
        config.extraction.document = args.document;
    }
    if let Some(backend) = args.backend {
        config.text.backend = backend;
    }
    let pretty = config.output.pretty;
    let service = DocumentService::new(config);

    // Expand glob pattern; the extension check is left to the service
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &service);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(response) => results.push(ProcessResult {
                path,
                response: Some(response),
                error: None,
                processing_time_ms,
            }),
            Err(err) => {
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), err.detail);
                    results.push(ProcessResult {
                        path,
                        response: None,
                        error: Some(err),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), err.detail);
                    pb.abandon();
                    anyhow::bail!("{}", serde_json::to_string(&err)?);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.response.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        let Some(response) = &result.response else { continue };
        let content = format_response(response, args.format, pretty)?;

        match &args.output_dir {
            Some(output_dir) => {
                let stem = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");
                let output_path =
                    output_dir.join(format!("{}.{}", stem, args.format.extension()));
                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
            None => println!("{}", content),
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            if let Some(err) = &result.error {
                println!("  - {}: [{}] {}", result.path.display(), err.status, err.detail);
            }
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    service: &DocumentService,
) -> Result<ServiceResponse, ErrorResponse> {
    service.process_path(path).map_err(ErrorResponse::from)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "document",
        "fields_found",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time = result.processing_time_ms.to_string();

        if let Some(response) = &result.response {
            let document = response.document.map(|d| d.to_string()).unwrap_or_default();
            let found = response
                .structured_data
                .as_ref()
                .map(|d| d.found_count().to_string())
                .unwrap_or_default();
            wtr.write_record([filename, "success", document.as_str(), found.as_str(), time.as_str(), ""])?;
        } else {
            let detail = result
                .error
                .as_ref()
                .map(|e| e.detail.as_str())
                .unwrap_or("");
            wtr.write_record([filename, "error", "", "", time.as_str(), detail])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
