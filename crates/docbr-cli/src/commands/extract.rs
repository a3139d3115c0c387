//! Extract command - text and document fields from a single PDF.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use docbr_core::{DocumentKind, DocumentService, TextBackend};

use super::output::{format_response, write_output, OutputFormat};
use super::{failure, load_config, read_input};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Document type (vehicle, medical, cpf); falls back to the config
    #[arg(short, long)]
    document: Option<DocumentKind>,

    /// Text backend (fast, layout, precise)
    #[arg(short, long)]
    backend: Option<TextBackend>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Leave the extracted text out of the output
    #[arg(long)]
    no_text: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Show how many fields were recognized
    #[arg(long)]
    show_summary: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;

    if let Some(document) = args.document {
        config.extraction.document = Some(document);
    }
    if let Some(backend) = args.backend {
        config.text.backend = backend;
    }
    if args.no_text {
        config.output.include_text = false;
    }

    let Some(document) = config.extraction.document else {
        anyhow::bail!("No document type given. Use --document or set extraction.document in the config.");
    };

    let (file_name, data) = read_input(&args.input)?;
    info!("Extracting {} fields from {}", document, args.input.display());

    let pretty = args.pretty || config.output.pretty;
    let service = DocumentService::new(config);
    let response = service.process_upload(&file_name, &data).map_err(failure)?;

    let content = format_response(&response, args.format, pretty)?;
    write_output(args.output.as_deref(), &content)?;

    if args.show_summary {
        let found = response
            .structured_data
            .as_ref()
            .map(|d| d.found_count())
            .unwrap_or(0);
        let declared = document.extractor().field_keys().len();
        eprintln!(
            "{} Recognized {}/{} fields in {}ms",
            style("ℹ").blue(),
            found,
            declared,
            response.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}
