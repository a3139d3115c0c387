//! Text command - extract the text of a single PDF.

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use docbr_core::{DocumentService, TextBackend};

use super::output::{format_response, write_output, OutputFormat};
use super::{failure, load_config, read_input};

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Text backend (fast, layout, precise)
    #[arg(short, long)]
    backend: Option<TextBackend>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the raw text instead of a JSON response
    #[arg(long)]
    raw: bool,
}

pub async fn run(args: TextArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let (file_name, data) = read_input(&args.input)?;

    let mut service = DocumentService::new(config).with_document(None);
    if let Some(backend) = args.backend {
        service = service.with_backend(backend);
    }

    let response = service.process_upload(&file_name, &data).map_err(failure)?;
    debug!("Extracted text in {}ms", response.processing_time_ms);

    let content = if args.raw {
        response.extracted_text.clone().unwrap_or_default()
    } else {
        format_response(&response, OutputFormat::Json, service.config().output.pretty)?
    };

    write_output(args.output.as_deref(), &content)
}
