//! Parse command - recognize fields in an extracted text file.

use std::path::PathBuf;

use clap::Args;

use docbr_core::{DocumentKind, DocumentService};

use super::output::{format_response, write_output, OutputFormat};
use super::{load_config, read_input};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file (use - for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Document type (vehicle, medical, cpf)
    #[arg(short, long)]
    document: DocumentKind,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let pretty = args.pretty || config.output.pretty;

    let (file_name, text) = if args.input.as_os_str() == "-" {
        ("stdin".to_string(), std::io::read_to_string(std::io::stdin())?)
    } else {
        let (file_name, data) = read_input(&args.input)?;
        (file_name, String::from_utf8(data)?)
    };

    let service = DocumentService::new(config).with_document(Some(args.document));
    let response = service.process_text(&file_name, &text);

    let content = format_response(&response, args.format, pretty)?;
    write_output(args.output.as_deref(), &content)
}
