//! Output formatting shared by the commands.

use std::fs;
use std::path::Path;

use console::style;
use docbr_core::{FieldValue, ServiceResponse};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (one row per field)
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_response(
    response: &ServiceResponse,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Json => Ok(serde_json::to_string(response)?),
        OutputFormat::Csv => format_csv(response),
        OutputFormat::Text => Ok(format_text(response)),
    }
}

/// Write to `output` when given, stdout otherwise.
pub fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            println!("{} Output written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Flatten a field value into `(sub_key, value)` rows.
fn field_rows(key: &str, value: &FieldValue) -> Vec<(String, String)> {
    match value {
        FieldValue::Text(text) => vec![(key.to_string(), text.clone())],
        FieldValue::Record(record) => record
            .iter()
            .map(|(sub, v)| (format!("{}.{}", key, sub), v.clone()))
            .collect(),
        FieldValue::Absent => vec![(key.to_string(), String::new())],
    }
}

fn format_csv(response: &ServiceResponse) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["file_name", "field", "value"])?;

    if let Some(data) = &response.structured_data {
        for (key, value) in data.iter() {
            for (field, value) in field_rows(key, value) {
                wtr.write_record([response.file_name.as_str(), field.as_str(), value.as_str()])?;
            }
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(response: &ServiceResponse) -> String {
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", response.file_name));
    if let Some(document) = response.document {
        output.push_str(&format!("Document: {}\n", document));
    }
    if let Some(backend) = response.backend {
        output.push_str(&format!("Backend: {}\n", backend));
    }

    if let Some(data) = &response.structured_data {
        output.push_str("\nFields:\n");
        for (key, value) in data.iter() {
            for (field, value) in field_rows(key, value) {
                let shown = if value.is_empty() { "-".to_string() } else { value };
                output.push_str(&format!("  {}: {}\n", field, shown));
            }
        }
    }

    if let Some(text) = &response.extracted_text {
        output.push_str("\nText:\n");
        output.push_str(text);
        output.push('\n');
    }

    output
}
