//! CLI sub-commands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod output;
pub mod parse;
pub mod text;

use std::path::Path;

use docbr_core::{DocbrConfig, ErrorResponse, ServiceError};

/// Load the configuration from `path`, the default location, or defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<DocbrConfig> {
    let config = DocbrConfig::resolve(path.map(Path::new), &config::default_config_path())?;
    Ok(config)
}

/// Read an input file, failing early when it does not exist.
pub fn read_input(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    Ok((file_name, std::fs::read(path)?))
}

/// Turn a service failure into the uniform error response.
pub fn failure(err: ServiceError) -> anyhow::Error {
    let response = ErrorResponse::from(&err);
    match serde_json::to_string(&response) {
        Ok(json) => anyhow::anyhow!(json),
        Err(_) => anyhow::anyhow!("{}", err),
    }
}
