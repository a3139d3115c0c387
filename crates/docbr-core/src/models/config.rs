//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::document::{DocumentKind, VehicleExtractor};
use crate::error::ConfigError;
use crate::pdf::TextBackend;

/// Main configuration for docbr.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocbrConfig {
    /// Text source configuration.
    pub text: TextConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Text source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Backend used to turn PDF bytes into text.
    pub backend: TextBackend,

    /// Extension uploaded file names must end with.
    pub allowed_extension: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            backend: TextBackend::Layout,
            allowed_extension: ".pdf".to_string(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Document type to extract; text only when unset.
    pub document: Option<DocumentKind>,

    /// Maximum lines scanned after the chassis label (unbounded when unset).
    pub chassis_line_limit: Option<usize>,
}

impl ExtractionConfig {
    /// Vehicle extractor honouring this configuration.
    pub fn vehicle_extractor(&self) -> VehicleExtractor {
        VehicleExtractor::new().with_chassis_line_limit(self.chassis_line_limit)
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Include the extracted text in responses.
    pub include_text: bool,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_text: true,
            pretty: false,
        }
    }
}

impl DocbrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load `explicit` when given, otherwise `fallback` if it exists,
    /// otherwise the defaults.
    pub fn resolve(explicit: Option<&Path>, fallback: &Path) -> crate::Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::from_file(path)?);
        }
        if fallback.exists() {
            Ok(Self::from_file(fallback)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
