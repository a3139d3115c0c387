//! PDF text sources.

#[cfg(feature = "pdf")]
mod document;
#[cfg(feature = "pdf")]
mod sources;

#[cfg(feature = "pdf")]
pub use document::PdfDocument;
#[cfg(feature = "pdf")]
pub use sources::{FastSource, LayoutSource, PreciseSource};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PdfError};

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for text extraction backends.
///
/// Output is linearized page by page. Backends differ in whitespace and
/// layout fidelity, which affects which field patterns match downstream.
pub trait TextSource {
    /// Short backend name.
    fn name(&self) -> &'static str;

    /// Extract the text of a whole PDF given its bytes.
    fn extract(&self, data: &[u8]) -> Result<String>;
}

/// Available text backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBackend {
    /// Object-level text per page (low fidelity, fastest).
    Fast,
    /// Page-by-page text with blank lines between pages.
    #[default]
    Layout,
    /// Whole-document content stream interpretation.
    Precise,
}

impl TextBackend {
    pub const ALL: [TextBackend; 3] = [TextBackend::Fast, TextBackend::Layout, TextBackend::Precise];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextBackend::Fast => "fast",
            TextBackend::Layout => "layout",
            TextBackend::Precise => "precise",
        }
    }

    /// Get the text source implementing this backend.
    #[cfg(feature = "pdf")]
    pub fn source(&self) -> Box<dyn TextSource + Send + Sync> {
        match self {
            TextBackend::Fast => Box::new(FastSource),
            TextBackend::Layout => Box::new(LayoutSource),
            TextBackend::Precise => Box::new(PreciseSource),
        }
    }
}

impl fmt::Display for TextBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fast" => Ok(TextBackend::Fast),
            "layout" => Ok(TextBackend::Layout),
            "precise" => Ok(TextBackend::Precise),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}
