//! Extraction service: the request/response boundary around the extractors.
//!
//! Validates the uploaded file name, turns PDF bytes into text with the
//! configured backend, normalizes case for the document type and wraps the
//! extraction result. Failures become an [`ErrorResponse`] with a status
//! code and a textual detail.

#[cfg(feature = "pdf")]
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::{DocumentExtractor, DocumentKind, ExtractionResult};
use crate::error::{DocbrError, ServiceError};
use crate::models::config::DocbrConfig;
use crate::pdf::TextBackend;

/// Successful response for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse {
    /// Name of the processed file.
    pub file_name: String,

    /// Text handed to the extractor (lower-cased for vehicle and CPF documents).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,

    /// Recognized fields, when a document type was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<ExtractionResult>,

    /// Document type the fields were extracted for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentKind>,

    /// Backend that produced the text, absent for pre-extracted text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<TextBackend>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Uniform failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub detail: String,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        Self {
            status: err.status_code(),
            detail: err.to_string(),
        }
    }
}

impl From<ServiceError> for ErrorResponse {
    fn from(err: ServiceError) -> Self {
        Self::from(&err)
    }
}

/// Service failures keep their status; anything else is a 500.
impl From<DocbrError> for ErrorResponse {
    fn from(err: DocbrError) -> Self {
        match err {
            DocbrError::Service(err) => Self::from(&err),
            other => Self {
                status: 500,
                detail: other.to_string(),
            },
        }
    }
}

/// Check that `file_name` ends with `extension` (e.g. `".pdf"`).
///
/// The comparison is case-sensitive.
pub fn validate_file_name(file_name: &str, extension: &str) -> Result<(), ServiceError> {
    if file_name.ends_with(extension) {
        Ok(())
    } else {
        Err(ServiceError::InvalidFileType {
            label: extension.trim_start_matches('.').to_uppercase(),
        })
    }
}

/// Document extraction service.
#[derive(Debug, Clone, Default)]
pub struct DocumentService {
    config: DocbrConfig,
}

impl DocumentService {
    /// Create a service from configuration.
    pub fn new(config: DocbrConfig) -> Self {
        Self { config }
    }

    /// Override the document type to extract (`None` for text only).
    pub fn with_document(mut self, document: Option<DocumentKind>) -> Self {
        self.config.extraction.document = document;
        self
    }

    /// Override the text backend.
    pub fn with_backend(mut self, backend: TextBackend) -> Self {
        self.config.text.backend = backend;
        self
    }

    pub fn config(&self) -> &DocbrConfig {
        &self.config
    }

    pub fn document(&self) -> Option<DocumentKind> {
        self.config.extraction.document
    }

    pub fn backend(&self) -> TextBackend {
        self.config.text.backend
    }

    /// Validate a file name against the configured extension.
    pub fn validate_file_name(&self, file_name: &str) -> Result<(), ServiceError> {
        validate_file_name(file_name, &self.config.text.allowed_extension)
    }

    /// Process an uploaded PDF.
    #[cfg(feature = "pdf")]
    pub fn process_upload(
        &self,
        file_name: &str,
        data: &[u8],
    ) -> Result<ServiceResponse, ServiceError> {
        let start = Instant::now();
        self.validate_file_name(file_name)?;

        let backend = self.backend();
        info!(
            "Processing {} ({} bytes) with {} backend",
            file_name,
            data.len(),
            backend
        );

        let text = backend.source().extract(data).map_err(|e| {
            tracing::warn!("Text extraction failed for {}: {}", file_name, e);
            ServiceError::from(e)
        })?;

        let mut response = self.respond(file_name, &text, start);
        response.backend = Some(backend);
        Ok(response)
    }

    /// Read a PDF from disk and process it under its file name.
    #[cfg(feature = "pdf")]
    pub fn process_path(&self, path: &Path) -> crate::Result<ServiceResponse> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        // Reject by name before touching the file
        self.validate_file_name(file_name)?;
        let data = std::fs::read(path)?;
        Ok(self.process_upload(file_name, &data)?)
    }

    /// Process text that was already extracted from a document.
    pub fn process_text(&self, file_name: &str, text: &str) -> ServiceResponse {
        let start = Instant::now();
        info!("Processing {} characters of text from {}", text.len(), file_name);
        self.respond(file_name, text, start)
    }

    fn respond(&self, file_name: &str, text: &str, start: Instant) -> ServiceResponse {
        let document = self.document();

        let (text, structured_data) = match document {
            Some(kind) => {
                let normalized = kind.normalize(text).into_owned();
                let result = self.extractor(kind).extract(&normalized);
                debug!(
                    "{}: {} fields recognized as {}",
                    file_name,
                    result.found_count(),
                    kind
                );
                (normalized, Some(result))
            }
            None => (text.to_string(), None),
        };

        ServiceResponse {
            file_name: file_name.to_string(),
            extracted_text: self.config.output.include_text.then_some(text),
            structured_data,
            document,
            backend: None,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn extractor(&self, kind: DocumentKind) -> Box<dyn DocumentExtractor + Send + Sync> {
        match kind {
            DocumentKind::Vehicle => Box::new(self.config.extraction.vehicle_extractor()),
            _ => kind.extractor(),
        }
    }
}
