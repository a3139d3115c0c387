//! Error types for the docbr-core library.

use thiserror::Error;

/// Main error type for the docbr library.
#[derive(Error, Debug)]
pub enum DocbrError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Request handling error.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the text sources.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors surfaced at the transport boundary.
///
/// Every variant maps to a status code and a textual detail, see
/// [`crate::service::ErrorResponse`].
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The uploaded file name does not carry the expected extension.
    #[error("Only {label} files are allowed")]
    InvalidFileType { label: String },

    /// The text source or a later stage failed.
    #[error("Error processing PDF: {detail}")]
    Processing { detail: String },
}

impl ServiceError {
    /// HTTP-style status code for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::InvalidFileType { .. } => 400,
            ServiceError::Processing { .. } => 500,
        }
    }
}

impl From<PdfError> for ServiceError {
    fn from(err: PdfError) -> Self {
        ServiceError::Processing {
            detail: err.to_string(),
        }
    }
}

/// Errors related to configuration and user-supplied names.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for [`crate::DocbrConfig`].
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Unknown text backend name.
    #[error("unknown text backend: {0} (expected fast, layout or precise)")]
    UnknownBackend(String),

    /// Unknown document type name.
    #[error("unknown document type: {0} (expected vehicle, medical or cpf)")]
    UnknownDocument(String),
}

/// Result type for the docbr library.
pub type Result<T> = std::result::Result<T, DocbrError>;
