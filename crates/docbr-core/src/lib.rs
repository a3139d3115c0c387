//! Core library for Brazilian document field recognition.
//!
//! This crate provides:
//! - PDF text sources (three interchangeable backends)
//! - Pattern-table field extraction for vehicle registrations (CRLV),
//!   medical certificates and CPF documents
//! - An extraction service that validates uploads and wraps results
//! - Configuration shared by the CLI and bindings

pub mod error;
pub mod models;
pub mod pdf;
pub mod document;
pub mod service;

pub use error::{ConfigError, DocbrError, PdfError, Result, ServiceError};
pub use models::config::DocbrConfig;
pub use document::{
    extract_document, CpfExtractor, DocumentExtractor, DocumentKind, ExtractionResult,
    FieldValue, MedicalCertificateExtractor, VehicleExtractor,
};
pub use pdf::{TextBackend, TextSource};
#[cfg(feature = "pdf")]
pub use pdf::PdfDocument;
pub use service::{DocumentService, ErrorResponse, ServiceResponse};
