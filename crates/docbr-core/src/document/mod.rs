//! Field recognition for Brazilian documents.

mod cpf;
mod medical;
pub mod patterns;
pub mod table;
mod value;
mod vehicle;

pub use cpf::CpfExtractor;
pub use medical::MedicalCertificateExtractor;
pub use table::{Combine, FieldPattern, MissingPolicy, PatternTable};
pub use value::{ExtractionResult, FieldValue};
pub use vehicle::VehicleExtractor;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Trait for document field extractors.
///
/// Extraction is a pure function of the text: missing fields are part of
/// the result, never an error.
pub trait DocumentExtractor {
    /// Document type handled by this extractor.
    fn kind(&self) -> DocumentKind;

    /// Every key the extractor may emit.
    fn field_keys(&self) -> &'static [&'static str];

    /// Extract fields from document text.
    fn extract(&self, text: &str) -> ExtractionResult;
}

/// Supported document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Vehicle registration and licensing document (CRLV).
    #[serde(rename = "vehicle")]
    Vehicle,
    /// Medical certificate (atestado médico).
    #[serde(rename = "medical")]
    MedicalCertificate,
    /// CPF registration document.
    #[serde(rename = "cpf")]
    Cpf,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::Vehicle,
        DocumentKind::MedicalCertificate,
        DocumentKind::Cpf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Vehicle => "vehicle",
            DocumentKind::MedicalCertificate => "medical",
            DocumentKind::Cpf => "cpf",
        }
    }

    /// Get the default extractor for this document type.
    pub fn extractor(&self) -> Box<dyn DocumentExtractor + Send + Sync> {
        match self {
            DocumentKind::Vehicle => Box::new(VehicleExtractor::new()),
            DocumentKind::MedicalCertificate => Box::new(MedicalCertificateExtractor::new()),
            DocumentKind::Cpf => Box::new(CpfExtractor::new()),
        }
    }

    /// Whether text is lower-cased before it reaches the extractor.
    pub fn requires_lowercase(&self) -> bool {
        match self {
            DocumentKind::Vehicle | DocumentKind::Cpf => true,
            DocumentKind::MedicalCertificate => false,
        }
    }

    /// Apply the case normalization expected by this document's extractor.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.requires_lowercase() {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vehicle" | "crlv" => Ok(DocumentKind::Vehicle),
            "medical" | "medical-certificate" | "atestado" => Ok(DocumentKind::MedicalCertificate),
            "cpf" => Ok(DocumentKind::Cpf),
            _ => Err(ConfigError::UnknownDocument(s.to_string())),
        }
    }
}

/// Normalize `text` for `kind` and run its default extractor.
pub fn extract_document(kind: DocumentKind, text: &str) -> ExtractionResult {
    let text = kind.normalize(text);
    kind.extractor().extract(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("vehicle".parse::<DocumentKind>().unwrap(), DocumentKind::Vehicle);
        assert_eq!("CRLV".parse::<DocumentKind>().unwrap(), DocumentKind::Vehicle);
        assert_eq!(
            "medical".parse::<DocumentKind>().unwrap(),
            DocumentKind::MedicalCertificate
        );
        assert_eq!("cpf".parse::<DocumentKind>().unwrap(), DocumentKind::Cpf);
        assert!("passport".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn test_kind_round_trips_through_display() {
        for kind in DocumentKind::ALL {
            assert_eq!(kind.to_string().parse::<DocumentKind>().unwrap(), kind);
            assert_eq!(kind.extractor().kind(), kind);
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(DocumentKind::Vehicle.normalize("CPF / CNPJ"), "cpf / cnpj");
        assert_eq!(DocumentKind::Cpf.normalize("NOME"), "nome");
        assert!(matches!(
            DocumentKind::MedicalCertificate.normalize("CRM"),
            Cow::Borrowed("CRM")
        ));
    }

    #[test]
    fn test_extract_document_lowercases_vehicle_text() {
        let result = extract_document(DocumentKind::Vehicle, "CPF / CNPJ\n123.456.789-01");
        assert_eq!(result.text("cpf"), Some("123.456.789-01"));
    }

    #[test]
    fn test_outputs_stay_within_declared_keys() {
        let text = "Nome\nANA\nCPF / CNPJ\n123.456.789-01\nMARCA / MODELO / VERSÃO\nVW/GOL\n\
                    CRM-PI 123\nDr. Paulo\nCRM-PI 1234\nCID-10: A09\n";
        for kind in DocumentKind::ALL {
            let extractor = kind.extractor();
            let result = extract_document(kind, text);
            for key in result.keys() {
                assert!(
                    extractor.field_keys().contains(&key),
                    "{} emitted undeclared key {}",
                    kind,
                    key
                );
            }
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "Nome\nANA\nNascimento\n01/01/2000\n";
        for kind in DocumentKind::ALL {
            assert_eq!(extract_document(kind, text), extract_document(kind, text));
        }
    }
}
