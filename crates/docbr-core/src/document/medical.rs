//! Medical certificate (atestado médico) extraction.

use tracing::debug;

use super::patterns::MEDICAL_TABLE;
use super::value::ExtractionResult;
use super::{DocumentExtractor, DocumentKind};

const FIELD_KEYS: &[&str] = &[
    "patient_name",
    "cpf",
    "doctor_name",
    "crm",
    "cid_10",
    "issued_at",
];

/// Medical certificate extractor.
///
/// Matches case-insensitively on the raw text. Missing fields are omitted;
/// the CRM code is reported as `STATE-NUMBER`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedicalCertificateExtractor;

impl MedicalCertificateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExtractor for MedicalCertificateExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::MedicalCertificate
    }

    fn field_keys(&self) -> &'static [&'static str] {
        FIELD_KEYS
    }

    fn extract(&self, text: &str) -> ExtractionResult {
        let result = MEDICAL_TABLE.apply(text);
        debug!("Extracted {} medical certificate fields", result.len());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ATESTADO: &str = "ATESTADO MÉDICO\n\
        Atesto, para os devidos fins, que MARIA JOSÉ PEREIRA (CPF: 123.456.789-09) \
        esteve sob meus cuidados nesta data.\n\
        CID-10: J11\n\
        Teresina, 12/03/2024 14:30:00\n\
        CRM-PI 123\n\
        Dr. Carlos Alberto Lima\n\
        CRM-PI 4567\n";

    #[test]
    fn test_extract_certificate() {
        let result = MedicalCertificateExtractor::new().extract(ATESTADO);

        assert_eq!(result.text("patient_name"), Some("MARIA JOSÉ PEREIRA"));
        assert_eq!(result.text("cpf"), Some("123.456.789-09"));
        assert_eq!(result.text("doctor_name"), Some("Dr. Carlos Alberto Lima"));
        assert_eq!(result.text("crm"), Some("PI-4567"));
        assert_eq!(result.text("cid_10"), Some("J11"));

        let issued = result.get("issued_at").unwrap();
        assert_eq!(issued.part("date"), Some("12/03/2024"));
        assert_eq!(issued.part("time"), Some("14:30:00"));
    }

    #[test]
    fn test_case_insensitive() {
        let lower = MedicalCertificateExtractor::new().extract(&ATESTADO.to_lowercase());
        assert_eq!(lower.text("crm"), Some("pi-4567"));
        assert_eq!(lower.text("cid_10"), Some("j11"));
    }

    #[test]
    fn test_doctor_name_is_trimmed() {
        let text = "crm - sp 123\n   Dra. Ana Costa   \ncrm - sp 9876\n";
        let result = MedicalCertificateExtractor::new().extract(text);
        assert_eq!(result.text("doctor_name"), Some("Dra. Ana Costa"));
        assert_eq!(result.text("crm"), Some("sp-9876"));
    }

    #[test]
    fn test_missing_fields_are_omitted() {
        let result = MedicalCertificateExtractor::new().extract("CID-10: Z00\n");
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["cid_10"]);
    }
}
