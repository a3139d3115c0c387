//! CPF registration document extraction.

use tracing::debug;

use super::patterns::CPF_TABLE;
use super::value::ExtractionResult;
use super::{DocumentExtractor, DocumentKind};

const FIELD_KEYS: &[&str] = &["cpf", "name", "nascimento"];

/// CPF document extractor.
///
/// The CPF number may be printed several times on the same document; the
/// first occurrence is kept. Every key is always present, with
/// [`FieldValue::Absent`](super::FieldValue::Absent) when not found.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpfExtractor;

impl CpfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExtractor for CpfExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Cpf
    }

    fn field_keys(&self) -> &'static [&'static str] {
        FIELD_KEYS
    }

    fn extract(&self, text: &str) -> ExtractionResult {
        let result = CPF_TABLE.apply(text);
        debug!(
            "Extracted {}/{} CPF document fields",
            result.found_count(),
            FIELD_KEYS.len()
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FieldValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_document() {
        let text = "república federativa do brasil\n\
            cadastro de pessoas físicas\n\
            número de inscrição\n\
            123.456.789-09\n\
            nome\n\
            joão da silva\n\
            data de nascimento\n\
            01/02/1990\n\
            comprovante emitido para 123.456.789-09\n";

        let result = CpfExtractor::new().extract(text);

        assert_eq!(result.text("cpf"), Some("123.456.789-09"));
        assert_eq!(result.text("name"), Some("joão da silva"));
        assert_eq!(result.text("nascimento"), Some("01/02/1990"));
    }

    #[test]
    fn test_name_without_trailing_newline() {
        let result = CpfExtractor::new().extract("nome\nJOÃO DA SILVA\n");
        assert_eq!(result.text("name"), Some("JOÃO DA SILVA"));
    }

    #[test]
    fn test_first_cpf_wins() {
        let result = CpfExtractor::new().extract("111.222.333-44 then 555.666.777-88");
        assert_eq!(result.text("cpf"), Some("111.222.333-44"));
    }

    #[test]
    fn test_missing_nascimento_is_absent() {
        let result = CpfExtractor::new().extract("nome\nJOÃO DA SILVA\n");

        assert_eq!(result.get("nascimento"), Some(&FieldValue::Absent));
        assert_eq!(result.get("cpf"), Some(&FieldValue::Absent));
    }

    #[test]
    fn test_keys_always_exactly_declared() {
        for text in ["", "nome\nana\n", "random text 123.456.789-09"] {
            let result = CpfExtractor::new().extract(text);
            assert_eq!(result.keys().collect::<Vec<_>>(), vec!["cpf", "name", "nascimento"]);
        }
    }

    #[test]
    fn test_serializes_absent_as_null() {
        let result = CpfExtractor::new().extract("");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"cpf": null, "name": null, "nascimento": null})
        );
    }
}
