//! Pattern tables for the supported Brazilian documents.
//!
//! Labels are matched exactly as printed on the documents, diacritics
//! included. The vehicle table is written against lower-cased text; the
//! medical certificate and CPF tables match case-insensitively.

use lazy_static::lazy_static;
use regex::Regex;

use super::table::{FieldPattern, MissingPolicy, PatternTable};

/// Composite "marca / modelo / versão" field, split after matching.
pub const VEHICLE_COMPOSITE_KEY: &str = "brand_model_version";

/// Chassis field key.
pub const VEHICLE_CHASSIS_KEY: &str = "chassis";

lazy_static! {
    // Vehicle registration (CRLV)
    pub static ref VEHICLE_TABLE: PatternTable = PatternTable::new("vehicle", vec![
        FieldPattern::new("renavam_code", Regex::new(
            r"código renavam\n(\d+)"
        ).unwrap()),
        FieldPattern::new("plate_year", Regex::new(
            r"placa exercício\n(\S+)\s(\d{4})"
        ).unwrap()).with_record("plate", "year"),
        FieldPattern::new("cpf", Regex::new(
            r"cpf / cnpj\n(\d{3}\.\d{3}\.\d{3}-\d{2})"
        ).unwrap()),
        FieldPattern::new("crv_number", Regex::new(
            r"número do crv\n(\d+)"
        ).unwrap()),
        FieldPattern::new("cla_security_code", Regex::new(
            r"código de segurança do cla cat local data\n(\d+)"
        ).unwrap()),
        FieldPattern::new("location", Regex::new(
            r"código de segurança do cla cat local data\n\d+\s+\*\*\*\s+(.+?)\s+\d{2}/\d{2}/\d{4}"
        ).unwrap()),
        FieldPattern::new("date", Regex::new(
            r"código de segurança do cla cat local data\n\d+\s+\*\*\*\s+.+?\s+(\d{2}/\d{2}/\d{4})"
        ).unwrap()),
        FieldPattern::new(VEHICLE_COMPOSITE_KEY, Regex::new(
            r"marca / modelo / versão\n(.+?)\n"
        ).unwrap()),
        FieldPattern::new("predominant_color", Regex::new(
            r"cor predominante\n(\S+)"
        ).unwrap()),
        FieldPattern::new("fuel", Regex::new(
            r"combustível\n(\S+)"
        ).unwrap()),
        FieldPattern::new("renavam", Regex::new(
            r"renavam\n(\d+)"
        ).unwrap()),
        FieldPattern::new(VEHICLE_CHASSIS_KEY, Regex::new(
            r"chassi\n(?:.*\n)*?.*?([a-zA-Z0-9]{17})"
        ).unwrap()),
        FieldPattern::new("issued_at", Regex::new(
            r"documento emitido por .+? em (\d{2}/\d{2}/\d{4}) às (\d{2}:\d{2}:\d{2})"
        ).unwrap()).with_record("date", "time"),
        FieldPattern::new("category", Regex::new(
            r"categoria\n(.+?)\n"
        ).unwrap()),
        FieldPattern::new("owner_name", Regex::new(
            r"nome\n(.+?)\n"
        ).unwrap()),
        FieldPattern::new("manufacture_year", Regex::new(
            r"ano fabricação\n(\d{4})"
        ).unwrap()),
        FieldPattern::new("model_year", Regex::new(
            r"ano modelo\n(\d{4})"
        ).unwrap()),
    ]);

    // Chassis label and code, used by the line-bounded chassis scan
    pub static ref CHASSIS_LABEL: Regex = Regex::new(r"chassi\n").unwrap();
    pub static ref CHASSIS_CODE: Regex = Regex::new(r"[a-zA-Z0-9]{17}").unwrap();

    // Medical certificate (atestado médico)
    pub static ref MEDICAL_TABLE: PatternTable = PatternTable::new("medical", vec![
        FieldPattern::new("patient_name", Regex::new(
            r"(?i)atesto, para os devidos fins, que\s+([\w\s]+)\s+\(cpf:"
        ).unwrap()),
        FieldPattern::new("cpf", Regex::new(
            r"(?i)cpf:\s*(\d{3}\.\d{3}\.\d{3}-\d{2})"
        ).unwrap()),
        // Name printed between the two CRM stamps
        FieldPattern::new("doctor_name", Regex::new(
            r"(?i)crm\s*-\s*[a-zA-Z]+\s*\d{3}\s*\n(.+?)\ncrm\s*-\s*[a-zA-Z]+\s*\d{4}"
        ).unwrap()),
        FieldPattern::new("crm", Regex::new(
            r"(?i)crm\s*-\s*([a-zA-Z]+)\s*(\d{4})"
        ).unwrap()),
        FieldPattern::new("cid_10", Regex::new(
            r"(?i)cid-10:\s*([a-zA-Z0-9]+)"
        ).unwrap()),
        FieldPattern::new("issued_at", Regex::new(
            r"(?i)teresina,\s*(\d{2}/\d{2}/\d{4})\s*(\d{2}:\d{2}:\d{2})"
        ).unwrap()).with_record("date", "time"),
    ]).with_trim(true);

    // CPF registration document
    pub static ref CPF_TABLE: PatternTable = PatternTable::new("cpf", vec![
        FieldPattern::new("cpf", Regex::new(
            r"(?i)\b\d{3}\.\d{3}\.\d{3}-\d{2}\b"
        ).unwrap()),
        FieldPattern::new("name", Regex::new(
            r"(?i)nome\s*\n*([\w\s]+?)\n"
        ).unwrap()),
        // Birth date
        FieldPattern::new("nascimento", Regex::new(
            r"(?i)nascimento\s*\n*(\d{2}/\d{2}/\d{4})"
        ).unwrap()),
    ])
    .with_missing(MissingPolicy::Null)
    .with_trim(true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::table::Combine;

    #[test]
    fn test_tables_compile() {
        assert_eq!(VEHICLE_TABLE.patterns().len(), 17);
        assert_eq!(MEDICAL_TABLE.patterns().len(), 6);
        assert_eq!(CPF_TABLE.patterns().len(), 3);
    }

    #[test]
    fn test_keys_unique_per_table() {
        for table in [&*VEHICLE_TABLE, &*MEDICAL_TABLE, &*CPF_TABLE] {
            let mut keys: Vec<_> = table.keys().collect();
            let total = keys.len();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), total, "duplicate key in {} table", table.name());
        }
    }

    #[test]
    fn test_combination_rules() {
        assert_eq!(
            VEHICLE_TABLE.pattern("plate_year").unwrap().combine(),
            Combine::Record("plate", "year")
        );
        assert_eq!(
            MEDICAL_TABLE.pattern("crm").unwrap().combine(),
            Combine::Joined("-")
        );
        assert_eq!(CPF_TABLE.pattern("cpf").unwrap().combine(), Combine::Whole);
    }
}
