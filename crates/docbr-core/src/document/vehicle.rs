//! Vehicle registration (CRLV) extraction.

use tracing::{debug, trace};

use super::patterns::{
    CHASSIS_CODE, CHASSIS_LABEL, VEHICLE_CHASSIS_KEY, VEHICLE_COMPOSITE_KEY, VEHICLE_TABLE,
};
use super::value::{ExtractionResult, FieldValue};
use super::{DocumentExtractor, DocumentKind};

const FIELD_KEYS: &[&str] = &[
    "renavam_code",
    "plate_year",
    "cpf",
    "crv_number",
    "cla_security_code",
    "location",
    "date",
    "brand",
    "model",
    "version",
    "predominant_color",
    "fuel",
    "renavam",
    "chassis",
    "issued_at",
    "category",
    "owner_name",
    "manufacture_year",
    "model_year",
];

/// Vehicle document extractor.
///
/// Patterns are written in lower case, so callers pass lower-cased text
/// (see [`DocumentKind::normalize`]). Missing fields are omitted.
#[derive(Debug, Clone, Default)]
pub struct VehicleExtractor {
    chassis_line_limit: Option<usize>,
}

impl VehicleExtractor {
    /// Create a vehicle extractor with an unbounded chassis scan.
    pub fn new() -> Self {
        Self {
            chassis_line_limit: None,
        }
    }

    /// Limit how many lines after the "chassi" label are searched for the
    /// 17-character code.
    pub fn with_chassis_line_limit(mut self, limit: Option<usize>) -> Self {
        self.chassis_line_limit = limit;
        self
    }

    pub fn chassis_line_limit(&self) -> Option<usize> {
        self.chassis_line_limit
    }
}

impl DocumentExtractor for VehicleExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Vehicle
    }

    fn field_keys(&self) -> &'static [&'static str] {
        FIELD_KEYS
    }

    fn extract(&self, text: &str) -> ExtractionResult {
        let mut result = VEHICLE_TABLE.apply(text);

        if let Some(limit) = self.chassis_line_limit {
            match find_chassis_within(text, limit) {
                Some(chassis) => result.insert(VEHICLE_CHASSIS_KEY, FieldValue::text(chassis)),
                None => {
                    result.remove(VEHICLE_CHASSIS_KEY);
                }
            }
        }

        split_brand_model_version(&mut result);

        debug!("Extracted {} vehicle fields", result.len());
        result
    }
}

/// Replace the composite "marca / modelo / versão" value with `brand`,
/// `model` and `version`. Parts missing after the brand become absent.
fn split_brand_model_version(result: &mut ExtractionResult) {
    let Some(composite) = result.remove(VEHICLE_COMPOSITE_KEY) else {
        return;
    };
    let Some(composite) = composite.as_text() else {
        return;
    };

    let mut parts = composite.split('/').map(str::trim);
    let part = |p: Option<&str>| p.map(FieldValue::text).unwrap_or(FieldValue::Absent);

    trace!(composite, "splitting brand/model/version");
    result.insert("brand", part(parts.next()));
    result.insert("model", part(parts.next()));
    result.insert("version", part(parts.next()));
}

/// Find the first 17-character chassis code at most `limit` lines after a
/// "chassi" label (the label's own following line counts as line zero).
fn find_chassis_within(text: &str, limit: usize) -> Option<&str> {
    for label in CHASSIS_LABEL.find_iter(text) {
        let found = text[label.end()..]
            .split('\n')
            .take(limit.saturating_add(1))
            .find_map(|line| CHASSIS_CODE.find(line));

        if let Some(code) = found {
            return Some(code.as_str());
        }
    }
    None
}
