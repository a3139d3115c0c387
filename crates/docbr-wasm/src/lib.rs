//! WASM bindings for Brazilian document field recognition.
//!
//! Text extraction from PDFs is left to the host (e.g. pdf.js); these
//! bindings take the extracted text and return the recognized fields.

use std::str::FromStr;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use docbr_core::{DocumentExtractor, DocumentKind, ExtractionResult, VehicleExtractor};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Names of the supported document types.
#[wasm_bindgen]
pub fn document_types() -> js_sys::Array {
    DocumentKind::ALL
        .iter()
        .map(|kind| JsValue::from_str(kind.as_str()))
        .collect()
}

/// Recognize the fields of `document` ("vehicle", "medical" or "cpf") in
/// already extracted text.
///
/// Case normalization for the document type is applied here.
#[wasm_bindgen]
pub fn extract_fields(document: &str, text: &str) -> Result<JsValue, JsValue> {
    let kind = parse_kind(document)?;
    to_js(&docbr_core::extract_document(kind, text))
}

/// Text as the extractor for `document` sees it.
#[wasm_bindgen]
pub fn normalize_for(document: &str, text: &str) -> Result<String, JsValue> {
    let kind = parse_kind(document)?;
    Ok(kind.normalize(text).into_owned())
}

fn parse_kind(document: &str) -> Result<DocumentKind, JsValue> {
    DocumentKind::from_str(document).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js(result: &ExtractionResult) -> Result<JsValue, JsValue> {
    // Absent fields come out as null rather than undefined
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    result
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Field recognizer bound to one document type.
#[wasm_bindgen]
pub struct FieldRecognizer {
    kind: DocumentKind,
    chassis_line_limit: Option<usize>,
}

#[wasm_bindgen]
impl FieldRecognizer {
    /// Create a recognizer for `document`.
    #[wasm_bindgen(constructor)]
    pub fn new(document: &str) -> Result<FieldRecognizer, JsValue> {
        Ok(Self {
            kind: parse_kind(document)?,
            chassis_line_limit: None,
        })
    }

    /// Document type name.
    #[wasm_bindgen(getter)]
    pub fn document(&self) -> String {
        self.kind.as_str().to_string()
    }

    /// Bound the vehicle chassis scan to `limit` lines after its label.
    #[wasm_bindgen]
    pub fn set_chassis_line_limit(&mut self, limit: Option<u32>) {
        self.chassis_line_limit = limit.map(|l| l as usize);
    }

    /// Keys this recognizer can produce.
    #[wasm_bindgen]
    pub fn field_keys(&self) -> js_sys::Array {
        self.extractor()
            .field_keys()
            .iter()
            .map(|key| JsValue::from_str(key))
            .collect()
    }

    /// Recognize fields in `text`.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let normalized = self.kind.normalize(text);
        let result = self.extractor().extract(&normalized);

        if result.is_empty() {
            web_sys::console::debug_1(&JsValue::from_str("docbr: no fields recognized"));
        }
        to_js(&result)
    }

    /// Recognize fields and return them with the normalized text.
    #[wasm_bindgen]
    pub fn extract_with_text(&self, text: &str) -> Result<JsValue, JsValue> {
        let normalized = self.kind.normalize(text);
        let result = self.extractor().extract(&normalized);

        #[derive(Serialize)]
        struct Output<'a> {
            document: DocumentKind,
            fields: ExtractionResult,
            found: usize,
            text: &'a str,
        }

        let output = Output {
            document: self.kind,
            found: result.found_count(),
            fields: result,
            text: &normalized,
        };

        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        output
            .serialize(&serializer)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn extractor(&self) -> Box<dyn DocumentExtractor + Send + Sync> {
        match self.kind {
            DocumentKind::Vehicle => Box::new(
                VehicleExtractor::new().with_chassis_line_limit(self.chassis_line_limit),
            ),
            kind => kind.extractor(),
        }
    }
}

/// Recognize fields and return them as a JSON string.
#[wasm_bindgen]
pub fn extract_fields_json(document: &str, text: &str) -> Result<String, JsValue> {
    let kind = parse_kind(document)?;
    serde_json::to_string(&docbr_core::extract_document(kind, text))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
