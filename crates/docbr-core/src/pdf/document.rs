//! Loaded PDF document backed by lopdf.

use lopdf::Document;
use tracing::debug;

use super::Result;
use crate::error::PdfError;

/// A parsed PDF, decrypted when it only carries an empty user password.
pub struct PdfDocument {
    document: Document,
    raw_data: Vec<u8>,
}

impl PdfDocument {
    /// Parse a PDF from bytes.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut document =
            Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw_data = if document.is_encrypted() {
            if document.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Other backends re-read the bytes, so keep the decrypted copy
            let mut decrypted = Vec::new();
            document
                .save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(Self { document, raw_data })
    }

    /// Page numbers in document order (1-indexed).
    pub fn page_numbers(&self) -> Vec<u32> {
        self.document.get_pages().keys().copied().collect()
    }

    /// Text of a single page as reported by lopdf.
    pub fn page_text(&self, page: u32) -> Result<String> {
        self.document
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(format!("page {}: {}", page, e)))
    }

    /// Bytes of the (decrypted) document.
    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }
}
