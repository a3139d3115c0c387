//! The three text source backends.

use tracing::{debug, trace};

use super::{PdfDocument, Result, TextSource};
use crate::error::PdfError;

/// lopdf page text joined with single newlines.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastSource;

impl TextSource for FastSource {
    fn name(&self) -> &'static str {
        "fast"
    }

    fn extract(&self, data: &[u8]) -> Result<String> {
        let document = PdfDocument::load(data)?;

        let pages = document
            .page_numbers()
            .into_iter()
            .map(|page| document.page_text(page))
            .collect::<Result<Vec<_>>>()?;

        let text = pages.join("\n");
        debug!("fast source extracted {} chars from {} pages", text.len(), pages.len());
        Ok(text.trim().to_string())
    }
}

/// pdf-extract text per page, each page followed by a blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutSource;

impl TextSource for LayoutSource {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn extract(&self, data: &[u8]) -> Result<String> {
        let document = PdfDocument::load(data)?;

        let pages = pdf_extract::extract_text_from_mem_by_pages(document.raw_data())
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let mut text = String::new();
        for (i, page) in pages.iter().enumerate() {
            trace!("page {}: {} chars", i + 1, page.len());
            text.push_str(page);
            text.push_str("\n\n");
        }

        debug!("layout source extracted {} chars from {} pages", text.len(), pages.len());
        Ok(text.trim().to_string())
    }
}

/// pdf-extract text of the whole document in one pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreciseSource;

impl TextSource for PreciseSource {
    fn name(&self) -> &'static str {
        "precise"
    }

    fn extract(&self, data: &[u8]) -> Result<String> {
        let document = PdfDocument::load(data)?;

        let text = pdf_extract::extract_text_from_mem(document.raw_data())
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        debug!("precise source extracted {} chars", text.len());
        Ok(text.trim().to_string())
    }
}
