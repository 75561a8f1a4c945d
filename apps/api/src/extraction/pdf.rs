use tracing::debug;

use crate::extraction::{guarded, ParseError, TextExtractor};
use crate::models::DocumentFormat;

/// Page-oriented extractor using `pdf-extract`.
///
/// Page texts are concatenated in page order with no separator; pages with
/// no text layer contribute nothing. `pdf-extract` itself starts each page's
/// text with `"\n\n"`, so page boundaries still read as blank lines.
/// `pdf-extract` can panic on malformed fonts, so decoding runs under `guarded`.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError> {
        let pages = guarded(self.format(), || {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        })?;

        let page_count = pages.len();
        let text: String = pages.into_iter().filter(|page| !page.trim().is_empty()).collect();

        debug!("PDF extracted {} chars from {page_count} pages", text.len());
        Ok(text)
    }
}
