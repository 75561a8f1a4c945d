//! Text extraction: normalises an uploaded document into one plain-text string.
//!
//! Dispatch is by lower-cased filename extension. Every failure, including a
//! panic inside a third-party parser, comes back as a typed `ParseError`.

pub mod docx;
pub mod pdf;
pub mod plain_text;

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{DocumentFormat, RawDocument};

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use plain_text::PlainTextExtractor;

#[derive(Debug, Error)]
pub enum ParseError {
    /// Extension outside `{txt, docx, pdf}`. Raised before any byte is read.
    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),

    /// The bytes could not be decoded, or decoded to no text at all.
    #[error("Could not read {format} file: {reason}")]
    ReadFailure {
        format: DocumentFormat,
        reason: String,
    },
}

impl ParseError {
    pub fn read(format: DocumentFormat, reason: impl Into<String>) -> Self {
        ParseError::ReadFailure {
            format,
            reason: reason.into(),
        }
    }
}

/// One implementation per supported format.
pub trait TextExtractor: Send + Sync {
    fn format(&self) -> DocumentFormat;

    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError>;
}

pub fn extractor_for(format: DocumentFormat) -> &'static dyn TextExtractor {
    match format {
        DocumentFormat::Txt => &PlainTextExtractor,
        DocumentFormat::Docx => &DocxExtractor,
        DocumentFormat::Pdf => &PdfExtractor,
    }
}

/// Resolves the format from the filename and extracts the text.
///
/// Yields `ReadFailure` for zero-length or whitespace-only text: absence of
/// text is never reported as an empty string.
pub fn extract(raw: &RawDocument) -> Result<String, ParseError> {
    let format = raw
        .format()
        .ok_or_else(|| ParseError::UnsupportedFormat(raw.extension().unwrap_or_default()))?;

    debug!(
        "Extracting {} bytes from '{}' as {format}",
        raw.bytes.len(),
        raw.filename
    );

    let text = extractor_for(format).extract(&raw.bytes)?;
    if text.trim().is_empty() {
        warn!("No text extracted from '{}'", raw.filename);
        return Err(ParseError::read(format, "document contains no text"));
    }

    Ok(text)
}

/// Runs a third-party decoder, converting both its error and any panic it
/// raises into a `ReadFailure`.
pub(crate) fn guarded<T, E, F>(format: DocumentFormat, decode: F) -> Result<T, ParseError>
where
    E: std::fmt::Display,
    F: FnOnce() -> Result<T, E>,
{
    match catch_unwind(AssertUnwindSafe(decode)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            warn!("{format} decode failed: {e}");
            Err(ParseError::read(format, e.to_string()))
        }
        Err(_) => {
            warn!("{format} decoder panicked on malformed input");
            Err(ParseError::read(format, "malformed document structure"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension_rejected_before_reading() {
        // Bytes are valid UTF-8; rejection must come from the extension alone.
        let raw = RawDocument::new("resume.rtf", b"plain words".to_vec());
        match extract(&raw) {
            Err(ParseError::UnsupportedFormat(ext)) => assert_eq!(ext, "rtf"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        let raw = RawDocument::new("resume", b"text".to_vec());
        assert!(matches!(
            extract(&raw),
            Err(ParseError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_empty_input_is_read_failure_for_every_format() {
        for name in ["cv.txt", "cv.docx", "cv.pdf", "CV.PDF"] {
            let raw = RawDocument::new(name, Vec::new());
            assert!(
                matches!(extract(&raw), Err(ParseError::ReadFailure { .. })),
                "expected ReadFailure for empty {name}"
            );
        }
    }

    #[test]
    fn test_whitespace_only_text_is_read_failure() {
        let raw = RawDocument::new("cv.txt", b" \n\t\n".to_vec());
        assert!(matches!(
            extract(&raw),
            Err(ParseError::ReadFailure {
                format: DocumentFormat::Txt,
                ..
            })
        ));
    }

    #[test]
    fn test_dispatch_uses_uppercase_extension() {
        let raw = RawDocument::new("CV.TXT", b"Jane Doe".to_vec());
        assert_eq!(extract(&raw).unwrap(), "Jane Doe");
    }

    #[test]
    fn test_extractor_for_matches_format() {
        for format in [DocumentFormat::Txt, DocumentFormat::Docx, DocumentFormat::Pdf] {
            assert_eq!(extractor_for(format).format(), format);
        }
    }

    #[test]
    fn test_guarded_converts_panic_into_read_failure() {
        let result: Result<(), ParseError> =
            guarded(DocumentFormat::Pdf, || -> Result<(), String> { panic!("boom") });
        assert!(matches!(
            result,
            Err(ParseError::ReadFailure {
                format: DocumentFormat::Pdf,
                ..
            })
        ));
    }

    #[test]
    fn test_error_messages_distinguish_failure_kinds() {
        let unsupported = ParseError::UnsupportedFormat("rtf".to_string()).to_string();
        let read = ParseError::read(DocumentFormat::Docx, "bad zip").to_string();
        assert!(unsupported.contains("Unsupported"));
        assert!(read.contains("Could not read docx"));
    }
}
