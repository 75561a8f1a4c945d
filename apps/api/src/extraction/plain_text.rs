use crate::extraction::{ParseError, TextExtractor};
use crate::models::DocumentFormat;

/// Strict UTF-8 decoding. No lossy fallback.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Txt
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError> {
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| ParseError::read(self.format(), format!("invalid UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_utf8() {
        let text = PlainTextExtractor
            .extract("Zoë Müller\nzoe@example.com".as_bytes())
            .unwrap();
        assert_eq!(text, "Zoë Müller\nzoe@example.com");
    }

    #[test]
    fn test_invalid_utf8_is_read_failure() {
        let result = PlainTextExtractor.extract(&[0x66, 0x6f, 0xff, 0xfe]);
        assert!(matches!(result, Err(ParseError::ReadFailure { .. })));
    }
}
