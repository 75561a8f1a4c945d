use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Upload formats the text extractors understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Txt,
    Docx,
    Pdf,
}

impl DocumentFormat {
    /// Case-insensitive lookup; anything outside `{txt, docx, pdf}` is `None`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim().to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Txt),
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Format named by the text after the last `.`; no dot means unsupported.
    pub fn from_filename(filename: &str) -> Option<Self> {
        file_extension(filename)
            .as_deref()
            .and_then(Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-cased text after the last `.`, or `None` when the name has no dot.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// An uploaded résumé: the raw bytes plus the filename the client declared.
/// Scoped to a single parse call.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub filename: String,
    pub bytes: Bytes,
}

impl RawDocument {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn extension(&self) -> Option<String> {
        file_extension(&self.filename)
    }

    pub fn format(&self) -> Option<DocumentFormat> {
        DocumentFormat::from_filename(&self.filename)
    }
}

/// Structured facts pulled out of one résumé.
///
/// Every field except `raw_text` is independently optional: a missing email
/// never prevents skills or education from being reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Unique, lower-cased, sorted by name.
    pub skills: Vec<String>,
    /// Context snippets in match order; overlapping windows are kept.
    pub education: Vec<String>,
    pub raw_text: String,
}
