// Report Renderer: turns a ParsedResume into a .docx buffer.
// Preferred path fills a placeholder template; otherwise a plain document is
// synthesised. Once text extraction succeeded, callers always get a document.

pub mod fallback;
pub mod renderer;
pub mod substitute;
pub mod template;

use std::io::Cursor;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use docx_rs::Docx;
use serde::Serialize;
use thiserror::Error;

use crate::models::ParsedResume;

pub use renderer::ReportRenderer;
pub use template::TemplateLocator;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Shown for any absent scalar field or empty education list.
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_SKILLS: &str = "no common skills detected";
pub const BULLET: &str = "• ";

#[derive(Debug, Error)]
pub enum TemplateError {
    /// Not an error for the caller: the renderer falls back to a plain document.
    #[error("Template missing or empty: {}", .0.display())]
    MissingOrEmpty(PathBuf),

    #[error("Failed to load template {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write report document: {0}")]
    Pack(String),
}

/// Which rung of the render ladder produced the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum ReportOutcome {
    Templated { template: PathBuf },
    Fallback { reason: String },
    Emergency { reason: String },
}

impl ReportOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ReportOutcome::Templated { .. } => "templated",
            ReportOutcome::Fallback { .. } => "fallback",
            ReportOutcome::Emergency { .. } => "emergency",
        }
    }
}

/// A finished report. Owned by the request that produced it.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub outcome: ReportOutcome,
    pub filename: String,
}

/// Display strings for each placeholder, with the absent-value sentinels applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportValues {
    pub email: String,
    pub phone: String,
    pub skills: String,
    pub education: Vec<String>,
}

impl ReportValues {
    pub fn from_resume(resume: &ParsedResume) -> Self {
        let skills = if resume.skills.is_empty() {
            NO_SKILLS.to_string()
        } else {
            resume.skills.join(", ")
        };

        Self {
            email: resume.email.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            phone: resume.phone.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            skills,
            education: resume.education.clone(),
        }
    }

    /// Bulleted snippets, one per line, or `N/A`.
    pub fn education_text(&self) -> String {
        if self.education.is_empty() {
            return NOT_AVAILABLE.to_string();
        }
        self.education
            .iter()
            .map(|snippet| format!("{BULLET}{snippet}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Value for a placeholder name (`email`, `phone`, `skills`, `education`).
    pub fn placeholder(&self, name: &str) -> Option<String> {
        match name {
            "email" => Some(self.email.clone()),
            "phone" => Some(self.phone.clone()),
            "skills" => Some(self.skills.clone()),
            "education" => Some(self.education_text()),
            _ => None,
        }
    }
}

/// `resume_analysis_YYYYmmdd_HHMMSS.docx`
pub fn report_filename(at: DateTime<Local>) -> String {
    at.format("resume_analysis_%Y%m%d_%H%M%S.docx").to_string()
}

pub(crate) fn pack(docx: Docx) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| RenderError::Pack(e.to_string()))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::TimeZone;
    use docx_rs::{DocumentChild, TableCellContent, TableChild, TableRowChild};

    use super::*;
    use crate::extraction::docx::paragraph_text;

    /// Every paragraph of a packed document, body first, then table cells.
    pub(crate) fn document_lines(bytes: &[u8]) -> Vec<String> {
        let docx = docx_rs::read_docx(bytes).unwrap();
        let mut body = Vec::new();
        let mut cells = Vec::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(para) => body.push(paragraph_text(para)),
                DocumentChild::Table(table) => {
                    for row in &table.rows {
                        let TableChild::TableRow(row) = row;
                        for cell in &row.cells {
                            let TableRowChild::TableCell(cell) = cell;
                            for content in &cell.children {
                                if let TableCellContent::Paragraph(para) = content {
                                    cells.push(paragraph_text(para));
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        body.extend(cells);
        body
    }

    fn resume(email: Option<&str>, skills: &[&str], education: &[&str]) -> ParsedResume {
        ParsedResume {
            email: email.map(String::from),
            phone: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            education: education.iter().map(|s| s.to_string()).collect(),
            raw_text: "text".to_string(),
        }
    }

    #[test]
    fn test_values_apply_sentinels() {
        let values = ReportValues::from_resume(&resume(None, &[], &[]));
        assert_eq!(values.email, "N/A");
        assert_eq!(values.phone, "N/A");
        assert_eq!(values.skills, "no common skills detected");
        assert_eq!(values.education_text(), "N/A");
    }

    #[test]
    fn test_values_join_skills_and_bullet_education() {
        let values = ReportValues::from_resume(&resume(
            Some("x@y.com"),
            &["python", "sql"],
            &["B.S. in CS", "MBA, 2019"],
        ));
        assert_eq!(values.email, "x@y.com");
        assert_eq!(values.skills, "python, sql");
        assert_eq!(values.education_text(), "• B.S. in CS\n• MBA, 2019");
    }

    #[test]
    fn test_unknown_placeholder_has_no_value() {
        let values = ReportValues::from_resume(&resume(None, &[], &[]));
        assert_eq!(values.placeholder("name"), None);
        assert_eq!(values.placeholder("email").as_deref(), Some("N/A"));
    }

    #[test]
    fn test_report_filename_embeds_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(report_filename(at), "resume_analysis_20240309_140507.docx");
    }

    #[test]
    fn test_outcome_serializes_with_path_tag() {
        let outcome = ReportOutcome::Fallback {
            reason: "no template".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["path"], "fallback");
        assert_eq!(json["reason"], "no template");
        assert_eq!(outcome.label(), "fallback");
    }
}
