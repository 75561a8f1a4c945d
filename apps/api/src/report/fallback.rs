//! Synthesised documents for when no template can be used (fallback) and for
//! when filling a loaded template failed (emergency).

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};

use crate::report::{pack, RenderError, ReportValues, BULLET, NOT_AVAILABLE};

const TITLE_STYLE: &str = "Title";
const HEADING_STYLE: &str = "Heading1";
const BULLET_STYLE: &str = "ListBullet";

pub const FALLBACK_TITLE: &str = "Resume Analysis Report";
pub const EMERGENCY_TITLE: &str = "Resume Analysis - Error Recovery";

/// Title, contact information, skills, education; always in that order.
pub fn fallback_report(values: &ReportValues) -> Result<Vec<u8>, RenderError> {
    let mut docx = with_report_styles(Docx::new())
        .add_paragraph(styled(TITLE_STYLE, FALLBACK_TITLE))
        .add_paragraph(styled(HEADING_STYLE, "Contact Information"))
        .add_paragraph(plain(&format!("Email: {}", values.email)))
        .add_paragraph(plain(&format!("Phone: {}", values.phone)))
        .add_paragraph(styled(HEADING_STYLE, "Skills"))
        .add_paragraph(plain(&values.skills))
        .add_paragraph(styled(HEADING_STYLE, "Education"));

    if values.education.is_empty() {
        docx = docx.add_paragraph(plain(NOT_AVAILABLE));
    } else {
        for snippet in &values.education {
            docx = docx.add_paragraph(styled(BULLET_STYLE, &format!("{BULLET}{snippet}")));
        }
    }

    pack(docx)
}

/// Minimal document carrying the failure reason and the contact fields.
pub fn emergency_report(reason: &str, values: &ReportValues) -> Result<Vec<u8>, RenderError> {
    let docx = with_report_styles(Docx::new())
        .add_paragraph(styled(TITLE_STYLE, EMERGENCY_TITLE))
        .add_paragraph(plain(&format!("Error creating formatted report: {reason}")))
        .add_paragraph(plain(&format!("Email: {}", values.email)))
        .add_paragraph(plain(&format!("Phone: {}", values.phone)));

    pack(docx)
}

fn with_report_styles(docx: Docx) -> Docx {
    docx.add_style(
        Style::new(TITLE_STYLE, StyleType::Paragraph)
            .name("Title")
            .size(52)
            .bold(),
    )
    .add_style(
        Style::new(HEADING_STYLE, StyleType::Paragraph)
            .name("Heading 1")
            .size(32)
            .bold(),
    )
    .add_style(Style::new(BULLET_STYLE, StyleType::Paragraph).name("List Bullet"))
}

fn styled(style: &str, text: &str) -> Paragraph {
    Paragraph::new().style(style).add_run(Run::new().add_text(text))
}

fn plain(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}
