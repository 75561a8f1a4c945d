use docx_rs::{DocumentChild, Paragraph, ParagraphChild, Run, RunChild};
use tracing::debug;

use crate::extraction::{guarded, ParseError, TextExtractor};
use crate::models::DocumentFormat;

/// Flow-document extractor built on `docx-rs`.
///
/// Only top-level body paragraphs contribute, one line each, in document
/// order. Empty paragraphs still produce their (empty) line.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError> {
        let docx = guarded(self.format(), || docx_rs::read_docx(bytes))?;

        let lines: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .collect();

        debug!("DOCX body has {} paragraphs", lines.len());
        Ok(lines.join("\n"))
    }
}

/// Visible text of a paragraph: run text, tabs as `\t`, breaks as `\n`,
/// hyperlinked runs included.
pub(crate) fn paragraph_text(para: &Paragraph) -> String {
    let mut out = String::new();
    for child in &para.children {
        push_child_text(child, &mut out);
    }
    out
}

fn push_child_text(child: &ParagraphChild, out: &mut String) {
    match child {
        ParagraphChild::Run(run) => push_run_text(run, out),
        ParagraphChild::Hyperlink(link) => {
            for inner in &link.children {
                push_child_text(inner, out);
            }
        }
        _ => {}
    }
}

fn push_run_text(run: &Run, out: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(text) => out.push_str(&text.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}
