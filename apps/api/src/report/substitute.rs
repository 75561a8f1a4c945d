//! Placeholder substitution over a loaded template.
//!
//! Tokens are the literal, case-sensitive `{{email}}`, `{{phone}}`,
//! `{{skills}}` and `{{education}}`. A paragraph containing any token has its
//! text runs replaced by a single run carrying the substituted text. Only the
//! first run's bold/italic/underline/size/font is carried over; per-run
//! styling inside a substituted paragraph is not preserved.

use std::borrow::Cow;
use std::sync::LazyLock;

use docx_rs::{
    BreakType, DocumentChild, Docx, Paragraph, ParagraphChild, Run, RunProperty, Table,
    TableCellContent, TableChild, TableRowChild,
};
use regex::{Captures, Regex};
use tracing::{debug, info};

use crate::extraction::docx::paragraph_text;
use crate::report::{pack, RenderError, ReportValues};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(email|phone|skills|education)\}\}").unwrap());

/// Replaces every token in one pass; substituted values are never re-scanned.
pub fn substitute_text<'a>(text: &'a str, values: &ReportValues) -> Cow<'a, str> {
    PLACEHOLDER_RE.replace_all(text, |caps: &Captures| {
        values.placeholder(&caps[1]).unwrap_or_default()
    })
}

pub fn contains_placeholder(text: &str) -> bool {
    PLACEHOLDER_RE.is_match(text)
}

/// Fills body paragraphs and every table cell paragraph, then packs the document.
pub fn fill_template(mut docx: Docx, values: &ReportValues) -> Result<Vec<u8>, RenderError> {
    let mut paragraphs = 0;
    let mut tables = 0;
    let mut substituted = 0;

    for child in docx.document.children.iter_mut() {
        match child {
            DocumentChild::Paragraph(para) => {
                paragraphs += 1;
                if substitute_paragraph(para, values) {
                    substituted += 1;
                }
            }
            DocumentChild::Table(table) => {
                tables += 1;
                substituted += substitute_table(table, values);
            }
            _ => {}
        }
    }

    info!(
        "Template has {paragraphs} paragraphs and {tables} tables; substituted {substituted} paragraphs"
    );
    pack(docx)
}

fn substitute_table(table: &mut Table, values: &ReportValues) -> usize {
    let mut substituted = 0;
    for (r_idx, row) in table.rows.iter_mut().enumerate() {
        let TableChild::TableRow(row) = row;
        for (c_idx, cell) in row.cells.iter_mut().enumerate() {
            let TableRowChild::TableCell(cell) = cell;
            for content in cell.children.iter_mut() {
                match content {
                    TableCellContent::Paragraph(para) => {
                        if substitute_paragraph(para, values) {
                            debug!("Substituted placeholder in table row {r_idx}, cell {c_idx}");
                            substituted += 1;
                        }
                    }
                    TableCellContent::Table(nested) => {
                        substituted += substitute_table(nested, values);
                    }
                    _ => {}
                }
            }
        }
    }
    substituted
}

/// Returns whether the paragraph contained a placeholder.
pub fn substitute_paragraph(para: &mut Paragraph, values: &ReportValues) -> bool {
    let original = paragraph_text(para);
    if !contains_placeholder(&original) {
        return false;
    }

    let replaced = substitute_text(&original, values);
    debug!("Paragraph '{original}' -> '{replaced}'");

    let style = first_run_style(para);
    let insert_at = para
        .children
        .iter()
        .position(is_text_child)
        .unwrap_or(para.children.len());

    para.children.retain(|child| !is_text_child(child));

    let run = styled_run(&replaced, style);
    para.children
        .insert(insert_at, ParagraphChild::Run(Box::new(run)));
    true
}

fn is_text_child(child: &ParagraphChild) -> bool {
    matches!(child, ParagraphChild::Run(_) | ParagraphChild::Hyperlink(_))
}

fn first_run_style(para: &Paragraph) -> Option<RunProperty> {
    para.children.iter().find_map(|child| match child {
        ParagraphChild::Run(run) => Some(carried_style(&run.run_property)),
        _ => None,
    })
}

/// The subset of run formatting carried onto replacement text.
fn carried_style(source: &RunProperty) -> RunProperty {
    let mut style = RunProperty::new();
    style.bold = source.bold.clone();
    style.bold_cs = source.bold_cs.clone();
    style.italic = source.italic.clone();
    style.italic_cs = source.italic_cs.clone();
    style.underline = source.underline.clone();
    style.sz = source.sz.clone();
    style.sz_cs = source.sz_cs.clone();
    style.fonts = source.fonts.clone();
    style
}

/// `\n` in the text becomes a line break and `\t` a tab inside the run.
/// Page and column breaks were flattened to `\n` when the paragraph text was
/// read, so they come back as line breaks.
fn styled_run(text: &str, style: Option<RunProperty>) -> Run {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        for (j, segment) in line.split('\t').enumerate() {
            if j > 0 {
                run = run.add_tab();
            }
            if !segment.is_empty() {
                run = run.add_text(segment);
            }
        }
    }
    if let Some(style) = style {
        run.run_property = style;
    }
    run
}
