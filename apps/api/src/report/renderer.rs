//! Render ladder: Templated → Fallback → Emergency.
//!
//! | probe result             | fill result      | outcome   |
//! |--------------------------|------------------|-----------|
//! | template found           | ok               | Templated |
//! | template found           | error or panic   | Emergency |
//! | missing / empty / broken | -                | Fallback  |
//!
//! Only a failure to write the synthesised fallback or emergency document
//! surfaces as `RenderError`.

use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::Local;
use docx_rs::Docx;
use tracing::{error, info, warn};

use crate::models::ParsedResume;
use crate::report::fallback::{emergency_report, fallback_report};
use crate::report::substitute::fill_template;
use crate::report::template::{CandidateStatus, TemplateLocator, TemplateProbe};
use crate::report::{report_filename, RenderError, RenderedReport, ReportOutcome, ReportValues};

#[derive(Debug, Clone)]
pub struct ReportRenderer {
    locator: TemplateLocator,
}

impl ReportRenderer {
    pub fn new(locator: TemplateLocator) -> Self {
        Self { locator }
    }

    pub fn template_candidates(&self) -> Vec<CandidateStatus> {
        self.locator.candidate_report()
    }

    pub fn render(&self, resume: &ParsedResume) -> Result<RenderedReport, RenderError> {
        self.render_with(resume, fill_template)
    }

    fn render_with<F>(&self, resume: &ParsedResume, fill: F) -> Result<RenderedReport, RenderError>
    where
        F: FnOnce(Docx, &ReportValues) -> Result<Vec<u8>, RenderError>,
    {
        let values = ReportValues::from_resume(resume);

        let (bytes, outcome) = match self.locator.probe() {
            TemplateProbe::Found { path, docx } => {
                info!("Processing template replacements");
                match catch_unwind(AssertUnwindSafe(|| fill(docx, &values))) {
                    Ok(Ok(bytes)) => (bytes, ReportOutcome::Templated { template: path }),
                    Ok(Err(e)) => emergency(e.to_string(), &values)?,
                    Err(_) => emergency("template processing panicked".to_string(), &values)?,
                }
            }
            TemplateProbe::Unavailable { reason } => {
                warn!("No template could be loaded, using basic document: {reason}");
                (fallback_report(&values)?, ReportOutcome::Fallback { reason })
            }
        };

        info!("Report rendered via {} path ({} bytes)", outcome.label(), bytes.len());
        Ok(RenderedReport {
            bytes,
            outcome,
            filename: report_filename(Local::now()),
        })
    }
}

fn emergency(
    reason: String,
    values: &ReportValues,
) -> Result<(Vec<u8>, ReportOutcome), RenderError> {
    error!("Report creation failed: {reason}");
    let bytes = emergency_report(&reason, values)?;
    Ok((bytes, ReportOutcome::Emergency { reason }))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use docx_rs::{Paragraph, Run};

    use super::*;
    use crate::extraction::docx::tests::pack;
    use crate::report::fallback::{EMERGENCY_TITLE, FALLBACK_TITLE};
    use crate::report::tests::document_lines;

    fn resume() -> ParsedResume {
        ParsedResume {
            email: Some("x@y.com".to_string()),
            phone: None,
            skills: vec![],
            education: vec![],
            raw_text: "x@y.com".to_string(),
        }
    }

    fn write_template(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("template.docx");
        let docx = Docx::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)));
        fs::write(&path, pack(docx)).unwrap();
        path
    }

    #[test]
    fn test_templated_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "{{email}}{{phone}}{{skills}}{{education}}");
        let renderer = ReportRenderer::new(TemplateLocator::new(vec![path.clone()]));

        let report = renderer.render(&resume()).unwrap();
        assert_eq!(report.outcome, ReportOutcome::Templated { template: path });
        assert_eq!(
            document_lines(&report.bytes),
            vec!["x@y.comN/Ano common skills detectedN/A"]
        );
        assert!(report.filename.starts_with("resume_analysis_"));
        assert!(report.filename.ends_with(".docx"));
    }

    #[test]
    fn test_fallback_when_no_template_exists() {
        let dir = tempfile::tempdir().unwrap();
        let renderer =
            ReportRenderer::new(TemplateLocator::new(vec![dir.path().join("template.docx")]));

        let report = renderer.render(&resume()).unwrap();
        assert!(matches!(report.outcome, ReportOutcome::Fallback { .. }));
        assert!(!report.bytes.is_empty());
        assert_eq!(document_lines(&report.bytes)[0], FALLBACK_TITLE);
    }

    #[test]
    fn test_fallback_when_template_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.docx");
        fs::write(&path, b"").unwrap();

        let report = ReportRenderer::new(TemplateLocator::new(vec![path]))
            .render(&resume())
            .unwrap();
        assert!(matches!(report.outcome, ReportOutcome::Fallback { .. }));
    }

    #[test]
    fn test_fallback_when_template_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.docx");
        fs::write(&path, b"not a docx").unwrap();

        let report = ReportRenderer::new(TemplateLocator::new(vec![path]))
            .render(&resume())
            .unwrap();
        assert!(matches!(report.outcome, ReportOutcome::Fallback { .. }));
    }

    #[test]
    fn test_emergency_when_fill_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "{{email}}");
        let renderer = ReportRenderer::new(TemplateLocator::new(vec![path]));

        let report = renderer
            .render_with(&resume(), |_, _| {
                Err(RenderError::Pack("bad run".to_string()))
            })
            .unwrap();

        match &report.outcome {
            ReportOutcome::Emergency { reason } => assert!(reason.contains("bad run")),
            other => panic!("expected emergency, got {other:?}"),
        }
        let lines = document_lines(&report.bytes);
        assert_eq!(lines[0], EMERGENCY_TITLE);
        assert!(lines.contains(&"Email: x@y.com".to_string()));
        assert!(lines.contains(&"Phone: N/A".to_string()));
    }

    #[test]
    fn test_emergency_when_fill_panics() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "{{email}}");
        let renderer = ReportRenderer::new(TemplateLocator::new(vec![path]));

        let report = renderer
            .render_with(&resume(), |_, _| panic!("unexpected element"))
            .unwrap();
        assert!(matches!(report.outcome, ReportOutcome::Emergency { .. }));
        assert!(!report.bytes.is_empty());
    }

    #[test]
    fn test_template_changes_seen_on_next_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "Email {{email}}");
        let renderer = ReportRenderer::new(TemplateLocator::new(vec![path]));

        let first = renderer.render(&resume()).unwrap();
        assert_eq!(document_lines(&first.bytes), vec!["Email x@y.com"]);

        write_template(dir.path(), "Contact {{email}}");
        let second = renderer.render(&resume()).unwrap();
        assert_eq!(document_lines(&second.bytes), vec!["Contact x@y.com"]);
    }
}
