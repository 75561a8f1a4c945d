//! Parse orchestration: extension dispatch, text extraction, then every field
//! extractor against the same text.
//!
//! Extraction is all-or-nothing: without text, no field extractor runs.

use std::sync::Arc;

use tracing::info;

use crate::extraction::{extract, ParseError};
use crate::fields::{extract_education, extract_email, extract_phone, SkillSet};
use crate::models::{ParsedResume, RawDocument};

#[derive(Debug, Clone)]
pub struct ResumeParser {
    skills: Arc<SkillSet>,
}

impl ResumeParser {
    pub fn new(skills: Arc<SkillSet>) -> Self {
        Self { skills }
    }

    pub fn parse(&self, raw: &RawDocument) -> Result<ParsedResume, ParseError> {
        let text = extract(raw)?;
        let parsed = self.parse_text(text);

        info!(
            "Parsed '{}': email={}, phone={}, {} skills, {} education mentions",
            raw.filename,
            parsed.email.is_some(),
            parsed.phone.is_some(),
            parsed.skills.len(),
            parsed.education.len()
        );
        Ok(parsed)
    }

    /// Runs the field extractors over already-normalised text.
    pub fn parse_text(&self, text: String) -> ParsedResume {
        ParsedResume {
            email: extract_email(&text),
            phone: extract_phone(&text),
            skills: self.skills.extract(&text),
            education: extract_education(&text),
            raw_text: text,
        }
    }
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new(Arc::new(SkillSet::default()))
    }
}
