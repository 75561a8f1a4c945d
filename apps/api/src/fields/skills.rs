//! Skill vocabulary matching.
//!
//! `SkillSet` is an immutable value: build it once (built-in vocabulary, a
//! custom list, or a vocabulary file) and share it behind an `Arc`. Parsing
//! only ever reads it.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use regex::Regex;

/// Built-in vocabulary. Multi-word entries match as whole phrases.
pub const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "html",
    "css",
    "sql",
    "nosql",
    "react",
    "angular",
    "vue",
    "node.js",
    "django",
    "flask",
    "express",
    "spring",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "git",
    "agile",
    "scrum",
    "jira",
    "jenkins",
    "ci/cd",
    "rest api",
    "graphql",
    "mongodb",
    "mysql",
    "postgresql",
    "oracle",
    "data analysis",
    "machine learning",
    "deep learning",
    "ai",
    "nltk",
    "pandas",
    "numpy",
    "tensorflow",
    "pytorch",
    "keras",
    "scikit-learn",
    "excel",
    "powerpoint",
    "word",
    "tableau",
    "power bi",
    "linux",
    "windows",
    "macos",
    "networking",
    "security",
];

#[derive(Debug, Clone)]
struct SkillPattern {
    name: String,
    pattern: Regex,
}

#[derive(Debug, Clone)]
pub struct SkillSet {
    /// Sorted by name, unique.
    skills: Vec<SkillPattern>,
}

impl SkillSet {
    /// Entries are trimmed and lower-cased; blanks and duplicates are dropped.
    pub fn new<I, S>(vocabulary: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: BTreeSet<String> = vocabulary
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let skills = names
            .into_iter()
            .map(|name| {
                let pattern = Regex::new(&word_bounded(&name))?;
                Ok(SkillPattern { name, pattern })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self { skills })
    }

    /// Loads a newline-separated vocabulary. `#` starts a comment line.
    /// A file with no entries is an error rather than a silent empty set.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skills file '{}'", path.display()))?;
        let skills = Self::new(parse_vocabulary(&contents))
            .with_context(|| format!("Invalid skill entry in '{}'", path.display()))?;
        if skills.is_empty() {
            bail!("Skills file '{}' has no entries", path.display());
        }
        Ok(skills)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Every vocabulary entry present in `text` at least once, as a whole
    /// word or phrase, case-insensitively. Sorted, no duplicates.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.skills
            .iter()
            .filter(|skill| skill.pattern.is_match(text))
            .map(|skill| skill.name.clone())
            .collect()
    }
}

impl Default for SkillSet {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS).expect("built-in skill vocabulary compiles")
    }
}

pub fn parse_vocabulary(contents: &str) -> Vec<&str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// `\b` is only meaningful next to a word character, so it is added on each
/// side only where the skill itself starts or ends with one (`c++`, `.net`).
fn word_bounded(skill: &str) -> String {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let lead = if is_word(skill.chars().next()) { r"\b" } else { "" };
    let trail = if is_word(skill.chars().last()) { r"\b" } else { "" };
    format!("(?i){lead}{}{trail}", regex::escape(skill))
}
