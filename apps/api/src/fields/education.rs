use std::sync::LazyLock;

use regex::Regex;

/// Characters of context kept on each side of a degree mention.
pub const CONTEXT_CHARS: usize = 50;

/// Degree indicators, scanned in this order: doctoral, master's, bachelor's,
/// associate's. Periods are matched literally. Two-letter associate
/// abbreviations need their first period ("A.A", "A.S.") since bare "as"/"aa"
/// are ordinary words under case-insensitive matching.
static DEGREE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:Ph\.?D\.?|Doctor of Philosophy|Doctorate)\b",
        r"(?i)\b(?:M\.?S\.?|MBA|Master of [A-Za-z]+|Master'?s Degree)\b",
        r"(?i)\b(?:B\.?S\.?|B\.?A\.?|Bachelor of [A-Za-z]+|Bachelor'?s Degree)\b",
        r"(?i)\b(?:Associate'?s Degree|Associate of [A-Za-z]+|A\.A\.?|A\.S\.?)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// One trimmed context snippet per degree match, ordered by pattern then by
/// position. Overlapping windows are not merged.
pub fn extract_education(text: &str) -> Vec<String> {
    DEGREE_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.find_iter(text))
        .map(|m| context_window(text, m.start(), m.end()).to_string())
        .collect()
}

/// `text[start..end]` widened by `CONTEXT_CHARS` characters on each side,
/// clamped to the text and trimmed.
fn context_window(text: &str, start: usize, end: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = text[end..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    text[from..to].trim()
}
