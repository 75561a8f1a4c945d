use std::sync::LazyLock;

use regex::Regex;

/// `local@domain.tld`; the final label is 2+ letters.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

/// Loose digit grouping: optional `+CC`, optional bare or parenthesised area
/// code, then a 3–5 and a 4–6 digit group. Separators: space, dot, hyphen or none.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+\d{1,3}[ .-]?)?(?:(?:\(\d{2,4}\)|\d{2,4})[ .-]?)?\d{3,5}[ .-]?\d{4,6}")
        .unwrap()
});

/// First email address in document order.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First phone-like digit run in document order. Deliberately permissive.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}
