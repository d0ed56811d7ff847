//! Cleanup applied to every person name before it is written out.

use regex::Regex;
use std::sync::OnceLock;

static DIGITS_PATTERN: OnceLock<Regex> = OnceLock::new();
static HONORIFICS_PATTERN: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn digits_pattern() -> &'static Regex {
    DIGITS_PATTERN.get_or_init(|| {
        Regex::new(r"\d+").expect("Static regex pattern is guaranteed to be valid")
    })
}

/// One or more leading titles from the closed set, each with an optional
/// period and mandatory trailing whitespace.
#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn honorifics_pattern() -> &'static Regex {
    HONORIFICS_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(?:(?:dr|prof|mr|ms|mrs|miss|pr)\.?\s+)+")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Remove digit characters (footnote markers glued to names) and trim.
#[must_use]
pub fn strip_digits(name: &str) -> String {
    digits_pattern().replace_all(name, "").trim().to_string()
}

/// Remove leading academic and courtesy titles and trim.
#[must_use]
pub fn strip_honorifics(name: &str) -> String {
    honorifics_pattern()
        .replace(name.trim_start(), "")
        .trim()
        .to_string()
}

/// Digits first, then titles: `"Dr.2 Jane Doe"` becomes `"Jane Doe"`.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    strip_honorifics(&strip_digits(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_digits() {
        assert_eq!(strip_digits("Jane2 Doe3"), "Jane Doe");
        assert_eq!(strip_digits(" 12 "), "");
        assert_eq!(strip_digits("No Digits"), "No Digits");
    }

    #[test]
    fn test_strip_honorifics() {
        assert_eq!(strip_honorifics("Dr. Jane Doe"), "Jane Doe");
        assert_eq!(strip_honorifics("prof John Smith"), "John Smith");
        assert_eq!(strip_honorifics("MRS. Ana Lopez"), "Ana Lopez");
        assert_eq!(strip_honorifics("Miss Jo March"), "Jo March");
        assert_eq!(strip_honorifics("Pr Marie Curie"), "Marie Curie");
        assert_eq!(strip_honorifics("Prof. Dr. Hans Meier"), "Hans Meier");
    }

    #[test]
    fn test_strip_honorifics_keeps_lookalike_names() {
        assert_eq!(strip_honorifics("Drew Carey"), "Drew Carey");
        assert_eq!(strip_honorifics("Prince Ali"), "Prince Ali");
        assert_eq!(strip_honorifics("Dr.Jane"), "Dr.Jane");
        assert_eq!(strip_honorifics("N/A"), "N/A");
    }

    #[test]
    fn test_normalize_applies_digits_then_titles() {
        assert_eq!(strip_digits("Dr.2 Jane Doe"), "Dr. Jane Doe");
        assert_eq!(normalize_name("Dr.2 Jane Doe"), "Jane Doe");
        assert_eq!(normalize_name("  Prof.1 Ana Lopez3 "), "Ana Lopez");
    }
}
