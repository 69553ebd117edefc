//! Line segmentation: turn one document's text into an ordered list of lines.
//!
//! [`preprocess`] runs once per document before any extractor sees the
//! text. [`segment`] then produces the line view used by the name and
//! location heuristics; the remaining extractors work on the preprocessed
//! text directly.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_WS_BEFORE_NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\n").unwrap());

/// Collapse whitespace runs that end in a newline into that newline, then
/// trim the whole text.
///
/// This removes trailing spaces and blank lines in one substitution, since
/// `\s` also matches the newlines of the blank lines.
pub fn preprocess(text: &str) -> String {
    RE_WS_BEFORE_NEWLINE
        .replace_all(text, "\n")
        .trim()
        .to_string()
}

/// Split on `\n`, trim each line, drop empty lines. Order is preserved.
pub fn segment(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_trailing_whitespace_and_blank_lines() {
        assert_eq!(preprocess("Jane Doe   \n\n\n  \nEngineer\t\n"), "Jane Doe\nEngineer");
    }

    #[test]
    fn test_preprocess_keeps_leading_indent() {
        assert_eq!(preprocess("a\n   b"), "a\n   b");
    }

    #[test]
    fn test_segment_trims_and_drops_empty() {
        assert_eq!(
            segment("  Jane Doe \n\n\t\nAustin, TX  \r\n"),
            vec!["Jane Doe".to_string(), "Austin, TX".to_string()]
        );
    }

    #[test]
    fn test_segment_empty_text() {
        assert!(segment("").is_empty());
        assert!(segment("\n \n").is_empty());
    }
}
