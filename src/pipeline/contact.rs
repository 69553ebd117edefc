//! Identity and contact heuristics: name, email, phone, location.
//!
//! Each extractor returns the first plausible match or `None`. None of them
//! validate what they find; an address like `a@b` is accepted as an email.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Number of leading lines scanned by the capitalised-name fallback.
const NAME_SCAN_LINES: usize = 5;

static RE_NAME_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^name\s*[:\-]\s*").unwrap());
static RE_NOT_A_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"@|http|www|\d").unwrap());
static RE_TWO_CAPITALISED_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][a-z]+\s+[A-Z][a-z]+)$").unwrap());

static RE_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.\-]+@[\w.\-]+").unwrap());
static RE_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap());

/// `City, ST`: one capitalised word, a comma, a two-letter uppercase code.
pub(crate) static RE_CITY_STATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+,\s+[A-Z]{2}\b").unwrap());

/// Find the candidate's name.
///
/// Three tiers, first hit wins:
/// 1. a `Name:` / `Name -` labelled line, label stripped (an empty value
///    falls through)
/// 2. the first line, if it has no `@`, `http`, `www` or digit
/// 3. the first of the top five lines that is exactly two capitalised words
pub fn extract_name(lines: &[String]) -> Option<String> {
    for line in lines {
        if let Some(m) = RE_NAME_LABEL.find(line) {
            let value = line[m.end()..].trim();
            if !value.is_empty() {
                debug!("Name from label line: {:?}", value);
                return Some(value.to_string());
            }
        }
    }

    if let Some(first) = lines.first() {
        if !RE_NOT_A_NAME.is_match(first) {
            debug!("Name from first line: {:?}", first);
            return Some(first.trim().to_string());
        }
    }

    lines
        .iter()
        .take(NAME_SCAN_LINES)
        .find_map(|line| RE_TWO_CAPITALISED_WORDS.captures(line.trim()))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First `local@domain` looking token in the unsegmented text.
pub fn extract_email(text: &str) -> Option<String> {
    RE_EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// First North-American style ten-digit number, with optional parentheses
/// around the area code and `-`, `.` or whitespace separators.
pub fn extract_phone(text: &str) -> Option<String> {
    RE_PHONE.find(text).map(|m| m.as_str().to_string())
}

/// First line anywhere in the document containing a `City, ST` pattern.
///
/// The whole trimmed line is returned, not just the matched pair.
pub fn extract_location(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .find(|line| RE_CITY_STATE.is_match(line))
        .map(|line| line.trim().to_string())
}
