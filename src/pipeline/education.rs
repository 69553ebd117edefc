//! Education extractor.

use super::section::Section;
use super::skills::FIELD_JOINER;

/// Lines under the `EDUCATION` header, joined with `" | "`.
///
/// `None` when the section is missing or has no non-blank line.
pub fn extract_education(text: &str) -> Option<String> {
    let block = Section::Education.extract(text)?;
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(FIELD_JOINER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_education_joins_lines() {
        let text = "EDUCATION\n  BSc Computer Science  \n\nMIT 2015\nSKILLS\nRust";
        assert_eq!(
            extract_education(text).as_deref(),
            Some("BSc Computer Science | MIT 2015")
        );
    }

    #[test]
    fn test_education_missing_section_is_none() {
        assert_eq!(extract_education("Jane Doe\nSKILLS\nRust"), None);
    }

    #[test]
    fn test_education_empty_section_is_none() {
        assert_eq!(extract_education("EDUCATION\n\nCERTIFICATES\nAWS"), None);
    }
}
