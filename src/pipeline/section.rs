//! Section extraction: the shared primitive behind the skills, education
//! and work-experience extractors.
//!
//! A section is the text between its header keyword and the first
//! following keyword from its stop-list, or the end of the document.
//! Matching is case-insensitive and the span is the shortest one that
//! reaches a stop keyword.
//!
//! The known headers live in [`Section`]. Every section's stop-list is
//! "every other known header", so two extractors can never disagree about
//! where a section ends.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// A resume section recognised by its header keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Skills,
    WorkExperience,
    Education,
    Certificates,
}

impl Section {
    /// All known sections, in declaration order.
    pub const ALL: [Section; 4] = [
        Section::Skills,
        Section::WorkExperience,
        Section::Education,
        Section::Certificates,
    ];

    /// Header keyword that opens this section.
    pub fn keyword(self) -> &'static str {
        match self {
            Section::Skills => "SKILLS",
            Section::WorkExperience => "WORK EXPERIENCE",
            Section::Education => "EDUCATION",
            Section::Certificates => "CERTIFICATES",
        }
    }

    /// Keywords that close this section: every other known header.
    pub fn stop_keywords(self) -> Vec<&'static str> {
        Self::ALL
            .iter()
            .filter(|&&s| s != self)
            .map(|s| s.keyword())
            .collect()
    }

    /// Extract this section's trimmed content from `text`.
    ///
    /// Returns `None` when the header keyword does not occur at all. A header
    /// with nothing after it yields `Some("")`.
    pub fn extract(self, text: &str) -> Option<String> {
        let idx = Self::ALL.iter().position(|&s| s == self)?;
        capture_section(&SECTION_PATTERNS[idx], text)
    }
}

static SECTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    Section::ALL
        .iter()
        .map(|s| section_pattern(s.keyword(), &s.stop_keywords()).unwrap())
        .collect()
});

/// Extract the span after `start` up to the first of `stops` (or end of text).
///
/// Keywords are matched literally and case-insensitively. Returns the trimmed
/// span, or `None` when `start` is not found.
pub fn extract_section(text: &str, start: &str, stops: &[&str]) -> Option<String> {
    match section_pattern(start, stops) {
        Ok(re) => capture_section(&re, text),
        Err(e) => {
            warn!("Section pattern for {:?} failed to compile: {}", start, e);
            None
        }
    }
}

fn section_pattern(start: &str, stops: &[&str]) -> Result<Regex, regex::Error> {
    let terminator = if stops.is_empty() {
        "$".to_string()
    } else {
        let alternatives: Vec<String> = stops.iter().map(|k| regex::escape(k)).collect();
        format!("{}|$", alternatives.join("|"))
    };
    Regex::new(&format!(
        r"(?i){}((?s:.)*?)(?:{})",
        regex::escape(start),
        terminator
    ))
}

fn capture_section(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_lists_are_mutually_consistent() {
        for section in Section::ALL {
            let stops = section.stop_keywords();
            assert_eq!(stops.len(), Section::ALL.len() - 1);
            assert!(!stops.contains(&section.keyword()));
        }
        assert_eq!(
            Section::Skills.stop_keywords(),
            vec!["WORK EXPERIENCE", "EDUCATION", "CERTIFICATES"]
        );
        assert_eq!(
            Section::Education.stop_keywords(),
            vec!["SKILLS", "WORK EXPERIENCE", "CERTIFICATES"]
        );
        assert_eq!(
            Section::WorkExperience.stop_keywords(),
            vec!["SKILLS", "EDUCATION", "CERTIFICATES"]
        );
    }

    #[test]
    fn test_extract_stops_at_first_stop_keyword() {
        let text = "SKILLS\nRust\nGo\nEDUCATION\nBSc\nWORK EXPERIENCE\nAcme";
        assert_eq!(Section::Skills.extract(text).as_deref(), Some("Rust\nGo"));
        assert_eq!(Section::Education.extract(text).as_deref(), Some("BSc"));
        assert_eq!(Section::WorkExperience.extract(text).as_deref(), Some("Acme"));
    }

    #[test]
    fn test_extract_runs_to_end_without_stop() {
        let text = "Intro\nEDUCATION\nBSc Computer Science\nMIT";
        assert_eq!(
            Section::Education.extract(text).as_deref(),
            Some("BSc Computer Science\nMIT")
        );
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        let text = "Skills: Rust\nEducation: BSc";
        assert_eq!(Section::Skills.extract(text).as_deref(), Some(": Rust"));
    }

    #[test]
    fn test_missing_header_is_none() {
        assert_eq!(Section::Certificates.extract("no headers here"), None);
    }

    #[test]
    fn test_header_at_end_is_empty() {
        assert_eq!(Section::Skills.extract("Jane\nSKILLS").as_deref(), Some(""));
    }

    #[test]
    fn test_keyword_inside_prose_also_matches() {
        // Known false positive: "soft skills" in a summary opens the section.
        let text = "Strong soft skills and teamwork\nEDUCATION\nBSc";
        assert_eq!(
            Section::Skills.extract(text).as_deref(),
            Some("and teamwork")
        );
    }

    #[test]
    fn test_extract_section_dynamic_keywords() {
        let text = "PROJECTS\nCompiler (C++)\nAWARDS\nNone";
        assert_eq!(
            extract_section(text, "PROJECTS", &["AWARDS"]).as_deref(),
            Some("Compiler (C++)")
        );
        assert_eq!(
            extract_section(text, "AWARDS", &[]).as_deref(),
            Some("None")
        );
    }

    #[test]
    fn test_extract_section_escapes_metacharacters() {
        let text = "C++ (advanced)\nrest";
        assert_eq!(extract_section(text, "C++", &["rest"]).as_deref(), Some("(advanced)"));
    }
}
