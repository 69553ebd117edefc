//! Skills extractor.
//!
//! A missing skills section produces an empty string rather than `None`,
//! unlike education and work history. Downstream consumers rely on that
//! difference, so it is kept.

use once_cell::sync::Lazy;
use regex::Regex;

use super::normalize::BULLET_GLYPHS;
use super::section::Section;

/// Separator placed between skills, education lines and work-entry parts.
pub const FIELD_JOINER: &str = " | ";

static RE_SKILL_DELIMITERS: Lazy<Regex> = Lazy::new(|| {
    let bullets: String = BULLET_GLYPHS.iter().collect();
    Regex::new(&format!(r"[,\n;{}]+", bullets)).unwrap()
});

/// Skills listed under the `SKILLS` header, joined with `" | "`.
///
/// Tokens are split on runs of commas, newlines, semicolons and bullet
/// glyphs. A missing or empty section gives `""`.
pub fn extract_skills(text: &str) -> String {
    let Some(block) = Section::Skills.extract(text) else {
        return String::new();
    };
    RE_SKILL_DELIMITERS
        .split(&block)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(FIELD_JOINER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_mixed_delimiters() {
        let text = "SKILLS\nPython, Go; Rust\u{2022}SQL\nWORK EXPERIENCE";
        assert_eq!(extract_skills(text), "Python | Go | Rust | SQL");
    }

    #[test]
    fn test_skills_delimiter_runs_collapse() {
        let text = "SKILLS\n\u{2022} Rust,,\n\n\u{00B7} Go ;\nEDUCATION\nBSc";
        assert_eq!(extract_skills(text), "Rust | Go");
    }

    #[test]
    fn test_skills_missing_section_is_empty_string() {
        assert_eq!(extract_skills("Jane Doe\nEngineer"), "");
    }

    #[test]
    fn test_skills_empty_section_is_empty_string() {
        assert_eq!(extract_skills("SKILLS\nEDUCATION\nBSc"), "");
    }

    #[test]
    fn test_skills_keeps_multi_word_tokens() {
        let text = "SKILLS\nMachine Learning, Distributed Systems";
        assert_eq!(extract_skills(text), "Machine Learning | Distributed Systems");
    }
}
