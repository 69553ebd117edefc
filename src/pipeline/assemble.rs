//! Record assembly: run every extractor over one document.

use tracing::debug;

use super::contact::{extract_email, extract_location, extract_name, extract_phone};
use super::education::extract_education;
use super::normalize::normalize;
use super::segment::{preprocess, segment};
use super::skills::extract_skills;
use super::work::extract_work_experience;
use crate::output::Record;

/// Extract a [`Record`] from one document's text.
///
/// The text is preprocessed and segmented once. Email, phone, skills,
/// education and work history read the preprocessed text; name and location
/// read the line list. The document-level location doubles as the fallback
/// location for work entries.
///
/// Never fails: fields that cannot be found are left empty.
///
/// # Example
/// ```rust
/// use edgequake_resume::parse_resume;
///
/// let record = parse_resume("Jane Doe\njane@example.com\nSKILLS\nRust, Go");
/// assert_eq!(record.name.as_deref(), Some("Jane Doe"));
/// assert_eq!(record.email.as_deref(), Some("jane@example.com"));
/// assert_eq!(record.skills, "Rust | Go");
/// ```
pub fn parse_resume(text: &str) -> Record {
    let text = preprocess(text);
    let lines = segment(&text);
    let location = extract_location(&lines);

    let record = Record {
        name: extract_name(&lines),
        email: extract_email(&text),
        phone: extract_phone(&text),
        skills: extract_skills(&text),
        education: extract_education(&text),
        work_experience: extract_work_experience(&text, location.as_deref()),
        location,
    };
    debug!(
        "Parsed record: {} lines, {}/7 fields, {} work entries",
        lines.len(),
        record.fields_found(),
        record.work_experience.len()
    );
    record
}

/// [`normalize`] the raw text, then [`parse_resume`] it.
pub fn parse_resume_normalized(raw: &str) -> Record {
    parse_resume(&normalize(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe   \n\
        jane.doe@example.com | (512) 555-0199\n\
        Austin, TX\n\
        \n\
        SKILLS\n\
        Rust, Go; Python\n\
        WORK EXPERIENCE\n\
        Engineer - Acme\n\
        June 2019 - current\n\
        Built things.\n\
        EDUCATION\n\
        BSc Computer Science\n\
        University of Texas\n";

    #[test]
    fn test_full_record() {
        let r = parse_resume(RESUME);
        assert_eq!(r.name.as_deref(), Some("Jane Doe"));
        assert_eq!(r.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(r.phone.as_deref(), Some("(512) 555-0199"));
        assert_eq!(r.location.as_deref(), Some("Austin, TX"));
        assert_eq!(r.skills, "Rust | Go | Python");
        assert_eq!(
            r.education.as_deref(),
            Some("BSc Computer Science | University of Texas")
        );
        assert_eq!(r.work_experience.len(), 1);
        // Meta line has no location: the document-level one is used.
        assert_eq!(
            r.work_experience[0].text,
            "Engineer - Acme | June 2019 - current | Austin, TX | Built things."
        );
        assert_eq!(r.fields_found(), 7);
    }

    #[test]
    fn test_empty_document() {
        let r = parse_resume("");
        assert_eq!(r, Record::default());
    }

    #[test]
    fn test_no_sections() {
        let r = parse_resume("Jane Doe\nSome prose about me.");
        assert_eq!(r.skills, "");
        assert_eq!(r.education, None);
        assert!(r.work_experience.is_empty());
    }

    #[test]
    fn test_garbage_does_not_panic() {
        let inputs = [
            "\u{0000}\u{FFFF}\u{1F600}",
            "SKILLS SKILLS SKILLS",
            "WORK EXPERIENCE\n - \n - \n",
            "@@@@ 000-000-0000 ((((",
            "EDUCATION",
        ];
        for input in inputs {
            let _ = parse_resume(input);
            let _ = parse_resume_normalized(input);
        }
    }

    #[test]
    fn test_normalized_variant_loses_comma_location() {
        // Known tradeoff: the normaliser strips the comma the location
        // pattern needs.
        let raw = "Jane Doe\nAustin, TX";
        assert_eq!(parse_resume(raw).location.as_deref(), Some("Austin, TX"));
        assert_eq!(parse_resume_normalized(raw).location, None);
    }

    #[test]
    fn test_normalized_variant_repairs_dashes() {
        let raw = "Jane Doe\nWORK EXPERIENCE\nEngineer \u{2014} Acme\nJune 2019\u{2013}current";
        let r = parse_resume_normalized(raw);
        assert_eq!(r.work_experience.len(), 1);
        assert_eq!(
            r.work_experience[0].text,
            "Engineer - Acme | June 2019 - current"
        );
    }
}
