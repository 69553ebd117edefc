//! Work-experience extraction: split the `WORK EXPERIENCE` section into one
//! block per job and flatten each block into a single descriptive line.
//!
//! ## Block anchors
//!
//! A job entry is assumed to open with a "Title - Company" header: a line
//! that starts with a word character and has a spaced dash later on. Date
//! ranges have exactly the same shape (`June 2019 - current`), so a line
//! carrying a duration is always treated as the meta line of the current
//! block, never as a new header.
//!
//! ## Block layout
//!
//! ```text
//! Engineer - Acme                      ← title line
//! June 2019 - current | Austin, TX     ← meta line (duration, location)
//! Built things.                        ← description (any number of lines)
//! ```
//!
//! Flattened: `Engineer - Acme | June 2019 - current | Austin, TX | Built things.`

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::contact::RE_CITY_STATE;
use super::section::Section;
use super::skills::FIELD_JOINER;
use crate::output::WorkEntry;

static RE_BLOCK_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w.*\s-\s").unwrap());
static RE_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([A-Za-z]+\s+\d{4})\s*-\s*(current|[A-Za-z]+\s+\d{4})").unwrap()
});

/// Extract one [`WorkEntry`] per job block, in document order.
///
/// `fallback_location` (normally the document-level location) is used for
/// blocks whose meta line carries no `City, ST` pair. A missing section
/// gives an empty list.
pub fn extract_work_experience(text: &str, fallback_location: Option<&str>) -> Vec<WorkEntry> {
    let Some(section) = Section::WorkExperience.extract(text) else {
        return Vec::new();
    };

    let entries: Vec<WorkEntry> = split_blocks(&section)
        .iter()
        .filter_map(|block| format_block(block, fallback_location))
        .map(|text| WorkEntry { text })
        .collect();
    debug!("Work experience: {} entries", entries.len());
    entries
}

fn is_block_header(line: &str) -> bool {
    RE_BLOCK_HEADER.is_match(line) && !RE_DURATION.is_match(line)
}

/// Group section lines into blocks, opening a new block at every header line
/// except the first line of the section.
fn split_blocks(section: &str) -> Vec<Vec<&str>> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (i, line) in section.split('\n').enumerate() {
        if i > 0 && is_block_header(line) {
            blocks.push(std::mem::take(&mut current));
        }
        current.push(line);
    }
    blocks.push(current);
    blocks
}

fn format_block(block: &[&str], fallback_location: Option<&str>) -> Option<String> {
    let lines: Vec<&str> = block
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    let (title, rest) = lines.split_first()?;
    let meta = rest.first().copied().unwrap_or("");
    let description = rest.get(1..).unwrap_or(&[]);

    let duration = RE_DURATION
        .captures(meta)
        .map(|caps| format!("{} - {}", &caps[1], &caps[2]))
        .unwrap_or_default();
    let location = RE_CITY_STATE
        .find(meta)
        .map(|m| m.as_str())
        .or(fallback_location)
        .unwrap_or("");

    let mut parts: Vec<String> = vec![title.to_string()];
    if !duration.is_empty() || !location.is_empty() {
        let meta_part = format!("{duration}{FIELD_JOINER}{location}");
        parts.push(meta_part.trim_matches([' ', '|']).to_string());
    }
    if !description.is_empty() {
        parts.push(description.join(" "));
    }

    Some(
        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(FIELD_JOINER),
    )
}
