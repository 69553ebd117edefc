//! Text normalisation: deterministic cleanup of text pulled out of resume PDFs.
//!
//! PDF text extraction leaves a recognisable residue behind: bullet glyphs
//! glued to words, typographic dashes in date ranges, doubled line breaks,
//! stray punctuation from table cells, and a handful of byte sequences
//! (`c7`, `c2`, `b7`) that leak through when the upstream decoder mangles
//! UTF-8 middle dots. This module removes that residue with ten ordered
//! string/regex rules.
//!
//! ## Rule Order
//!
//! Rules run in a fixed order: glyph replacement before dash collapsing so
//! en/em dashes take part in the collapse, newline collapsing before
//! punctuation stripping, and non-ASCII removal after the artifact rule so
//! `c7` sequences split by a multibyte character are still caught on the
//! next pass. Deleting characters can expose new matches for earlier rules
//! (`-c7-` becomes `--`), so the ordered pass repeats until the text stops
//! changing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Glyphs removed by rule 2. Also used as split delimiters by the skills
/// extractor.
pub(crate) const BULLET_GLYPHS: [char; 3] = ['\u{00B7}', '\u{2022}', '\u{2219}'];

/// Dash-like glyphs rewritten to ASCII `-` by rule 3.
const DASH_GLYPHS: [char; 5] = ['\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2212}'];

/// Normalise raw extracted resume text.
///
/// Total: never fails, never panics. Applying it twice gives the same result
/// as applying it once.
///
/// Rules (applied in order):
/// 1. Drop undecodable characters (U+FFFD left behind by lossy decoding)
/// 2. Remove bullet glyphs
/// 3. Rewrite dash-like glyphs to ASCII `-`
/// 4. Collapse dash runs and space every dash as ` - `
/// 5. Collapse line-break variants to a single `\n`
/// 6. Strip `,` `_` `&`
/// 7. Strip the `c7` / `c2` / `b7` encoding artifacts
/// 8. Drop remaining non-ASCII characters
/// 9. Drop decorative separator lines (only dashes, dots, bullets)
/// 10. Trim the whole text
pub fn normalize(raw: &str) -> String {
    // Real input settles after one or two passes; the input length bounds
    // the loop for adversarial nesting.
    let mut current = normalize_pass(raw);
    for _ in 0..=raw.len() {
        let next = normalize_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Decode bytes lossily and normalise the result.
///
/// Invalid UTF-8 sequences become U+FFFD during decoding and are then
/// silently dropped by rule 1.
pub fn normalize_bytes(raw: &[u8]) -> String {
    normalize(&String::from_utf8_lossy(raw))
}

fn normalize_pass(input: &str) -> String {
    let s = drop_undecodable(input);
    let s = remove_bullets(&s);
    let s = replace_dash_glyphs(&s);
    let s = normalise_dashes(&s);
    let s = collapse_line_breaks(&s);
    let s = strip_noise_punctuation(&s);
    let s = strip_encoding_artifacts(&s);
    let s = drop_non_ascii(&s);
    let s = drop_separator_lines(&s);
    s.trim().to_string()
}

// ── Rule 1: Drop undecodable characters ─────────────────────────────────────

fn drop_undecodable(input: &str) -> String {
    input.replace(char::REPLACEMENT_CHARACTER, "")
}

// ── Rule 2: Remove bullet glyphs ────────────────────────────────────────────

fn remove_bullets(input: &str) -> String {
    input.replace(BULLET_GLYPHS, "")
}

// ── Rule 3: Dash-like glyphs → ASCII ────────────────────────────────────────

fn replace_dash_glyphs(input: &str) -> String {
    input.replace(DASH_GLYPHS, "-")
}

// ── Rule 4: Collapse dash runs, normalise spacing ──────────────────────────

static RE_DASH_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());
static RE_DASH_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*-\s*").unwrap());

fn normalise_dashes(input: &str) -> String {
    let s = RE_DASH_RUN.replace_all(input, "-");
    RE_DASH_SPACING.replace_all(&s, " - ").into_owned()
}

// ── Rule 5: Collapse line breaks ────────────────────────────────────────────

static RE_LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\r\n|\r|\n)+").unwrap());

fn collapse_line_breaks(input: &str) -> String {
    RE_LINE_BREAKS.replace_all(input, "\n").into_owned()
}

// ── Rule 6: Strip noise punctuation ─────────────────────────────────────────
//
// Commas, underscores and ampersands mostly come from table borders and
// form fields. Legitimate uses ("Austin, TX", "R&D") are lost with them.

fn strip_noise_punctuation(input: &str) -> String {
    input.replace([',', '_', '&'], "")
}

// ── Rule 7: Strip encoding artifacts ────────────────────────────────────────

static RE_ARTIFACTS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)\s*c7\s*").unwrap(),
        Regex::new(r"(?i)\s*c2\s*").unwrap(),
        Regex::new(r"(?i)\s*b7\s*").unwrap(),
    ]
});

/// Removing one artifact can join its neighbours into another (`cc77`), so
/// the set is reapplied until none matches. Each round shrinks the text.
fn strip_encoding_artifacts(input: &str) -> String {
    let mut current = input.to_string();
    while RE_ARTIFACTS.iter().any(|re| re.is_match(&current)) {
        current = RE_ARTIFACTS
            .iter()
            .fold(current, |acc, re| re.replace_all(&acc, "").into_owned());
    }
    current
}

// ── Rule 8: Drop non-ASCII ──────────────────────────────────────────────────

fn drop_non_ascii(input: &str) -> String {
    input.chars().filter(char::is_ascii).collect()
}

// ── Rule 9: Drop decorative separator lines ─────────────────────────────────

fn is_separator_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c == '-' || c == '.' || BULLET_GLYPHS.contains(&c))
}

fn drop_separator_lines(input: &str) -> String {
    input
        .split('\n')
        .filter(|line| !is_separator_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Tests ────────────────────────────────────────────────────────────────────
