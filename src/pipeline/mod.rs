//! Pipeline stages for resume-to-record extraction.
//!
//! Each submodule implements one transformation step and is testable on its
//! own. Every stage except [`input`] is a pure function of its text input.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ normalize? ──▶ segment ──▶ extractors ──▶ assemble
//! (txt/pdf)  (opt-in)      (lines)     (7 fields)     (Record)
//! ```
//!
//! 1. [`input`]: find documents in a folder and decode them to text;
//!    the only stage with I/O
//! 2. [`normalize`]: repair extraction noise (bullets, dash glyphs, encoding
//!    artifacts); opt-in because it strips commas
//! 3. [`segment`]: trim trailing whitespace and split into non-empty lines
//! 4. [`section`]: cut a section body out by heading keyword; shared by
//!    the section-based extractors
//! 5. [`contact`], [`skills`], [`education`], [`work`]: one extractor per
//!    field group
//! 6. [`assemble`]: run all extractors and build the [`crate::Record`]

pub mod assemble;
pub mod contact;
pub mod education;
pub mod input;
pub mod normalize;
pub mod section;
pub mod segment;
pub mod skills;
pub mod work;
