//! # edgequake-resume
//!
//! Turn a folder of resumes (PDF or plain text) into structured records.
//!
//! ## Why this crate?
//!
//! Resume text comes out of PDF extractors full of noise: bullet glyphs,
//! typographic dashes, broken encodings, ragged line breaks. This crate
//! cleans that text up and pulls out the fields a recruiting index needs
//! (name, email, phone, location, skills, education, work history) with a
//! small set of deterministic rules. No model, no network: the same text
//! always yields the same record.
//!
//! ## Pipeline Overview
//!
//! ```text
//! folder
//!  │
//!  ├─ 1. Input      list accepted files, decode txt / pdf (spawn_blocking)
//!  ├─ 2. Normalize  optional repair of extraction noise
//!  ├─ 3. Segment    trim and split into lines
//!  ├─ 4. Extract    contact fields, skills, education, work blocks
//!  └─ 5. Output     one Record per document + batch stats
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_resume::{ingest_folder, IngestConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = IngestConfig::default();
//!     let output = ingest_folder("./resumes", &config).await?;
//!     println!("{}", serde_json::to_string_pretty(&output.records())?);
//!     eprintln!("parsed {}/{} documents",
//!         output.stats.parsed_documents,
//!         output.stats.total_documents);
//!     Ok(())
//! }
//! ```
//!
//! Single texts need no runtime:
//!
//! ```rust
//! use edgequake_resume::parse_resume;
//!
//! let record = parse_resume("Jane Doe\njane@example.com\nAustin, TX");
//! assert_eq!(record.location.as_deref(), Some("Austin, TX"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resume2json` binary (clap + anyhow + tracing-subscriber + indicatif) |
//! | `pdf`   | on      | PDF text extraction via `pdf-extract` |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! edgequake-resume = { version = "0.1", default-features = false, features = ["pdf"] }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{IngestConfig, IngestConfigBuilder, DEFAULT_MAX_DOCUMENT_BYTES};
pub use error::{DocumentError, ResumeError};
pub use ingest::{ingest_folder, ingest_folder_sync, ingest_to_file, parse_file, write_atomic};
#[cfg(feature = "pdf")]
pub use ingest::parse_pdf_bytes;
pub use output::{
    dedup_by_email, DocumentResult, IndexDocument, IngestOutput, IngestStats, ParsedDocument,
    Record, WorkEntry,
};
pub use pipeline::assemble::{parse_resume, parse_resume_normalized};
pub use pipeline::contact::{extract_email, extract_location, extract_name, extract_phone};
pub use pipeline::education::extract_education;
pub use pipeline::input::{discover_documents, load_document_text};
pub use pipeline::normalize::{normalize, normalize_bytes};
pub use pipeline::section::{extract_section, Section};
pub use pipeline::segment::{preprocess, segment};
pub use pipeline::skills::{extract_skills, FIELD_JOINER};
pub use pipeline::work::extract_work_experience;
pub use progress::{IngestProgressCallback, NoopProgressCallback, ProgressCallback};
pub use stream::{ingest_stream, DocumentStream};
