//! Error types for the edgequake-resume library.
//!
//! Field extraction itself never fails: a field that cannot be found is
//! `None`, `""` or an empty list. Errors only come from the ingestion layer
//! around it, and they come in two kinds:
//!
//! * [`ResumeError`]: **Fatal**: the call cannot produce any result (folder
//!   missing, bad configuration, every document unreadable). Returned as
//!   `Err(ResumeError)` from the top-level `ingest*` / `parse_file` functions.
//!
//! * [`DocumentError`]: **Non-fatal**: one document could not be read or
//!   decoded. Stored inside [`crate::output::DocumentResult`] so a single
//!   broken PDF does not cost the rest of the batch.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// All fatal errors returned by the edgequake-resume library.
#[derive(Debug, Error)]
pub enum ResumeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input folder or file was not found at the given path.
    #[error("Input not found: '{path}'\nCheck the path exists and is readable.")]
    FolderNotFound { path: PathBuf },

    /// A folder was expected but the path points at something else.
    #[error("'{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    /// Process does not have read permission on the path.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Listing the folder failed for another reason.
    #[error("Failed to list '{path}': {source}")]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The folder holds no file with an accepted extension.
    #[error("No documents with extensions [{extensions}] found in '{path}'")]
    NoDocuments { path: PathBuf, extensions: String },

    /// Every discovered document failed; output would be empty.
    #[error("All {total} documents failed.\nFirst error: {first_error}")]
    AllDocumentsFailed { total: usize, first_error: String },

    /// A single-document call failed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Records could not be serialised.
    #[error("Failed to serialise records: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single document.
///
/// The batch continues; the failure is reported alongside the other
/// documents' records.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("{path}: read failed: {detail}")]
    ReadFailed { path: PathBuf, detail: String },

    /// The file exceeds `max_document_bytes`.
    #[error("{path}: {size} bytes exceeds the {limit}-byte limit")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    /// No decoder is available for this file type.
    #[error("{path}: unsupported document type '{extension}'")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The PDF decoder rejected the file.
    #[error("{path}: text extraction failed: {detail}")]
    DecodeFailed { path: PathBuf, detail: String },
}

impl DocumentError {
    /// Path of the document this error belongs to.
    pub fn path(&self) -> &Path {
        match self {
            DocumentError::ReadFailed { path, .. }
            | DocumentError::TooLarge { path, .. }
            | DocumentError::UnsupportedFormat { path, .. }
            | DocumentError::DecodeFailed { path, .. } => path,
        }
    }
}
