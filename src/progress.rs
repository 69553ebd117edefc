//! Progress-callback trait for per-document ingestion events.
//!
//! Inject an [`Arc<dyn IngestProgressCallback>`] via
//! [`crate::config::IngestConfigBuilder::progress_callback`] to receive
//! events as each document is read and parsed. The library stays unaware of
//! how the host reports them (terminal bar, log line, channel).
//!
//! # Example
//!
//! ```rust
//! use edgequake_resume::{IngestConfig, IngestProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     parsed: AtomicUsize,
//! }
//!
//! impl IngestProgressCallback for CountingCallback {
//!     fn on_document_complete(&self, doc_num: usize, total: usize, fields_found: usize) {
//!         self.parsed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("Document {}/{}: {} fields", doc_num, total, fields_found);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { parsed: AtomicUsize::new(0) });
//!
//! let config = IngestConfig::builder()
//!     .progress_callback(counter as Arc<dyn IngestProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the ingestion layer as it processes each document.
///
/// Documents are processed concurrently, so methods may be called from
/// several threads at once; implementations must synchronise any shared
/// state. All methods default to no-ops.
pub trait IngestProgressCallback: Send + Sync {
    /// Called once, after discovery, before any document is read.
    fn on_ingest_start(&self, total_documents: usize) {
        let _ = total_documents;
    }

    /// Called before a document is read.
    ///
    /// # Arguments
    /// * `doc_num`: 1-indexed position in the sorted document list
    /// * `total`  : number of documents in the batch
    /// * `path`   : file being read
    fn on_document_start(&self, doc_num: usize, total: usize, path: &Path) {
        let _ = (doc_num, total, path);
    }

    /// Called when a document parsed.
    ///
    /// `fields_found` counts the record fields that carry a value (0–7).
    fn on_document_complete(&self, doc_num: usize, total: usize, fields_found: usize) {
        let _ = (doc_num, total, fields_found);
    }

    /// Called when a document could not be read or decoded.
    fn on_document_error(&self, doc_num: usize, total: usize, error: &str) {
        let _ = (doc_num, total, error);
    }

    /// Called once after every document has been attempted.
    fn on_ingest_complete(&self, total_documents: usize, success_count: usize) {
        let _ = (total_documents, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl IngestProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::IngestConfig`].
pub type ProgressCallback = Arc<dyn IngestProgressCallback>;
