//! Configuration for batch resume ingestion.
//!
//! The extraction core ([`crate::parse_resume`]) takes no configuration at
//! all. Everything that varies between runs (how many documents to parse at
//! once, which files count as resumes, whether to normalise first) lives in
//! [`IngestConfig`] and is passed explicitly to the `ingest*` entry points.

use crate::error::ResumeError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Default cap on a single document's size: 16 MiB.
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 16 * 1024 * 1024;

/// Configuration for ingesting a folder of resumes.
///
/// Built via [`IngestConfig::builder()`] or using [`IngestConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_resume::IngestConfig;
///
/// let config = IngestConfig::builder()
///     .concurrency(8)
///     .extensions(["pdf"])
///     .normalize(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.concurrency, 8);
/// ```
#[derive(Clone)]
pub struct IngestConfig {
    /// Number of documents read and parsed at the same time. Default: 4.
    ///
    /// Parsing is CPU-bound and cheap; the win comes from overlapping file
    /// reads and PDF decoding, which dominate per-document cost.
    pub concurrency: usize,

    /// Accepted file extensions, lower-case, without the dot.
    /// Default: `["pdf", "txt"]`.
    pub extensions: Vec<String>,

    /// Run [`crate::normalize`] on each document before parsing. Default: false.
    ///
    /// The normaliser strips commas, which disables `City, ST` location
    /// detection and comma-separated skill splitting. Enable it for sources
    /// with heavy encoding damage where that trade is worth it.
    pub normalize: bool,

    /// Documents larger than this are skipped with
    /// [`crate::error::DocumentError::TooLarge`]. Default: 16 MiB.
    pub max_document_bytes: u64,

    /// Optional progress callback. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            extensions: vec!["pdf".to_string(), "txt".to_string()],
            normalize: false,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for IngestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestConfig")
            .field("concurrency", &self.concurrency)
            .field("extensions", &self.extensions)
            .field("normalize", &self.normalize)
            .field("max_document_bytes", &self.max_document_bytes)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn IngestProgressCallback>"),
            )
            .finish()
    }
}

impl IngestConfig {
    /// Create a new builder for `IngestConfig`.
    pub fn builder() -> IngestConfigBuilder {
        IngestConfigBuilder {
            config: Self::default(),
        }
    }

    /// Whether `ext` (any case, no dot) is an accepted extension.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }
}

/// Builder for [`IngestConfig`].
#[derive(Debug)]
pub struct IngestConfigBuilder {
    config: IngestConfig,
}

impl IngestConfigBuilder {
    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n;
        self
    }

    /// Replace the accepted extensions. Leading dots and case are ignored.
    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.extensions = exts
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    pub fn normalize(mut self, v: bool) -> Self {
        self.config.normalize = v;
        self
    }

    pub fn max_document_bytes(mut self, n: u64) -> Self {
        self.config.max_document_bytes = n;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<IngestConfig, ResumeError> {
        let c = &self.config;
        if c.concurrency == 0 {
            return Err(ResumeError::InvalidConfig("Concurrency must be ≥ 1".into()));
        }
        if c.extensions.is_empty() {
            return Err(ResumeError::InvalidConfig(
                "At least one file extension must be accepted".into(),
            ));
        }
        if c.max_document_bytes == 0 {
            return Err(ResumeError::InvalidConfig(
                "max_document_bytes must be > 0".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = IngestConfig::default();
        assert_eq!(c.concurrency, 4);
        assert_eq!(c.extensions, vec!["pdf", "txt"]);
        assert!(!c.normalize);
        assert_eq!(c.max_document_bytes, DEFAULT_MAX_DOCUMENT_BYTES);
    }

    #[test]
    fn extensions_are_cleaned() {
        let c = IngestConfig::builder()
            .extensions([".PDF", " Txt ", ""])
            .build()
            .unwrap();
        assert_eq!(c.extensions, vec!["pdf", "txt"]);
        assert!(c.accepts_extension("PDF"));
        assert!(!c.accepts_extension("docx"));
    }

    #[test]
    fn zero_concurrency_rejected() {
        let err = IngestConfig::builder().concurrency(0).build().unwrap_err();
        assert!(matches!(err, ResumeError::InvalidConfig(_)));
    }

    #[test]
    fn empty_extensions_rejected() {
        let err = IngestConfig::builder()
            .extensions(Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, ResumeError::InvalidConfig(_)));
    }

    #[test]
    fn debug_hides_callback() {
        let dbg = format!("{:?}", IngestConfig::default());
        assert!(dbg.contains("concurrency: 4"));
        assert!(dbg.contains("progress_callback: None"));
    }
}
