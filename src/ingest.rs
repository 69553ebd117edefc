//! Eager (whole-folder) ingestion entry points.
//!
//! ## Why eager vs. streaming?
//!
//! This module provides the simpler API: parse every document, then return.
//! It collects every [`DocumentResult`] into memory, sorted by path, before
//! returning. Use [`crate::stream::ingest_stream`] instead when you want
//! records as soon as each document is done.

use crate::config::IngestConfig;
use crate::error::{DocumentError, ResumeError};
use crate::output::{DocumentResult, IngestOutput, IngestStats, ParsedDocument, Record};
use crate::pipeline::{assemble, input};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Parse every accepted document in `folder`.
///
/// This is the primary entry point for the library.
///
/// # Returns
/// `Ok(IngestOutput)` on success, even if some documents failed
/// (check `output.stats.failed_documents`).
///
/// # Errors
/// Returns `Err(ResumeError)` only for fatal errors:
/// - Folder not found / not a directory / permission denied
/// - No document with an accepted extension
/// - Every document failed
pub async fn ingest_folder(
    folder: impl AsRef<Path>,
    config: &IngestConfig,
) -> Result<IngestOutput, ResumeError> {
    let total_start = Instant::now();
    let folder = folder.as_ref();
    info!("Starting ingestion: {}", folder.display());

    let paths = input::discover_documents(folder, config)?;
    let total = paths.len();

    if let Some(ref cb) = config.progress_callback {
        cb.on_ingest_start(total);
    }

    let mut documents: Vec<DocumentResult> = stream::iter(paths.into_iter().enumerate().map(
        |(i, path)| {
            let cfg = config.clone();
            async move { process_document(i + 1, total, path, cfg).await }
        },
    ))
    .buffer_unordered(config.concurrency)
    .map(DocumentResult::from)
    .collect()
    .await;

    documents.sort_by(|a, b| a.path.cmp(&b.path));

    let parsed = documents.iter().filter(|d| d.record.is_some()).count();
    if let Some(ref cb) = config.progress_callback {
        cb.on_ingest_complete(total, parsed);
    }

    if parsed == 0 {
        let first_error = documents
            .iter()
            .find_map(|d| d.error.as_ref())
            .map(|e| e.to_string())
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(ResumeError::AllDocumentsFailed { total, first_error });
    }

    let stats = IngestStats {
        total_documents: total,
        parsed_documents: parsed,
        failed_documents: total - parsed,
        records_without_email: documents
            .iter()
            .filter_map(|d| d.record.as_ref())
            .filter(|r| r.email.is_none())
            .count(),
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Ingestion complete: {}/{} documents, {}ms total",
        parsed, total, stats.total_duration_ms
    );
    if stats.records_without_email > 0 {
        warn!(
            "{} records have no email and cannot be deduplicated",
            stats.records_without_email
        );
    }

    Ok(IngestOutput { documents, stats })
}

/// Ingest a folder and write the records as a JSON array to `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn ingest_to_file(
    folder: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &IngestConfig,
) -> Result<IngestStats, ResumeError> {
    let output = ingest_folder(folder, config).await?;
    let json = serde_json::to_string_pretty(&output.records())?;
    write_atomic(output_path.as_ref(), json.as_bytes()).await?;
    Ok(output.stats)
}

/// Synchronous wrapper around [`ingest_folder`].
///
/// Creates a temporary tokio runtime internally.
pub fn ingest_folder_sync(
    folder: impl AsRef<Path>,
    config: &IngestConfig,
) -> Result<IngestOutput, ResumeError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ResumeError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(ingest_folder(folder, config))
}

/// Read and parse a single document.
///
/// `max_document_bytes` and `normalize` apply; `extensions` does not, so a
/// file can be parsed whatever it is called.
pub async fn parse_file(
    path: impl AsRef<Path>,
    config: &IngestConfig,
) -> Result<Record, ResumeError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ResumeError::FolderNotFound {
            path: path.to_path_buf(),
        });
    }
    let doc = process_document(1, 1, path.to_path_buf(), config.clone()).await?;
    Ok(doc.record)
}

/// Parse a PDF held in memory.
///
/// Useful when the PDF comes from a database or an upload rather than a
/// file on disk; nothing is written to disk.
///
/// # Example
/// ```rust,no_run
/// use edgequake_resume::{parse_pdf_bytes, IngestConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes: Vec<u8> = std::fs::read("resume.pdf")?;
/// let record = parse_pdf_bytes(&bytes, &IngestConfig::default()).await?;
/// println!("{:?}", record.name);
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "pdf")]
pub async fn parse_pdf_bytes(bytes: &[u8], config: &IngestConfig) -> Result<Record, ResumeError> {
    let bytes = bytes.to_vec();
    let normalize = config.normalize;
    let label = PathBuf::from("<memory>");

    tokio::task::spawn_blocking(move || {
        let text = input::decode_pdf(&label, &bytes)?;
        Ok(parse_text(&text, normalize))
    })
    .await
    .map_err(|e| ResumeError::Internal(format!("PDF decode task failed: {}", e)))?
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Read and parse one document on the blocking pool, firing progress events.
///
/// A panic inside the PDF decoder is reported as a [`DocumentError`] for
/// this document only.
pub(crate) async fn process_document(
    doc_num: usize,
    total: usize,
    path: PathBuf,
    config: IngestConfig,
) -> Result<ParsedDocument, DocumentError> {
    if let Some(ref cb) = config.progress_callback {
        cb.on_document_start(doc_num, total, &path);
    }

    let task_path = path.clone();
    let task_config = config.clone();
    let result = tokio::task::spawn_blocking(move || read_and_parse(&task_path, &task_config))
        .await
        .unwrap_or_else(|e| {
            Err(DocumentError::DecodeFailed {
                path: path.clone(),
                detail: format!("decoder aborted: {}", e),
            })
        });

    match &result {
        Ok(doc) => {
            debug!(
                "Parsed {} in {}ms ({} fields)",
                doc.path.display(),
                doc.duration_ms,
                doc.record.fields_found()
            );
            if let Some(ref cb) = config.progress_callback {
                cb.on_document_complete(doc_num, total, doc.record.fields_found());
            }
        }
        Err(e) => {
            warn!("Skipping document: {}", e);
            if let Some(ref cb) = config.progress_callback {
                cb.on_document_error(doc_num, total, &e.to_string());
            }
        }
    }

    result
}

fn read_and_parse(path: &Path, config: &IngestConfig) -> Result<ParsedDocument, DocumentError> {
    let start = Instant::now();
    let text = input::load_document_text(path, config)?;
    let record = parse_text(&text, config.normalize);
    Ok(ParsedDocument {
        path: path.to_path_buf(),
        record,
        text_len: text.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

fn parse_text(text: &str, normalize: bool) -> Record {
    if normalize {
        assemble::parse_resume_normalized(text)
    } else {
        assemble::parse_resume(text)
    }
}

/// Write `contents` to `path` via a sibling temp file and a rename.
///
/// Missing parent directories are created. Readers of `path` see either the
/// old file or the complete new one, never a partial write.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ResumeError> {
    let write_failed = |e: std::io::Error| ResumeError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
    }

    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);
    tokio::fs::write(&tmp_path, contents)
        .await
        .map_err(write_failed)?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(write_failed)?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
