//! Input resolution: find resume documents in a folder and turn each one
//! into a text blob.
//!
//! Text files are decoded as lossy UTF-8; invalid sequences become U+FFFD,
//! which the normaliser drops. PDFs go through `pdf-extract` when the `pdf`
//! feature is enabled. A file is treated as a PDF when its extension says
//! so or when it starts with the `%PDF` magic bytes, whatever it is called.

use crate::config::IngestConfig;
use crate::error::{DocumentError, ResumeError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Check the leading bytes for the PDF magic number.
pub fn is_pdf(head: &[u8]) -> bool {
    head.starts_with(b"%PDF")
}

/// List the documents in `folder` that the config accepts, sorted by path.
///
/// Not recursive. Fails when the folder is missing, unreadable, or holds no
/// accepted document.
pub fn discover_documents(folder: &Path, config: &IngestConfig) -> Result<Vec<PathBuf>, ResumeError> {
    if !folder.exists() {
        return Err(ResumeError::FolderNotFound {
            path: folder.to_path_buf(),
        });
    }
    if !folder.is_dir() {
        return Err(ResumeError::NotADirectory {
            path: folder.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(folder).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => ResumeError::PermissionDenied {
            path: folder.to_path_buf(),
        },
        _ => ResumeError::ReadDirFailed {
            path: folder.to_path_buf(),
            source: e,
        },
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| config.accepts_extension(e))
        })
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(ResumeError::NoDocuments {
            path: folder.to_path_buf(),
            extensions: config.extensions.join(", "),
        });
    }

    info!("Found {} documents in {}", paths.len(), folder.display());
    Ok(paths)
}

/// Read one document and return its text.
///
/// Enforces `max_document_bytes` before reading.
pub fn load_document_text(path: &Path, config: &IngestConfig) -> Result<String, DocumentError> {
    let read_failed = |e: std::io::Error| DocumentError::ReadFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    };

    let size = std::fs::metadata(path).map_err(read_failed)?.len();
    if size > config.max_document_bytes {
        return Err(DocumentError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: config.max_document_bytes,
        });
    }

    let bytes = std::fs::read(path).map_err(read_failed)?;
    let has_pdf_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if has_pdf_extension || is_pdf(&bytes) {
        return decode_pdf(path, &bytes);
    }

    debug!("Read {} bytes of text from {}", bytes.len(), path.display());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Extract the text of an in-memory PDF.
#[cfg(feature = "pdf")]
pub fn decode_pdf(path: &Path, bytes: &[u8]) -> Result<String, DocumentError> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::DecodeFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    debug!("Extracted {} chars of text from {}", text.len(), path.display());
    Ok(text)
}

/// Extract the text of an in-memory PDF.
///
/// Always fails: the crate was built without the `pdf` feature.
#[cfg(not(feature = "pdf"))]
pub fn decode_pdf(path: &Path, _bytes: &[u8]) -> Result<String, DocumentError> {
    Err(DocumentError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: "pdf".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let p = dir.join(name);
        std::fs::write(&p, contents).unwrap();
        p
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(b"%PDF-1.7\n"));
        assert!(!is_pdf(b"Jane Doe"));
        assert!(!is_pdf(b""));
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.txt", b"B");
        write(dir.path(), "a.TXT", b"A");
        write(dir.path(), "notes.md", b"skip");
        std::fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let config = IngestConfig::default();
        let paths = discover_documents(dir.path(), &config).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.TXT", "b.txt"]);
    }

    #[test]
    fn test_discover_missing_folder() {
        let err = discover_documents(Path::new("/definitely/not/here"), &IngestConfig::default())
            .unwrap_err();
        assert!(matches!(err, ResumeError::FolderNotFound { .. }));
    }

    #[test]
    fn test_discover_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "cv.txt", b"x");
        let err = discover_documents(&file, &IngestConfig::default()).unwrap_err();
        assert!(matches!(err, ResumeError::NotADirectory { .. }));
    }

    #[test]
    fn test_discover_empty_folder() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "notes.md", b"skip");
        let err = discover_documents(dir.path(), &IngestConfig::default()).unwrap_err();
        assert!(matches!(err, ResumeError::NoDocuments { .. }));
    }

    #[test]
    fn test_load_text_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(dir.path(), "cv.txt", b"Jane\xff Doe");
        let text = load_document_text(&p, &IngestConfig::default()).unwrap();
        assert_eq!(text, "Jane\u{FFFD} Doe");
    }

    #[test]
    fn test_load_too_large() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(dir.path(), "cv.txt", &[b'a'; 64]);
        let config = IngestConfig::builder().max_document_bytes(16).build().unwrap();
        let err = load_document_text(&p, &config).unwrap_err();
        assert!(matches!(err, DocumentError::TooLarge { size: 64, limit: 16, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_document_text(Path::new("/nope/cv.txt"), &IngestConfig::default())
            .unwrap_err();
        assert!(matches!(err, DocumentError::ReadFailed { .. }));
    }

    #[test]
    fn test_corrupt_pdf_is_a_document_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(dir.path(), "cv.pdf", b"not really a pdf");
        let err = load_document_text(&p, &IngestConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::DecodeFailed { .. } | DocumentError::UnsupportedFormat { .. }
        ));
    }
}
