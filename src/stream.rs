//! Streaming ingestion API: emit records as documents complete.
//!
//! Unlike the eager [`crate::ingest::ingest_folder`] which returns only after
//! every document is done, [`ingest_stream`] yields each
//! [`ParsedDocument`] as soon as it is parsed. Documents arrive in
//! completion order (sort by `path` if order matters).

use crate::config::IngestConfig;
use crate::error::{DocumentError, ResumeError};
use crate::ingest::process_document;
use crate::output::ParsedDocument;
use crate::pipeline::input;
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::pin::Pin;
use tokio_stream::Stream;
use tracing::info;

/// A boxed stream of per-document results.
pub type DocumentStream = Pin<Box<dyn Stream<Item = Result<ParsedDocument, DocumentError>> + Send>>;

/// Parse the documents in `folder`, streaming records as they are ready.
///
/// Discovery happens before this returns, so a missing or empty folder is
/// reported here rather than through the stream. Progress callbacks fire
/// per document; `on_ingest_start` and `on_ingest_complete` do not, since
/// the caller owns the end of the stream.
///
/// # Returns
/// - `Ok(DocumentStream)`: a stream of `Result<ParsedDocument, DocumentError>`
/// - `Err(ResumeError)`: fatal error (folder not found, no documents, etc.)
///
/// # Example
/// ```rust,no_run
/// use edgequake_resume::{ingest_stream, IngestConfig};
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut stream = ingest_stream("./resumes", &IngestConfig::default()).await?;
/// while let Some(doc) = stream.next().await {
///     match doc {
///         Ok(d) => println!("{}: {:?}", d.path.display(), d.record.email),
///         Err(e) => eprintln!("Error: {e}"),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub async fn ingest_stream(
    folder: impl AsRef<Path>,
    config: &IngestConfig,
) -> Result<DocumentStream, ResumeError> {
    let folder = folder.as_ref();
    info!("Starting streaming ingestion: {}", folder.display());

    let paths = input::discover_documents(folder, config)?;
    let total = paths.len();
    let config_clone = config.clone();

    let s = stream::iter(paths.into_iter().enumerate().map(move |(i, path)| {
        let cfg = config_clone.clone();
        async move { process_document(i + 1, total, path, cfg).await }
    }))
    .buffer_unordered(config.concurrency);

    Ok(Box::pin(s))
}
