//! CLI binary for edgequake-resume.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `IngestConfig` and prints the extracted records.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_resume::{
    dedup_by_email, ingest_folder, parse_file, write_atomic, IngestConfig,
    IngestProgressCallback, ProgressCallback, Record,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live bar plus one log line per document.
/// Documents complete out of order, so start times are keyed by position.
struct CliProgressCallback {
    bar: ProgressBar,
    start_times: Mutex<HashMap<usize, (Instant, String)>>,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    /// Spinner until `on_ingest_start` reports the document count.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Scanning");
        bar.set_message("Listing documents…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
            errors: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} resumes  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Parsing");
    }

    fn finish_document(&self, doc_num: usize) -> (String, f64) {
        let (started, name) = self
            .start_times
            .lock()
            .unwrap()
            .remove(&doc_num)
            .unwrap_or_else(|| (Instant::now(), String::new()));
        (name, started.elapsed().as_secs_f64())
    }
}

impl IngestProgressCallback for CliProgressCallback {
    fn on_ingest_start(&self, total_documents: usize) {
        self.activate_bar(total_documents);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Parsing {total_documents} resumes…"))
        ));
    }

    fn on_document_start(&self, doc_num: usize, _total: usize, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.bar.set_message(name.clone());
        self.start_times
            .lock()
            .unwrap()
            .insert(doc_num, (Instant::now(), name));
    }

    fn on_document_complete(&self, doc_num: usize, total: usize, fields_found: usize) {
        let (name, secs) = self.finish_document(doc_num);
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {:<32}  {}  {}",
            green("✓"),
            doc_num,
            total,
            name,
            dim(&format!("{fields_found}/7 fields")),
            dim(&format!("{secs:.2}s")),
        ));
        self.bar.inc(1);
    }

    fn on_document_error(&self, doc_num: usize, total: usize, error: &str) {
        let (name, secs) = self.finish_document(doc_num);
        self.errors.fetch_add(1, Ordering::SeqCst);

        // Truncate very long error messages to keep output tidy.
        let msg = match error.char_indices().nth(79) {
            Some((cut, _)) => format!("{}\u{2026}", &error[..cut]),
            None => error.to_string(),
        };

        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {:<32}  {}  {}",
            red("✗"),
            doc_num,
            total,
            name,
            red(&msg),
            dim(&format!("{secs:.2}s")),
        ));
        self.bar.inc(1);
    }

    fn on_ingest_complete(&self, total_documents: usize, success_count: usize) {
        let failed = total_documents.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} resumes parsed successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} resumes parsed  ({} failed)",
                cyan("⚠"),
                bold(&success_count.to_string()),
                total_documents,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Parse a folder of resumes (pretty JSON array on stdout)
  resume2json ./resumes

  # Write to a file
  resume2json ./resumes -o records.json

  # Parse one resume
  resume2json jane_doe.pdf

  # One record per line, latest record per email address
  resume2json ./resumes --format jsonl --dedup-email

  # Flat text documents for a similarity index
  resume2json ./resumes --format index -o index.json

  # Repair heavily damaged PDF text before parsing
  resume2json ./resumes --normalize

OUTPUT FORMATS:
  json    Pretty-printed JSON array of records (default)
  jsonl   One compact JSON record per line
  index   JSON array of {content, email} documents for embedding

ENVIRONMENT VARIABLES:
  RESUME2JSON_OUTPUT       Default for --output
  RESUME2JSON_CONCURRENCY  Default for --concurrency
  RESUME2JSON_EXT          Default for --ext
  RUST_LOG                 tracing filter, overrides --verbose / --quiet
"#;

/// Extract structured records from resume PDFs and text files.
#[derive(Parser, Debug)]
#[command(
    name = "resume2json",
    version,
    about = "Extract structured records from resume PDFs and text files",
    long_about = "Read a folder of resumes (or a single resume), extract name, email, phone, \
location, skills, education and work history with deterministic rules, and print the \
records as JSON.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Folder of resumes, or a single resume file.
    input: PathBuf,

    /// Write output to this file instead of stdout.
    #[arg(short, long, env = "RESUME2JSON_OUTPUT")]
    output: Option<PathBuf>,

    /// Number of documents parsed concurrently.
    #[arg(short, long, env = "RESUME2JSON_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Accepted file extensions, comma-separated.
    #[arg(long, env = "RESUME2JSON_EXT", value_delimiter = ',', default_value = "pdf,txt")]
    ext: Vec<String>,

    /// Repair extraction noise before parsing (strips commas).
    #[arg(long, env = "RESUME2JSON_NORMALIZE")]
    normalize: bool,

    /// Skip documents larger than this many bytes.
    #[arg(long, env = "RESUME2JSON_MAX_BYTES", default_value_t = edgequake_resume::DEFAULT_MAX_DOCUMENT_BYTES)]
    max_bytes: u64,

    /// Output format.
    #[arg(long, env = "RESUME2JSON_FORMAT", value_enum, default_value = "json")]
    format: OutputFormat,

    /// Keep only the last record for each email address.
    #[arg(long, env = "RESUME2JSON_DEDUP_EMAIL")]
    dedup_email: bool,

    /// Disable progress bar.
    #[arg(long, env = "RESUME2JSON_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "RESUME2JSON_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "RESUME2JSON_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Jsonl,
    Index,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level library logs.
    let is_folder = cli.input.is_dir();
    let show_progress = !cli.quiet && !cli.no_progress && is_folder;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn IngestProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Run extraction ───────────────────────────────────────────────────
    let started = Instant::now();
    let mut records = if is_folder {
        let output = ingest_folder(&cli.input, &config)
            .await
            .context("Ingestion failed")?;

        if !cli.quiet && !show_progress {
            for doc in output.documents.iter().filter(|d| d.error.is_some()) {
                if let Some(ref e) = doc.error {
                    eprintln!("{} {}", red("✗"), e);
                }
            }
            eprintln!(
                "Parsed {}/{} resumes in {}ms",
                output.stats.parsed_documents,
                output.stats.total_documents,
                output.stats.total_duration_ms
            );
        }
        output.records()
    } else {
        let record = parse_file(&cli.input, &config)
            .await
            .with_context(|| format!("Failed to parse {}", cli.input.display()))?;
        vec![record]
    };

    if cli.dedup_email {
        let before = records.len();
        records = dedup_by_email(records);
        if !cli.quiet && records.len() < before {
            eprintln!(
                "   {} duplicate records dropped by email",
                dim(&(before - records.len()).to_string())
            );
        }
    }

    let rendered = render(&records, cli.format)?;

    // ── Write output ─────────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        write_atomic(output_path, rendered.as_bytes())
            .await
            .context("Failed to write output")?;

        if !cli.quiet {
            eprintln!(
                "{}  {} records  {}ms  →  {}",
                green("✔"),
                records.len(),
                started.elapsed().as_millis(),
                bold(&output_path.display().to_string()),
            );
        }
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(rendered.as_bytes())
            .context("Failed to write to stdout")?;
        if !rendered.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    Ok(())
}

/// Map CLI args to `IngestConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<IngestConfig> {
    let mut builder = IngestConfig::builder()
        .concurrency(cli.concurrency)
        .extensions(&cli.ext)
        .normalize(cli.normalize)
        .max_document_bytes(cli.max_bytes);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Serialise records in the requested format.
fn render(records: &[Record], format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(records)?,
        OutputFormat::Jsonl => records
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?
            .join("\n"),
        OutputFormat::Index => {
            let docs: Vec<_> = records.iter().map(Record::to_index_document).collect();
            serde_json::to_string_pretty(&docs)?
        }
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            edgequake_resume::parse_resume("Jane Doe\njane@example.com"),
            edgequake_resume::parse_resume("John Roe"),
        ]
    }

    #[test]
    fn test_render_jsonl_one_line_per_record() {
        let out = render(&sample(), OutputFormat::Jsonl).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Record = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_render_index() {
        let out = render(&sample(), OutputFormat::Index).unwrap();
        assert!(out.contains("Name: Jane Doe. Email: jane@example.com."));
        assert!(out.contains("Email: Unknown."));
    }

    #[test]
    fn test_render_empty_json_array() {
        assert_eq!(render(&[], OutputFormat::Json).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_jsonl_output_written_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("records.jsonl");
        let rendered = render(&sample(), OutputFormat::Jsonl).unwrap();

        write_atomic(&out, rendered.as_bytes()).await.unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), rendered);
        assert!(!dir.path().join("nested").join("records.jsonl.tmp").exists());
    }

    #[test]
    fn test_cli_parses_ext_list() {
        let cli = Cli::try_parse_from(["resume2json", "./cvs", "--ext", "pdf,TXT", "-c", "2"])
            .unwrap();
        assert_eq!(cli.ext, vec!["pdf", "TXT"]);
        let config = build_config(&cli, None).unwrap();
        assert_eq!(config.extensions, vec!["pdf", "txt"]);
        assert_eq!(config.concurrency, 2);
    }
}
