//! Run log artifacts
//!
//! Every real run writes one artifact per enabled [`LogFormat`] into the
//! log directory, named `bang_copier_<run id>.<ext>`. Existing logs are
//! never overwritten: a taken name gets a `_<n>` suffix. Dry runs write
//! nothing.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;

use crate::config::LogFormat;
use crate::pipeline::{OperationResult, OperationStatus};

const FILE_PREFIX: &str = "bang_copier_";
const LOG_COLUMNS: &str =
    "timestamp | source_dir | destination_dir | original_filename | new_filename | status | message";
const CSV_COLUMNS: [&str; 8] = [
    "run_id",
    "source",
    "original_filename",
    "new_filename",
    "status",
    "destination",
    "timestamp",
    "message",
];

/// Facts about the run that go into every artifact header
#[derive(Debug, Clone)]
pub struct RunMetadata<'a> {
    /// Source folder
    pub source: &'a Path,
    /// Destination folders in copy order
    pub destinations: &'a [PathBuf],
    /// When the run started; also names the artifacts
    pub started_at: DateTime<Local>,
}

impl<'a> RunMetadata<'a> {
    /// Metadata for a run starting now
    #[must_use]
    pub fn starting_now(source: &'a Path, destinations: &'a [PathBuf]) -> Self {
        Self {
            source,
            destinations,
            started_at: Local::now(),
        }
    }

    /// `YYYY-MM-DD_HH-MM-SS` identifier derived from the start time
    #[must_use]
    pub fn run_id(&self) -> String {
        self.started_at.format("%Y-%m-%d_%H-%M-%S").to_string()
    }
}

/// One log entry per executed operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// When the operation finished
    pub timestamp: String,
    /// Source folder
    pub source_dir: PathBuf,
    /// Destination folder
    pub destination_dir: PathBuf,
    /// Name in the source folder, marks included
    pub original_filename: String,
    /// Name in the destination folder
    pub renamed_filename: String,
    /// Final status
    pub status: OperationStatus,
    /// Error message for failed copies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&OperationResult> for LogEntry {
    fn from(result: &OperationResult) -> Self {
        let op = &result.operation;
        Self {
            timestamp: timestamp(&result.completed_at),
            source_dir: op
                .source_path()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            destination_dir: op.destination_dir().to_path_buf(),
            original_filename: op.matched_file().original_name().to_string(),
            renamed_filename: op.renamed_name(),
            status: result.status,
            message: result.error_message.clone(),
        }
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    run_id: String,
    timestamp: String,
    source: &'a Path,
    destinations: &'a [PathBuf],
    entries: &'a [LogEntry],
}

/// Writes run log artifacts
#[derive(Debug, Clone)]
pub struct RunLogWriter {
    log_dir: PathBuf,
    formats: Vec<LogFormat>,
}

impl RunLogWriter {
    /// Create a writer for an existing log directory
    #[must_use]
    pub fn new(log_dir: PathBuf, formats: &[LogFormat]) -> Self {
        Self {
            log_dir,
            formats: formats.to_vec(),
        }
    }

    /// Write one artifact per format and return the paths written.
    ///
    /// A format that fails to write is logged as a warning and skipped;
    /// it never fails the run.
    pub fn write(&self, meta: &RunMetadata<'_>, results: &[OperationResult]) -> Vec<PathBuf> {
        let entries: Vec<LogEntry> = results.iter().map(LogEntry::from).collect();
        let stem = self.unique_stem(&meta.run_id());

        let mut written = Vec::new();
        for &format in &self.formats {
            let path = self.log_dir.join(format!("{stem}.{}", format.extension()));
            match render(format, meta, &entries).and_then(|body| write_new(&path, &body)) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "run log written");
                    written.push(path);
                }
                Err(e) => {
                    tracing::warn!("Failed to write {format:?} log {}: {e}", path.display());
                }
            }
        }
        written
    }

    /// First `bang_copier_<run id>[_<n>]` stem with no artifact of any
    /// enabled format already present
    fn unique_stem(&self, run_id: &str) -> String {
        let base = format!("{FILE_PREFIX}{run_id}");
        let taken = |stem: &str| {
            self.formats
                .iter()
                .any(|f| self.log_dir.join(format!("{stem}.{}", f.extension())).exists())
        };

        let mut stem = base.clone();
        let mut n = 0;
        while taken(&stem) {
            n += 1;
            stem = format!("{base}_{n}");
        }
        stem
    }
}

fn write_new(path: &Path, body: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(body.as_bytes())?;
    file.sync_all()
}

fn timestamp(at: &DateTime<Local>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, false)
}

fn render(format: LogFormat, meta: &RunMetadata<'_>, entries: &[LogEntry]) -> io::Result<String> {
    match format {
        LogFormat::Log => Ok(render_log(meta, entries)),
        LogFormat::Csv => Ok(render_csv(meta, entries)),
        LogFormat::Json => render_json(meta, entries),
    }
}

fn render_log(meta: &RunMetadata<'_>, entries: &[LogEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Bang File Copier run: {}", timestamp(&meta.started_at));
    let _ = writeln!(out, "Source: {}", meta.source.display());
    out.push_str("Destinations:\n");
    for dest in meta.destinations {
        let _ = writeln!(out, "  - {}", dest.display());
    }
    out.push_str("\nEntries:\n");
    let _ = writeln!(out, "{LOG_COLUMNS}");
    for e in entries {
        let _ = writeln!(
            out,
            "{} | {} | {} | {} | {} | {} | {}",
            e.timestamp,
            e.source_dir.display(),
            e.destination_dir.display(),
            e.original_filename,
            e.renamed_filename,
            e.status,
            e.message.as_deref().unwrap_or("")
        );
    }
    out
}

fn render_csv(meta: &RunMetadata<'_>, entries: &[LogEntry]) -> String {
    let run_id = meta.run_id();
    let source = meta.source.display().to_string();

    let mut out = String::new();
    let _ = writeln!(out, "{}", CSV_COLUMNS.join(","));
    for e in entries {
        let status = e.status.to_string();
        let destination = e.destination_dir.join(&e.renamed_filename);
        let destination = destination.display().to_string();
        let row: [&str; 8] = [
            &run_id,
            &source,
            &e.original_filename,
            &e.renamed_filename,
            &status,
            &destination,
            &e.timestamp,
            e.message.as_deref().unwrap_or(""),
        ];
        let fields: Vec<String> = row.into_iter().map(csv_field).collect();
        let _ = writeln!(out, "{}", fields.join(","));
    }
    out
}

/// Quote a CSV field when it contains a separator, quote, or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn render_json(meta: &RunMetadata<'_>, entries: &[LogEntry]) -> io::Result<String> {
    let doc = JsonDocument {
        run_id: meta.run_id(),
        timestamp: timestamp(&meta.started_at),
        source: meta.source,
        destinations: meta.destinations,
        entries,
    };
    let mut body = serde_json::to_string_pretty(&doc).map_err(io::Error::other)?;
    body.push('\n');
    Ok(body)
}
