//! Report directory persistence: write/read a `RunReportV1` to/from disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   run_report.json      canonical JSON report
//!   report_digest.txt    ASCII digest string ("sha256:...")
//! ```
//!
//! The directory path is never part of the digest.
//!
//! # Fail-closed semantics
//!
//! - Missing file → error (other read failures keep their `io::ErrorKind`)
//! - Extra file → error, including leftover `.tmp_*` files and names that are
//!   not valid UTF-8
//! - Non-canonical or foreign-schema report → error
//! - Stored digest differs from the recomputed one → error

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::report::{ReportError, RunReportV1};

const REPORT_FILENAME: &str = "run_report.json";
const DIGEST_FILENAME: &str = "report_digest.txt";
const REPORT_DIR_FILENAMES: &[&str] = &[REPORT_FILENAME, DIGEST_FILENAME];

/// Error writing or reading a report directory.
#[derive(Debug, Error)]
pub enum ReportDirError {
    #[error("I/O error ({kind}): {detail}")]
    Io { kind: io::ErrorKind, detail: String },
    #[error("missing file: {filename}")]
    MissingFile { filename: String },
    #[error("undeclared extra file: {name}")]
    ExtraFile { name: String },
    #[error("invalid report: {0}")]
    Report(#[from] ReportError),
    #[error("digest mismatch: stored={stored}, recomputed={recomputed}")]
    DigestMismatch { stored: String, recomputed: String },
}

/// Write `report` into `dir`, creating the directory if needed.
///
/// # Errors
///
/// Returns [`ReportDirError::Io`] on any filesystem failure.
pub fn write_report_dir(report: &RunReportV1, dir: &Path) -> Result<(), ReportDirError> {
    std::fs::create_dir_all(dir).map_err(|e| io_error("create_dir_all", &e))?;
    write_atomic(&dir.join(REPORT_FILENAME), report.bytes())?;
    write_atomic(&dir.join(DIGEST_FILENAME), report.digest().as_str().as_bytes())?;
    debug!(dir = %dir.display(), digest = report.digest().as_str(), "report directory written");
    Ok(())
}

/// Read and verify a report directory.
///
/// # Errors
///
/// Returns [`ReportDirError`] on any missing or extra file, an invalid report,
/// or a digest mismatch.
pub fn read_report_dir(dir: &Path) -> Result<RunReportV1, ReportDirError> {
    let report_bytes = read_required(dir, REPORT_FILENAME)?;
    let digest_bytes = read_required(dir, DIGEST_FILENAME)?;

    for name in list_files(dir)? {
        if !REPORT_DIR_FILENAMES.contains(&name.as_str()) {
            return Err(ReportDirError::ExtraFile { name });
        }
    }

    let report = RunReportV1::from_bytes(report_bytes)?;
    let stored = String::from_utf8_lossy(&digest_bytes).trim().to_string();
    if report.digest().as_str() != stored {
        return Err(ReportDirError::DigestMismatch {
            stored,
            recomputed: report.digest().as_str().to_string(),
        });
    }
    Ok(report)
}

/// Write via temp file + rename in the same directory.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportDirError> {
    let dir = path.parent().ok_or_else(|| ReportDirError::Io {
        kind: io::ErrorKind::InvalidInput,
        detail: format!("{} has no parent directory", path.display()),
    })?;
    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);

    std::fs::write(&temp_path, content)
        .map_err(|e| io_error(&format!("write {}", temp_path.display()), &e))?;
    std::fs::rename(&temp_path, path).map_err(|e| {
        io_error(
            &format!("rename {} → {}", temp_path.display(), path.display()),
            &e,
        )
    })
}

fn io_error(context: &str, err: &io::Error) -> ReportDirError {
    ReportDirError::Io {
        kind: err.kind(),
        detail: format!("{context}: {err}"),
    }
}

/// Only `NotFound` means missing; any other failure is reported as I/O.
fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirError> {
    std::fs::read(dir.join(filename)).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReportDirError::MissingFile {
            filename: filename.to_string(),
        },
        _ => io_error(&format!("read {filename}"), &e),
    })
}

/// Every entry in `dir`. Names that are not UTF-8 are rendered lossily so they
/// still count as extra files.
fn list_files(dir: &Path) -> Result<BTreeSet<String>, ReportDirError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_error("read_dir", &e))?;

    let mut files = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_error("dir entry", &e))?;
        files.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(files)
}
