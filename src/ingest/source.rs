//! Discovery and parsing of log files.

use camino::Utf8Path;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use walkdir::WalkDir;

/// The records read from a log folder, plus counters describing what had to be skipped.
#[derive(Debug, Default)]
pub struct RecordBatch {
    pub records: Vec<Value>,
    pub files_read: usize,
    pub files_skipped: usize,
    pub lines_skipped: usize,
}

/// Read every record from the files in `folder` whose name ends with `suffix`.
///
/// Files are visited in file-name order so repeated runs see records in the same order.
/// Subdirectories are not descended into. Problems are logged and skipped: an unreadable folder
/// yields an empty batch, an unreadable file is passed over, and a line that is not valid JSON is
/// dropped without affecting the rest of its file.
#[must_use]
pub fn read_records(folder: &Utf8Path, suffix: &str) -> RecordBatch {
    let mut batch = RecordBatch::default();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Error accessing folder {folder}: {e}");
                continue;
            }
        };

        let is_log = entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(suffix);
        if !is_log {
            log::trace!("Ignoring {}", entry.path().display());
            continue;
        }

        match File::open(entry.path()) {
            Ok(file) => {
                log::info!("Reading {}", entry.path().display());
                batch.lines_skipped += read_lines(entry.path(), BufReader::new(file), &mut batch.records);
                batch.files_read += 1;
            }
            Err(e) => {
                log::warn!("Error reading file {}: {e}", entry.path().display());
                batch.files_skipped += 1;
            }
        }
    }

    log::debug!(
        "Read {} record(s) from {} file(s) in {folder}, skipped {} file(s) and {} line(s)",
        batch.records.len(),
        batch.files_read,
        batch.files_skipped,
        batch.lines_skipped
    );

    batch
}

/// Parse one JSON value per line into `records`, returning the number of lines skipped.
///
/// Lines are split on raw bytes, so a line that is not valid UTF-8 is skipped like any other
/// malformed line. Only a failing reader ends the file early.
pub fn read_lines(path: &Path, reader: impl BufRead, records: &mut Vec<Value>) -> usize {
    let mut skipped = 0;

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Error reading {} at line {}: {e}", path.display(), index + 1);
                skipped += 1;
                break;
            }
        };

        let line = line.strip_suffix(b"\r").unwrap_or(line.as_slice());
        if line.trim_ascii().is_empty() {
            continue;
        }

        match serde_json::from_slice::<Value>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                log::warn!("Skipping malformed record in {} at line {}: {e}", path.display(), index + 1);
                skipped += 1;
            }
        }
    }

    skipped
}
