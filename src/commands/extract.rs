use super::Host;
use super::common::CommonArgs;
use crate::Result;
use crate::ingest::{extract_all, read_records, write_rows_to_file};
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Folder holding the evaluation logs, relative to `--root`
    #[arg(value_name = "FOLDER", default_value = "Nishishingjuku")]
    pub folder: Utf8PathBuf,

    /// Directory the input folder is resolved against
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub root: Utf8PathBuf,

    /// Row table to write
    #[arg(long, short = 'o', value_name = "PATH", default_value = "extracted_objects.csv")]
    pub output: Utf8PathBuf,
}

/// Flatten every log in the input folder into one row table.
///
/// Unreadable files and malformed lines are logged and skipped; the table is written even when
/// nothing could be read.
pub fn extract_rows<H: Host>(host: &mut H, common: &CommonArgs, args: &ExtractArgs) -> Result<()> {
    let config = common.setup()?;
    let folder = args.root.join(&args.folder);

    let batch = read_records(&folder, &config.file_suffix);
    let rows = extract_all(&batch.records);
    write_rows_to_file(&args.output, &rows)?;

    log::info!(
        "Skipped {} file(s) and {} line(s) while reading '{folder}'",
        batch.files_skipped,
        batch.lines_skipped
    );

    let _ = writeln!(
        host.output(),
        "Extracted {} row(s) from {} file(s) to {}",
        rows.len(),
        batch.files_read,
        args.output
    );
    Ok(())
}
