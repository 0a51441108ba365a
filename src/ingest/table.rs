//! CSV persistence for extracted rows.

use super::row::{COLUMNS, ExtractedRow};
use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use std::fs::File;
use std::io::{Read, Write};

/// Write `rows` as CSV with a header row, in the given order.
///
/// The header is written even when there are no rows.
pub fn write_rows<W: Write>(rows: &[ExtractedRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(COLUMNS)?;

    for row in rows {
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Read rows previously written by [`write_rows`].
///
/// Columns are matched by header name, so tables written by other tools with the same column
/// set but a different column order are accepted.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<ExtractedRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<ExtractedRow>().enumerate() {
        let row = record.into_app_err_with(|| format!("decoding row {} of the row table", index + 1))?;
        rows.push(row);
    }

    Ok(rows)
}

pub fn write_rows_to_file(path: &Utf8Path, rows: &[ExtractedRow]) -> Result<()> {
    let file = File::create(path).into_app_err_with(|| format!("creating row table '{path}'"))?;
    write_rows(rows, file).into_app_err_with(|| format!("writing row table '{path}'"))
}

pub fn read_rows_from_file(path: &Utf8Path) -> Result<Vec<ExtractedRow>> {
    let file = File::open(path).into_app_err_with(|| format!("opening row table '{path}'"))?;
    read_rows(file).into_app_err_with(|| format!("reading row table '{path}'"))
}
