//! Turning raw evaluation logs into a uniform row table
//!
//! Evaluation logs are line-delimited JSON. Each line describes one frame: the ego vehicle pose
//! and the list of objects the evaluator matched against ground truth. The shape of these records
//! drifts between pipeline versions, so nothing here assumes a field is present or has the
//! expected type.
//!
//! # Implementation Model
//!
//! - [`source`] lists a folder and parses each log line into a `serde_json::Value`, skipping
//!   files and lines it cannot read.
//! - [`coerce`] holds the lenient accessors (`safe_get`, `to_numeric_list`, `to_boolean`) that
//!   turn untyped values into optional typed ones.
//! - [`extract`] flattens one record into an ego row and one row per object.
//! - [`row`] defines [`ExtractedRow`], the fixed-schema output unit.
//! - [`table`] writes and reads the row set as CSV.

pub mod coerce;
pub mod extract;
pub mod row;
pub mod source;
pub mod table;

pub use extract::{extract_all, extract_ego, extract_frame};
pub use row::{COLUMNS, EGO_OBJECT_TYPE, ExtractedRow};
pub use source::{RecordBatch, read_records};
pub use table::{read_rows, read_rows_from_file, write_rows, write_rows_to_file};
