//! Renderings of analysis results
//!
//! # Implementation Model
//!
//! Each output format lives in its own module and exposes one `generate_*` function per kind
//! of result (metrics, distance aggregation, covariance samples):
//! - **Console**: aligned plain text, optionally colored
//! - **CSV**: one header row and one row per category, bin or sample
//! - **JSON**: pretty-printed structured data
//! - **Excel**: a single `.xlsx` workbook with one sheet per result
//!
//! Text formats write to any [`core::fmt::Write`]; byte formats write to any
//! [`std::io::Write`]. Shared formatting rules (ratio precision, bin labels, column headers)
//! are kept in `common` so every format labels things the same way.

mod common;
mod console;
mod csv;
mod excel;
mod json;

pub use console::{
    generate_covariance as console_covariance, generate_distance as console_distance, generate_metrics as console_metrics,
};
pub use csv::{generate_covariance as csv_covariance, generate_distance as csv_distance, generate_metrics as csv_metrics};
pub use excel::generate as generate_xlsx;
pub use json::{generate_covariance as json_covariance, generate_distance as json_distance, generate_metrics as json_metrics};
