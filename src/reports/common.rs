//! Common utilities shared across report generators.

use crate::analysis::{CategoryMetrics, DistanceAggregation};

/// Name of the column holding bin lower bounds in tabular distance reports.
pub const DISTANCE_BIN_COLUMN: &str = "distance_bin";

/// Format a rate with a fixed number of decimals.
pub fn format_ratio(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

/// Format a bin lower bound without a trailing `.0` for whole numbers.
pub fn format_bin(lower_bound: f64) -> String {
    format!("{lower_bound}")
}

/// How good a rate is, for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Good,
    Fair,
    Poor,
}

pub fn band(value: f64) -> Band {
    if value >= 0.8 {
        Band::Good
    } else if value >= 0.5 {
        Band::Fair
    } else {
        Band::Poor
    }
}

/// Header cells of the metrics table.
pub const METRICS_COLUMNS: [&str; 6] = ["category", "TPrate", "mAP", "TP", "FP", "FN"];

/// Cells of one metrics table row, aligned with [`METRICS_COLUMNS`].
pub fn metrics_cells(category: &str, metrics: &CategoryMetrics, precision: usize) -> [String; 6] {
    [
        category.to_owned(),
        format_ratio(metrics.tp_rate, precision),
        format_ratio(metrics.map, precision),
        format!("{}", metrics.counts.true_positives()),
        metrics.counts.fp_rows.to_string(),
        metrics.counts.fn_rows.to_string(),
    ]
}

/// Header cells of the covariance sample table, in [`crate::analysis::CovarianceSample`] field order.
pub const COVARIANCE_COLUMNS: [&str; 9] = [
    "covariance_x",
    "covariance_y",
    "covariance_yaw",
    "pose_error_x",
    "pose_error_y",
    "heading_error_z",
    "bev_error",
    "distance_from_ego",
    "label",
];

/// Header cells of a distance table.
pub fn distance_header(aggregation: &DistanceAggregation) -> Vec<&str> {
    core::iter::once(DISTANCE_BIN_COLUMN)
        .chain(aggregation.columns.iter().map(String::as_str))
        .collect()
}
