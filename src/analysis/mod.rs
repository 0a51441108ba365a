//! Detection-quality figures computed over extracted rows
//!
//! # Implementation Model
//!
//! Raw labels are free text that differs between datasets (`car`, `vehicle.car`, ...). A
//! [`CategoryMapper`] built from a caller-supplied [`CategoryMapping`] folds them into a small
//! set of general categories; anything not listed becomes `unclassified`.
//!
//! On top of that:
//! - [`calculate_metrics`] tallies `TP`/`FP`/`FN` rows per category and derives the
//!   true-positive rate and the precision figure reported as `mAP`. Unclassified rows are
//!   excluded.
//! - [`DistanceAggregator`] bins rows by distance from the ego vehicle and counts them per
//!   status or per category. Unclassified rows are included here.
//! - [`covariance_samples`] pairs the diagonal of each estimate's pose covariance with its
//!   observed errors.
//!
//! All of these are pure functions of the row set; none of them depend on row order.

mod category;
mod covariance;
mod detection;
mod distance;

pub use category::{CategoryMapper, CategoryMapping, UNCLASSIFIED, overlapping_labels};
pub use covariance::{CovarianceSample, ESTIMATED_OBJECT_TYPE, covariance_samples};
pub use detection::{CategoryMetrics, MetricsResult, Status, StatusCounts, calculate_metrics};
pub use distance::{DistanceAggregation, DistanceAggregator, DistanceBin, GroupBy, bin_of};
