//! Pairing of reported pose uncertainty with observed pose error.
//!
//! `pose_covariance` is a row-major 6×6 matrix over (x, y, z, roll, pitch, yaw). A well
//! calibrated estimator reports larger variances where its errors are larger; the samples
//! produced here are what an error-versus-covariance scatter plot is drawn from.

use crate::ingest::ExtractedRow;
use serde::Serialize;

/// Object type of rows produced by the estimator (as opposed to ground truth).
pub const ESTIMATED_OBJECT_TYPE: &str = "EST";

/// Index of the x variance in a flattened 6×6 covariance.
pub const COVARIANCE_X_INDEX: usize = 0;

/// Index of the y variance in a flattened 6×6 covariance.
pub const COVARIANCE_Y_INDEX: usize = 7;

/// Index of the yaw variance in a flattened 6×6 covariance.
pub const COVARIANCE_YAW_INDEX: usize = 35;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CovarianceSample {
    pub covariance_x: f64,
    pub covariance_y: f64,
    pub covariance_yaw: f64,
    pub pose_error_x: Option<f64>,
    pub pose_error_y: Option<f64>,
    pub heading_error_z: Option<f64>,
    pub bev_error: Option<f64>,
    pub distance_from_ego: Option<f64>,
    pub label: String,
}

impl CovarianceSample {
    /// Build a sample from an estimated-object row, if its covariance has the diagonal entries.
    #[must_use]
    pub fn from_row(row: &ExtractedRow) -> Option<Self> {
        let covariance = &row.pose_covariance;
        let (Some(&x), Some(&y), Some(&yaw)) = (
            covariance.get(COVARIANCE_X_INDEX),
            covariance.get(COVARIANCE_Y_INDEX),
            covariance.get(COVARIANCE_YAW_INDEX),
        ) else {
            return None;
        };

        Some(Self {
            covariance_x: x,
            covariance_y: y,
            covariance_yaw: yaw,
            pose_error_x: row.pose_error_x,
            pose_error_y: row.pose_error_y,
            heading_error_z: row.heading_error_z,
            bev_error: row.bev_error,
            distance_from_ego: row.distance_from_ego,
            label: row.label.clone(),
        })
    }
}

/// Collect covariance samples from estimated objects, optionally restricted to one raw label.
///
/// Rows without a covariance are ignored; rows whose covariance is too short to hold a 6×6
/// matrix are ignored with a debug log.
pub fn covariance_samples<'a>(rows: impl IntoIterator<Item = &'a ExtractedRow>, label: Option<&str>) -> Vec<CovarianceSample> {
    rows.into_iter()
        .filter(|row| row.object_type == ESTIMATED_OBJECT_TYPE)
        .filter(|row| label.is_none_or(|wanted| row.label == wanted))
        .filter(|row| !row.pose_covariance.is_empty())
        .filter_map(|row| {
            let sample = CovarianceSample::from_row(row);
            if sample.is_none() {
                log::debug!(
                    "Ignoring covariance with {} entries for label '{}'",
                    row.pose_covariance.len(),
                    row.label
                );
            }
            sample
        })
        .collect()
}
