use super::coerce::parse_numeric_list;
use serde::{Deserialize, Serialize};

/// Column names of the row table, in output order.
pub const COLUMNS: [&str; 25] = [
    "timestamp",
    "object_type",
    "status",
    "label",
    "distance_from_ego",
    "position_x",
    "position_y",
    "position_z",
    "velocity_x",
    "velocity_y",
    "velocity_z",
    "orientation_x",
    "orientation_y",
    "orientation_z",
    "orientation_w",
    "pose_error_x",
    "pose_error_y",
    "pose_error_z",
    "heading_error_z",
    "velocity_error_x",
    "velocity_error_y",
    "bev_error",
    "pose_covariance",
    "twist_covariance",
    "frame_success",
];

/// The `object_type` given to rows describing the observing vehicle.
pub const EGO_OBJECT_TYPE: &str = "Ego";

/// One flattened observation: either the ego vehicle or a single evaluated object.
///
/// Every row carries the full field set. Missing numbers are `None`, missing labels are empty
/// strings and missing covariances are empty lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedRow {
    pub timestamp: Option<f64>,
    pub object_type: String,
    pub status: Option<String>,
    #[serde(default)]
    pub label: String,
    pub distance_from_ego: Option<f64>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub position_z: Option<f64>,
    pub velocity_x: Option<f64>,
    pub velocity_y: Option<f64>,
    pub velocity_z: Option<f64>,
    pub orientation_x: Option<f64>,
    pub orientation_y: Option<f64>,
    pub orientation_z: Option<f64>,
    pub orientation_w: Option<f64>,
    pub pose_error_x: Option<f64>,
    pub pose_error_y: Option<f64>,
    pub pose_error_z: Option<f64>,
    pub heading_error_z: Option<f64>,
    pub velocity_error_x: Option<f64>,
    pub velocity_error_y: Option<f64>,
    pub bev_error: Option<f64>,
    #[serde(with = "numeric_list")]
    pub pose_covariance: Vec<f64>,
    #[serde(with = "numeric_list")]
    pub twist_covariance: Vec<f64>,
    #[serde(deserialize_with = "lenient_bool")]
    pub frame_success: bool,
}

impl ExtractedRow {
    #[must_use]
    pub fn is_ego(&self) -> bool {
        self.object_type == EGO_OBJECT_TYPE
    }
}

/// Covariance lists are stored in a single cell as `[a, b, c]`.
mod numeric_list {
    use super::parse_numeric_list;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let body = values.iter().map(|v| format!("{v:?}")).collect::<Vec<_>>().join(", ");
        serializer.serialize_str(&format!("[{body}]"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(parse_numeric_list(&text).unwrap_or_else(|| {
            log::warn!("Failed to decode covariance: {text}");
            Vec::new()
        }))
    }
}

/// Accepts `true`/`True`/`TRUE`; anything else, including an empty cell, is `false`.
fn lenient_bool<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let text = String::deserialize(deserializer)?;
    Ok(text.trim().eq_ignore_ascii_case("true"))
}
