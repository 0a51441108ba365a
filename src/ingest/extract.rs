//! Flattening of raw log records into [`ExtractedRow`]s.
//!
//! A record looks roughly like this (fields trimmed):
//!
//! ```text
//! {
//!   "Frame": {
//!     "Ego": {"TransformStamped": {"header": {"stamp": {"sec": 1606799233, "nanosec": 249851000}},
//!             "transform": {"translation": {"x": .., "y": .., "z": ..},
//!                           "rotation": {"x": .., "y": .., "z": .., "w": ..}}}},
//!     "criteria0": {"Objects": [{"status": "TP", "label": "car", "position": {..}, ..}]}
//!   },
//!   "Result": {"Success": "true"},
//!   "Stamp": {"ROS": 1606799233.25}
//! }
//! ```

use super::coerce::{get_path, safe_get, to_boolean, to_float, to_numeric_list, to_text};
use super::row::{EGO_OBJECT_TYPE, ExtractedRow};
use serde_json::Value;

const UNKNOWN: &str = "Unknown";

/// Build the ego row of a frame, if the frame carries a usable stamp.
///
/// The frame contributes no ego row when `Ego.TransformStamped.header.stamp` is missing or
/// empty, or when the stamp has no numeric `sec`.
#[must_use]
pub fn extract_ego(frame: &Value, frame_success: bool) -> Option<ExtractedRow> {
    let transform_stamped = get_path(Some(frame), &["Ego", "TransformStamped"]);
    let stamp = get_path(transform_stamped, &["header", "stamp"]).filter(|stamp| !is_empty(stamp))?;

    let Some(sec) = to_float(safe_get(Some(stamp), "sec")) else {
        log::debug!("Skipping ego entry with a stamp lacking 'sec': {stamp}");
        return None;
    };
    let nanosec = to_float(safe_get(Some(stamp), "nanosec")).unwrap_or(0.0);
    #[expect(clippy::suboptimal_flops, reason = "Matches the plain sum used by the recording pipeline")]
    let timestamp = sec + nanosec * 1e-9;

    let transform = safe_get(transform_stamped, "transform");
    let translation = safe_get(transform, "translation");
    let rotation = safe_get(transform, "rotation");

    Some(ExtractedRow {
        timestamp: Some(timestamp),
        object_type: EGO_OBJECT_TYPE.to_owned(),
        position_x: to_float(safe_get(translation, "x")),
        position_y: to_float(safe_get(translation, "y")),
        position_z: to_float(safe_get(translation, "z")),
        orientation_x: to_float(safe_get(rotation, "x")),
        orientation_y: to_float(safe_get(rotation, "y")),
        orientation_z: to_float(safe_get(rotation, "z")),
        orientation_w: to_float(safe_get(rotation, "w")),
        frame_success,
        ..ExtractedRow::default()
    })
}

/// Build the row for one entry of `criteria0.Objects`.
#[must_use]
pub fn extract_object(object: &Value, timestamp: Option<f64>, frame_success: bool) -> ExtractedRow {
    let obj = Some(object);
    let field = |sub: &str, axis: &str| to_float(safe_get(safe_get(obj, sub), axis));

    ExtractedRow {
        timestamp,
        object_type: to_text(safe_get(obj, "object_type")).unwrap_or_else(|| UNKNOWN.to_owned()),
        status: Some(
            to_text(safe_get(obj, "status"))
                .filter(|status| !status.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_owned()),
        ),
        label: to_text(safe_get(obj, "label")).unwrap_or_default(),
        distance_from_ego: to_float(safe_get(obj, "distance_from_ego")),
        position_x: field("position", "x"),
        position_y: field("position", "y"),
        position_z: field("position", "z"),
        velocity_x: field("velocity", "x"),
        velocity_y: field("velocity", "y"),
        velocity_z: field("velocity", "z"),
        orientation_x: field("orientation", "x"),
        orientation_y: field("orientation", "y"),
        orientation_z: field("orientation", "z"),
        orientation_w: field("orientation", "w"),
        pose_error_x: field("pose_error", "x"),
        pose_error_y: field("pose_error", "y"),
        pose_error_z: field("pose_error", "z"),
        heading_error_z: field("heading_error", "z"),
        velocity_error_x: field("velocity_error", "x"),
        velocity_error_y: field("velocity_error", "y"),
        bev_error: to_float(safe_get(obj, "bev_error")),
        pose_covariance: to_numeric_list(safe_get(obj, "pose_covariance")),
        twist_covariance: to_numeric_list(safe_get(obj, "twist_covariance")),
        frame_success,
    }
}

/// Flatten one record: the ego row first (when present), then one row per object in list order.
///
/// Records without a non-empty `Frame` object produce no rows. The record-level success flag and
/// ROS stamp are shared by every row of the record.
#[must_use]
pub fn extract_frame(record: &Value) -> Vec<ExtractedRow> {
    let Some(frame) = safe_get(Some(record), "Frame").filter(|frame| frame.is_object() && !is_empty(frame)) else {
        return Vec::new();
    };

    let frame_success = to_boolean(get_path(Some(record), &["Result", "Success"]));
    let timestamp = to_float(get_path(Some(record), &["Stamp", "ROS"]));

    let objects = get_path(Some(frame), &["criteria0", "Objects"])
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice);

    let mut rows = Vec::with_capacity(objects.len() + 1);
    rows.extend(extract_ego(frame, frame_success));
    rows.extend(objects.iter().map(|object| extract_object(object, timestamp, frame_success)));
    rows
}

/// Flatten every record, preserving input order.
pub fn extract_all<'a>(records: impl IntoIterator<Item = &'a Value>) -> Vec<ExtractedRow> {
    records.into_iter().flat_map(extract_frame).collect()
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
