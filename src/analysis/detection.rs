use super::category::{CategoryMapper, UNCLASSIFIED};
use crate::ingest::ExtractedRow;
use core::str::FromStr;
use serde::Serialize;
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// Detection outcome recorded for an object observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Status {
    #[strum(serialize = "TP")]
    TruePositive,

    #[strum(serialize = "FP")]
    FalsePositive,

    #[strum(serialize = "FN")]
    FalseNegative,
}

/// Raw status tallies for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Number of `TP` rows. Each match appears twice in the logs, once from the detection side and
    /// once from the ground-truth side.
    pub tp_rows: u64,
    pub fp_rows: u64,
    pub fn_rows: u64,
}

impl StatusCounts {
    pub fn record(&mut self, status: Option<&str>) {
        match status.map(Status::from_str) {
            Some(Ok(Status::TruePositive)) => self.tp_rows += 1,
            Some(Ok(Status::FalsePositive)) => self.fp_rows += 1,
            Some(Ok(Status::FalseNegative)) => self.fn_rows += 1,
            Some(Err(_)) | None => {}
        }
    }

    /// Matched pairs: the `TP` row count halved.
    ///
    /// This assumes every match is logged exactly twice. Logs that record a match once would be
    /// under-reported by half.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "Row counts stay far below 2^52")]
    pub fn true_positives(&self) -> f64 {
        self.tp_rows as f64 / 2.0
    }

    #[must_use]
    pub fn metrics(&self) -> CategoryMetrics {
        #[expect(clippy::cast_precision_loss, reason = "Row counts stay far below 2^52")]
        let (tp, fp, fn_) = (self.true_positives(), self.fp_rows as f64, self.fn_rows as f64);

        CategoryMetrics {
            tp_rate: ratio(tp, tp + fn_),
            map: ratio(tp, tp + fp),
            counts: *self,
        }
    }
}

/// Detection quality for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryMetrics {
    /// `TP / (TP + FN)`, or 0 when there are neither.
    pub tp_rate: f64,

    /// `TP / (TP + FP)`, or 0 when there are neither. This is precision, reported under the `mAP`
    /// name existing dashboards use; it is not averaged over confidence thresholds.
    pub map: f64,

    pub counts: StatusCounts,
}

/// Per-category metrics, ordered by category name.
pub type MetricsResult = BTreeMap<String, CategoryMetrics>;

/// Compute metrics for every category that has at least one row.
///
/// Rows whose label maps to no category are left out.
pub fn calculate_metrics<'a>(rows: impl IntoIterator<Item = &'a ExtractedRow>, mapper: &CategoryMapper) -> MetricsResult {
    let mut counts: BTreeMap<&str, StatusCounts> = BTreeMap::new();

    for row in rows {
        let category = mapper.category_of(&row.label);
        if category == UNCLASSIFIED {
            continue;
        }
        counts.entry(category).or_default().record(row.status.as_deref());
    }

    counts
        .into_iter()
        .map(|(category, counts)| (category.to_owned(), counts.metrics()))
        .collect()
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 { numerator / denominator } else { 0.0 }
}
