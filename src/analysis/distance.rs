use super::category::CategoryMapper;
use crate::Result;
use crate::ingest::ExtractedRow;
use ohno::bail;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum::{Display, EnumString};

/// What the columns of a [`DistanceAggregation`] are keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Detection status (`TP`, `FP`, `FN`, ...).
    Status,

    /// General category, including `unclassified`.
    Category,
}

/// Lower bound of the bin `distance` falls into: `floor(distance / bin_size) * bin_size`.
///
/// Returns `None` for distances that cannot be binned: NaN, infinite, or so large that the bin
/// index does not fit in an `i64`.
#[must_use]
pub fn bin_of(distance: f64, bin_size: f64) -> Option<f64> {
    bin_index(distance, bin_size).map(|index| bin_lower_bound(index, bin_size))
}

#[expect(clippy::cast_possible_truncation, reason = "Range is checked before the cast and the value is already floored")]
#[expect(clippy::cast_precision_loss, reason = "i64 bounds only serve as range limits")]
fn bin_index(distance: f64, bin_size: f64) -> Option<i64> {
    const LOWEST: f64 = i64::MIN as f64;
    const PAST_HIGHEST: f64 = i64::MAX as f64;

    let scaled = (distance / bin_size).floor();
    (LOWEST..PAST_HIGHEST).contains(&scaled).then(|| scaled as i64)
}

#[expect(clippy::cast_precision_loss, reason = "Bin indices are small integers")]
fn bin_lower_bound(index: i64, bin_size: f64) -> f64 {
    index as f64 * bin_size
}

/// Counts of rows per distance bin and column key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceAggregation {
    pub group_by: GroupBy,
    pub bin_size: f64,

    /// Observed column keys, sorted.
    pub columns: Vec<String>,

    /// Non-empty bins in ascending order.
    pub bins: Vec<DistanceBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceBin {
    pub lower_bound: f64,

    /// One count per entry of [`DistanceAggregation::columns`]; zero where nothing was observed.
    pub counts: Vec<u64>,
}

impl DistanceAggregation {
    /// Count for the bin starting at `lower_bound` and the column `key`.
    #[must_use]
    pub fn count(&self, lower_bound: f64, key: &str) -> u64 {
        let Some(column) = self.columns.iter().position(|c| c == key) else {
            return 0;
        };

        self.bins
            .iter()
            .find(|bin| (bin.lower_bound - lower_bound).abs() < f64::EPSILON * bin.lower_bound.abs().max(1.0))
            .map_or(0, |bin| bin.counts[column])
    }

    /// Total number of binned rows.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().flat_map(|bin| bin.counts.iter()).sum()
    }
}

/// Bins rows by `distance_from_ego`.
#[derive(Debug, Clone, Copy)]
pub struct DistanceAggregator {
    bin_size: f64,
}

impl DistanceAggregator {
    /// # Errors
    ///
    /// Returns an error if `bin_size` is not a positive finite number.
    pub fn new(bin_size: f64) -> Result<Self> {
        if !(bin_size.is_finite() && bin_size > 0.0) {
            bail!("distance bin size must be a positive number, got {bin_size}");
        }

        Ok(Self { bin_size })
    }

    #[must_use]
    pub const fn bin_size(&self) -> f64 {
        self.bin_size
    }

    /// Count rows per (bin, key).
    ///
    /// Rows without a usable distance are left out. In [`GroupBy::Status`] mode rows without a
    /// status (ego rows) are left out as well; in [`GroupBy::Category`] mode every binned row is
    /// counted, unclassified labels included.
    pub fn aggregate<'a>(
        &self,
        rows: impl IntoIterator<Item = &'a ExtractedRow>,
        group_by: GroupBy,
        mapper: &CategoryMapper,
    ) -> DistanceAggregation {
        let mut cells: BTreeMap<i64, BTreeMap<String, u64>> = BTreeMap::new();
        let mut columns = BTreeSet::new();
        let mut unbinned = 0_usize;

        for row in rows {
            let Some(index) = row.distance_from_ego.and_then(|d| bin_index(d, self.bin_size)) else {
                unbinned += 1;
                continue;
            };

            let key = match group_by {
                GroupBy::Status => match &row.status {
                    Some(status) => status.clone(),
                    None => {
                        unbinned += 1;
                        continue;
                    }
                },
                GroupBy::Category => mapper.category_of(&row.label).to_owned(),
            };

            let _ = columns.insert(key.clone());
            *cells.entry(index).or_default().entry(key).or_default() += 1;
        }

        log::debug!("Left {unbinned} row(s) out of the distance aggregation by {group_by}");

        let columns: Vec<String> = columns.into_iter().collect();
        let bins = cells
            .into_iter()
            .map(|(index, counts)| DistanceBin {
                lower_bound: bin_lower_bound(index, self.bin_size),
                counts: columns.iter().map(|c| counts.get(c).copied().unwrap_or(0)).collect(),
            })
            .collect();

        DistanceAggregation {
            group_by,
            bin_size: self.bin_size,
            columns,
            bins,
        }
    }
}
