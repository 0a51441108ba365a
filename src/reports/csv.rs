use super::common;
use crate::Result;
use crate::analysis::{CovarianceSample, DistanceAggregation, MetricsResult};
use std::io::Write;

pub fn generate_metrics<W: Write>(metrics: &MetricsResult, precision: usize, writer: W) -> Result<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(common::METRICS_COLUMNS)?;
    for (category, figures) in metrics {
        csv.write_record(common::metrics_cells(category, figures, precision))?;
    }
    csv.flush()?;
    Ok(())
}

/// One row per bin, one column per status or category.
pub fn generate_distance<W: Write>(aggregation: &DistanceAggregation, writer: W) -> Result<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(common::distance_header(aggregation))?;
    for bin in &aggregation.bins {
        let cells = core::iter::once(common::format_bin(bin.lower_bound)).chain(bin.counts.iter().map(ToString::to_string));
        csv.write_record(cells)?;
    }
    csv.flush()?;
    Ok(())
}

/// One row per sample; missing errors are left empty. The header is written even without samples.
pub fn generate_covariance<W: Write>(samples: &[CovarianceSample], writer: W) -> Result<()> {
    let mut csv = ::csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(common::COVARIANCE_COLUMNS)?;
    for sample in samples {
        csv.serialize(sample)?;
    }
    csv.flush()?;
    Ok(())
}
