use crate::Result;
use crate::analysis::{CovarianceSample, DistanceAggregation, MetricsResult};
use core::fmt::Write;
use serde_json::json;

#[expect(unused_results, reason = "Map::insert return values are not needed")]
pub fn generate_metrics<W: Write>(metrics: &MetricsResult, writer: &mut W) -> Result<()> {
    let mut categories = serde_json::Map::new();
    for (category, figures) in metrics {
        categories.insert(
            category.clone(),
            json!({
                "TPrate": figures.tp_rate,
                "mAP": figures.map,
                "TP": figures.counts.true_positives(),
                "FP": figures.counts.fp_rows,
                "FN": figures.counts.fn_rows,
            }),
        );
    }

    let output = json!({ "metrics": categories });
    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

pub fn generate_distance<W: Write>(aggregation: &DistanceAggregation, writer: &mut W) -> Result<()> {
    let bins: Vec<_> = aggregation
        .bins
        .iter()
        .map(|bin| {
            let counts: serde_json::Map<_, _> = aggregation
                .columns
                .iter()
                .zip(&bin.counts)
                .map(|(column, count)| (column.clone(), json!(count)))
                .collect();
            json!({ "lower_bound": bin.lower_bound, "counts": counts })
        })
        .collect();

    let output = json!({
        "group_by": aggregation.group_by,
        "bin_size": aggregation.bin_size,
        "bins": bins,
    });
    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

pub fn generate_covariance<W: Write>(samples: &[CovarianceSample], writer: &mut W) -> Result<()> {
    write!(writer, "{}", serde_json::to_string_pretty(&json!({ "samples": samples }))?)?;
    Ok(())
}
