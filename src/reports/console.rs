use super::common::{self, Band};
use crate::Result;
use crate::analysis::{CovarianceSample, DistanceAggregation, MetricsResult};
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Write one `category: TPrate=…, mAP=…` line per category.
pub fn generate_metrics<W: Write>(metrics: &MetricsResult, precision: usize, use_colors: bool, writer: &mut W) -> Result<()> {
    writeln!(writer, "Metrics:")?;

    for (category, figures) in metrics {
        let tp_rate = colorize(common::format_ratio(figures.tp_rate, precision), figures.tp_rate, use_colors);
        let map = colorize(common::format_ratio(figures.map, precision), figures.map, use_colors);
        if use_colors {
            writeln!(writer, "{}: TPrate={tp_rate}, mAP={map}", category.bold())?;
        } else {
            writeln!(writer, "{category}: TPrate={tp_rate}, mAP={map}")?;
        }
    }

    Ok(())
}

/// Write a distance aggregation as an aligned table, one line per bin.
pub fn generate_distance<W: Write>(aggregation: &DistanceAggregation, use_colors: bool, writer: &mut W) -> Result<()> {
    let title = format!(
        "Rows by {} per {} m of distance from ego",
        aggregation.group_by,
        common::format_bin(aggregation.bin_size)
    );
    if use_colors {
        writeln!(writer, "{}", title.bold())?;
    } else {
        writeln!(writer, "{title}")?;
    }

    if aggregation.bins.is_empty() {
        writeln!(writer, "  (no rows with a distance)")?;
        return Ok(());
    }

    let header = common::distance_header(aggregation);
    let body: Vec<Vec<String>> = aggregation
        .bins
        .iter()
        .map(|bin| {
            core::iter::once(common::format_bin(bin.lower_bound))
                .chain(bin.counts.iter().map(ToString::to_string))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(column, name)| body.iter().map(|cells| cells[column].len()).chain([name.len()]).max().unwrap_or(0))
        .collect();

    let header_line = header
        .iter()
        .zip(&widths)
        .map(|(name, &width)| format!("{name:>width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    if use_colors {
        writeln!(writer, "  {}", header_line.underline())?;
    } else {
        writeln!(writer, "  {header_line}")?;
    }

    for cells in &body {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:>width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(writer, "  {line}")?;
    }

    Ok(())
}

/// Write a short summary of covariance samples: count and mean diagonal entries.
pub fn generate_covariance<W: Write>(samples: &[CovarianceSample], precision: usize, writer: &mut W) -> Result<()> {
    writeln!(writer, "Covariance samples: {}", samples.len())?;
    if samples.is_empty() {
        return Ok(());
    }

    #[expect(clippy::cast_precision_loss, reason = "Sample counts stay far below 2^52")]
    let count = samples.len() as f64;
    let mean = |value: fn(&CovarianceSample) -> f64| samples.iter().map(value).sum::<f64>() / count;

    writeln!(writer, "  mean covariance_x   = {:.precision$}", mean(|s| s.covariance_x))?;
    writeln!(writer, "  mean covariance_y   = {:.precision$}", mean(|s| s.covariance_y))?;
    writeln!(writer, "  mean covariance_yaw = {:.precision$}", mean(|s| s.covariance_yaw))?;
    Ok(())
}

fn colorize(text: String, value: f64, use_colors: bool) -> String {
    if !use_colors {
        return text;
    }

    match common::band(value) {
        Band::Good => text.green().to_string(),
        Band::Fair => text.yellow().to_string(),
        Band::Poor => text.red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CategoryMapper, CategoryMapping, DistanceAggregator, GroupBy, StatusCounts};
    use crate::ingest::ExtractedRow;

    fn metrics() -> MetricsResult {
        let mut metrics = MetricsResult::new();
        let _ = metrics.insert(
            "car".into(),
            StatusCounts {
                tp_rows: 4,
                fp_rows: 1,
                fn_rows: 1,
            }
            .metrics(),
        );
        let _ = metrics.insert("bike".into(), StatusCounts::default().metrics());
        metrics
    }

    #[test]
    fn test_metrics_no_colors() {
        let mut output = String::new();
        generate_metrics(&metrics(), 2, false, &mut output).unwrap();
        insta::assert_snapshot!(output, @"
        Metrics:
        bike: TPrate=0.00, mAP=0.00
        car: TPrate=0.67, mAP=0.67
        ");
    }

    #[test]
    fn test_metrics_precision() {
        let mut output = String::new();
        generate_metrics(&metrics(), 4, false, &mut output).unwrap();
        assert!(output.contains("car: TPrate=0.6667, mAP=0.6667"));
    }

    #[test]
    fn test_metrics_with_colors_keeps_text() {
        let mut output = String::new();
        generate_metrics(&metrics(), 2, true, &mut output).unwrap();
        assert!(output.contains("\u{1b}["));
        assert!(output.contains("0.67"));
        assert!(output.contains("car"));
    }

    #[test]
    fn test_empty_metrics() {
        let mut output = String::new();
        generate_metrics(&MetricsResult::new(), 2, false, &mut output).unwrap();
        assert_eq!(output, "Metrics:\n");
    }

    #[test]
    fn test_distance_table() {
        let rows: Vec<ExtractedRow> = [(3.0, "FN"), (23.4, "TP"), (25.0, "TP"), (21.0, "FP")]
            .into_iter()
            .map(|(distance, status)| ExtractedRow {
                distance_from_ego: Some(distance),
                status: Some(status.into()),
                ..ExtractedRow::default()
            })
            .collect();
        let aggregation = DistanceAggregator::new(10.0)
            .unwrap()
            .aggregate(&rows, GroupBy::Status, &CategoryMapper::new(&CategoryMapping::new()));

        let mut output = String::new();
        generate_distance(&aggregation, false, &mut output).unwrap();
        insta::assert_snapshot!(output, @"
        Rows by status per 10 m of distance from ego
          distance_bin  FN  FP  TP
                     0   1   0   0
                    20   0   1   2
        ");
    }

    #[test]
    fn test_empty_distance_table() {
        let aggregation = DistanceAggregator::new(5.0)
            .unwrap()
            .aggregate(&[], GroupBy::Category, &CategoryMapper::new(&CategoryMapping::new()));
        let mut output = String::new();
        generate_distance(&aggregation, false, &mut output).unwrap();
        assert!(output.contains("per 5 m"));
        assert!(output.contains("no rows with a distance"));
    }

    #[test]
    fn test_covariance_summary() {
        let sample = |x: f64| CovarianceSample {
            covariance_x: x,
            covariance_y: 2.0,
            covariance_yaw: 0.5,
            pose_error_x: None,
            pose_error_y: None,
            heading_error_z: None,
            bev_error: None,
            distance_from_ego: None,
            label: "car".into(),
        };
        let mut output = String::new();
        generate_covariance(&[sample(1.0), sample(3.0)], 2, &mut output).unwrap();
        assert!(output.starts_with("Covariance samples: 2\n"));
        assert!(output.contains("mean covariance_x   = 2.00"));
        assert!(output.contains("mean covariance_yaw = 0.50"));
    }
}
