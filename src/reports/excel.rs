use super::common;
use crate::Result;
use crate::analysis::{DistanceAggregation, MetricsResult};
use rust_xlsxwriter::{Color, DocProperties, Format, FormatAlign, Workbook, Worksheet};
use std::io::Write;

/// Write a workbook with a metrics sheet and one sheet per distance aggregation.
#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
#[expect(clippy::cast_precision_loss, reason = "Row counts stay far below 2^52")]
pub fn generate<W: Write>(
    metrics: &MetricsResult,
    aggregations: &[&DistanceAggregation],
    precision: usize,
    writer: &mut W,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_author("evalog");
    workbook.set_properties(&properties);

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x00FE_D7AA))
        .set_align(FormatAlign::Center);
    let ratio_format = Format::new().set_num_format(format!("0.{}", "0".repeat(precision.max(1))));

    let worksheet = workbook.add_worksheet().set_name("Metrics")?;
    write_header(worksheet, &common::METRICS_COLUMNS, &header_format)?;
    for (index, (category, figures)) in metrics.iter().enumerate() {
        let row = row_number(index)?;
        worksheet.write_string(row, 0, category)?;
        worksheet.write_number_with_format(row, 1, figures.tp_rate, &ratio_format)?;
        worksheet.write_number_with_format(row, 2, figures.map, &ratio_format)?;
        worksheet.write_number(row, 3, figures.counts.true_positives())?;
        worksheet.write_number(row, 4, figures.counts.fp_rows as f64)?;
        worksheet.write_number(row, 5, figures.counts.fn_rows as f64)?;
    }
    worksheet.set_freeze_panes(1, 1)?;
    worksheet.autofit();

    for aggregation in aggregations {
        let worksheet = workbook.add_worksheet().set_name(format!("By {}", aggregation.group_by))?;
        write_header(worksheet, &common::distance_header(aggregation), &header_format)?;
        for (index, bin) in aggregation.bins.iter().enumerate() {
            let row = row_number(index)?;
            worksheet.write_number(row, 0, bin.lower_bound)?;
            for (column, &count) in bin.counts.iter().enumerate() {
                worksheet.write_number(row, column_number(column + 1)?, count as f64)?;
            }
        }
        worksheet.set_freeze_panes(1, 1)?;
        worksheet.autofit();
    }

    let buffer = workbook.save_to_buffer()?;
    writer.write_all(&buffer)?;
    Ok(())
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn write_header(worksheet: &mut Worksheet, names: &[&str], format: &Format) -> Result<()> {
    for (column, name) in names.iter().enumerate() {
        worksheet.write_string_with_format(0, column_number(column)?, *name, format)?;
    }
    Ok(())
}

/// Worksheet row for the `index`-th data row, below the header.
fn row_number(index: usize) -> Result<u32> {
    Ok(u32::try_from(index + 1)?)
}

fn column_number(index: usize) -> Result<u16> {
    Ok(u16::try_from(index)?)
}
