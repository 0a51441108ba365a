use super::Host;
use super::common::{CommonArgs, load_rows};
use crate::Result;
use crate::analysis::{DistanceAggregator, GroupBy, calculate_metrics};
use crate::reports::{console_distance, csv_distance, generate_xlsx, json_distance};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct DistanceArgs {
    /// Row table written by `extract`
    #[arg(long, short = 'i', value_name = "PATH", default_value = "extracted_objects.csv")]
    pub input: Utf8PathBuf,

    /// Count rows per `status` or per `category`
    #[arg(long, value_name = "KEY", default_value = "status")]
    pub by: GroupBy,

    /// Width of a distance bin in meters (overrides the configuration)
    #[arg(long, value_name = "METERS")]
    pub bin_size: Option<f64>,

    /// Write the table to a CSV file instead of to the terminal
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Write the table to a JSON file instead of to the terminal
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Write the table, along with the category metrics, to an Excel spreadsheet file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub excel: Option<Utf8PathBuf>,
}

/// Bin rows by distance from ego and count them per status or category.
pub fn report_distance<H: Host>(host: &mut H, common: &CommonArgs, args: &DistanceArgs) -> Result<()> {
    let config = common.setup()?;
    let aggregator = DistanceAggregator::new(args.bin_size.unwrap_or(config.bin_size))?;
    let (rows, mapper) = load_rows(&args.input, &config)?;
    let aggregation = aggregator.aggregate(&rows, args.by, &mapper);

    if let Some(filename) = &args.csv {
        let file = fs::File::create(filename).into_app_err_with(|| format!("creating '{filename}'"))?;
        csv_distance(&aggregation, file)?;
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        json_distance(&aggregation, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing '{filename}'"))?;
    }

    if let Some(filename) = &args.excel {
        let metrics = calculate_metrics(&rows, &mapper);
        let mut file = fs::File::create(filename).into_app_err_with(|| format!("creating '{filename}'"))?;
        generate_xlsx(&metrics, &[&aggregation], config.precision, &mut file)?;
    }

    if args.csv.is_none() && args.json.is_none() && args.excel.is_none() {
        let mut console_output = String::new();
        console_distance(&aggregation, common.use_colors(), &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    Ok(())
}
