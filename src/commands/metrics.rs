use super::Host;
use super::common::{CommonArgs, load_rows};
use crate::Result;
use crate::analysis::calculate_metrics;
use crate::reports::{console_metrics, csv_metrics, json_metrics};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct MetricsArgs {
    /// Row table written by `extract`
    #[arg(long, short = 'i', value_name = "PATH", default_value = "extracted_objects.csv")]
    pub input: Utf8PathBuf,

    /// Also write the metrics to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Also write the metrics to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,
}

/// Print per-category TP rate and mAP, optionally saving them as JSON or CSV.
pub fn report_metrics<H: Host>(host: &mut H, common: &CommonArgs, args: &MetricsArgs) -> Result<()> {
    let config = common.setup()?;
    let (rows, mapper) = load_rows(&args.input, &config)?;
    let metrics = calculate_metrics(&rows, &mapper);

    let mut console_output = String::new();
    console_metrics(&metrics, config.precision, common.use_colors(), &mut console_output)?;
    let _ = write!(host.output(), "{console_output}");

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        json_metrics(&metrics, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing '{filename}'"))?;
    }

    if let Some(filename) = &args.csv {
        let file = fs::File::create(filename).into_app_err_with(|| format!("creating '{filename}'"))?;
        csv_metrics(&metrics, config.precision, file)?;
    }

    Ok(())
}
