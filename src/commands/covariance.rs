use super::Host;
use super::common::{CommonArgs, load_rows};
use crate::Result;
use crate::analysis::covariance_samples;
use crate::reports::{console_covariance, csv_covariance, json_covariance};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct CovarianceArgs {
    /// Row table written by `extract`
    #[arg(long, short = 'i', value_name = "PATH", default_value = "extracted_objects.csv")]
    pub input: Utf8PathBuf,

    /// Only use estimated objects with this raw label
    #[arg(long, value_name = "LABEL")]
    pub label: Option<String>,

    /// Write the samples to a CSV file
    #[arg(long, short = 'o', value_name = "PATH", help_heading = "Report Output")]
    pub output: Option<Utf8PathBuf>,

    /// Write the samples to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,
}

/// Pair the pose covariance diagonal of estimated objects with their pose errors.
pub fn report_covariance<H: Host>(host: &mut H, common: &CommonArgs, args: &CovarianceArgs) -> Result<()> {
    let config = common.setup()?;
    let (rows, _) = load_rows(&args.input, &config)?;
    let samples = covariance_samples(&rows, args.label.as_deref());

    if let Some(filename) = &args.output {
        let file = fs::File::create(filename).into_app_err_with(|| format!("creating '{filename}'"))?;
        csv_covariance(&samples, file)?;
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        json_covariance(&samples, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing '{filename}'"))?;
    }

    let mut console_output = String::new();
    console_covariance(&samples, config.precision, &mut console_output)?;
    let _ = write!(host.output(), "{console_output}");
    Ok(())
}
