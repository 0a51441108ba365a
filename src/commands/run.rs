//! Command dispatch logic for evalog

use super::common::CommonArgs;
use super::{
    CovarianceArgs, DistanceArgs, ExtractArgs, InitArgs, MetricsArgs, extract_rows, init_config, report_covariance,
    report_distance, report_metrics,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use std::io::Write;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "evalog", version, author, long_about = None)]
#[command(about = "Flatten perception evaluation logs and report detection metrics")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: EvalogSubcommand,
}

#[derive(Subcommand, Debug)]
enum EvalogSubcommand {
    /// Flatten a folder of evaluation logs into a row table
    Extract(ExtractArgs),
    /// Compute per-category TP rate and mAP from a row table
    Metrics(MetricsArgs),
    /// Count rows per distance bin, by status or by category
    Distance(DistanceArgs),
    /// Pair pose covariances of estimated objects with their pose errors
    Covariance(CovarianceArgs),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// Usage errors, `--help` and `--version` are written to the host and end with
/// [`Host::exit`] rather than an error.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let message = e.render().to_string();
            if e.use_stderr() {
                let _ = write!(host.error(), "{message}");
            } else {
                let _ = write!(host.output(), "{message}");
            }
            host.exit(e.exit_code());
            return Ok(());
        }
    };

    match &cli.command {
        EvalogSubcommand::Extract(args) => extract_rows(host, &cli.common, args),
        EvalogSubcommand::Metrics(args) => report_metrics(host, &cli.common, args),
        EvalogSubcommand::Distance(args) => report_distance(host, &cli.common, args),
        EvalogSubcommand::Covariance(args) => report_covariance(host, &cli.common, args),
        EvalogSubcommand::Init(args) => init_config(host, args),
    }
}
