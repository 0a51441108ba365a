//! Command-line interface and orchestration for evalog
//!
//! This module implements the CLI commands and wires the ingest, analysis and
//! report modules together. It handles argument parsing, configuration
//! management, logging setup, and the high-level workflows.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **extract**: Read every log in a folder and write the flattened row table
//! - **metrics**: Compute per-category TP rate and mAP from a row table
//! - **distance**: Bin a row table by distance from ego and count per status or category
//! - **covariance**: Collect pose covariance samples of estimated objects
//! - **init**: Generate a default configuration file
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. Each handler:
//!
//! 1. Initializes logging and loads the configuration
//! 2. Reads its input (log folder or row table)
//! 3. Runs the analysis
//! 4. Writes the console report through the `Host`, and any requested report files
//!
//! All output meant for the user goes through the `Host` trait so the commands
//! can be driven from tests.

mod common;
mod config;
mod covariance;
mod distance;
mod extract;
mod host;
mod init;
mod metrics;
mod run;

pub use covariance::{CovarianceArgs, report_covariance};
pub use distance::{DistanceArgs, report_distance};
pub use extract::{ExtractArgs, extract_rows};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use metrics::{MetricsArgs, report_metrics};
pub use run::run;
