#![doc(hidden)]

//! Core library for evalog
//!
//! This library turns per-frame perception evaluation logs (one JSON object per line) into a
//! uniform table of object observations, and computes detection-quality figures over that table.
//!
//! # Module Organization
//!
//! - [`ingest`]: Log discovery, field coercion, row extraction and the row table
//! - [`analysis`]: Category mapping, detection metrics, distance binning and covariance samples
//! - [`reports`]: Console, CSV, JSON and Excel renderings of analysis results
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod analysis;
pub mod ingest;
pub mod reports;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub use crate::commands::{Host, run};
