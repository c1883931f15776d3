//! Command line, configuration, batch parsing, and snapshots for turnreport.
//!
//! This crate provides:
//! - [`AdvisorConfig`] - TOML configuration with builder overrides
//! - [`parse_batch`] / [`merge_batch`] - Parallel parsing of many reports
//! - [`save_snapshot`] / [`load_snapshot`] - `MessagePack` turn snapshots
//! - The `turnreport` binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod batch;
pub mod config;
pub mod serialize;

pub use batch::{ParsedReport, ReportInput, merge_batch, parse_batch, read_inputs};
pub use config::{AdvisorConfig, TraceSettings};
pub use serialize::{load_snapshot, save_snapshot};
