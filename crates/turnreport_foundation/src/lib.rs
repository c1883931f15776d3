//! Core types for turnreport.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with line context
//! - [`model`] - The structured report model (regions, units, structures, ...)
//! - [`sink`] - The streaming structured-output sink abstraction
//! - [`CancelFlag`] - Cooperative cancellation shared with batch jobs

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cancel;
pub mod error;
pub mod model;
pub mod sink;

pub use cancel::CancelFlag;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use model::{
    Amount, Coords, Direction, EntityRef, FactionRef, Item, Region, Report, Skill, Structure, Unit,
};
pub use sink::{JsonSink, ReportSink, Scalar, ValueSink, emit};
