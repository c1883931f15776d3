//! Tracing for turnreport.
//!
//! This crate provides:
//! - [`Tracer`] - Records parse and merge events with zero overhead when off
//! - [`TraceBuffer`] - Bounded history of recent records
//! - [`HumanFormatter`] / [`JsonFormatter`] - Output formats for stderr

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod trace;

pub use trace::{
    HumanFormatter, JsonFormatter, TraceBuffer, TraceBufferStats, TraceEvent, TraceFormatter,
    TraceOutput, TraceRecord, Tracer, TracerConfig,
};
