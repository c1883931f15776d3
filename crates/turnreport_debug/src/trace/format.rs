//! Trace output formatters.
//!
//! One line per record, either for people reading stderr or as JSON lines.

use std::fmt::Write;

use super::record::{TraceEvent, TraceRecord};

/// Renders a trace record as one line.
pub trait TraceFormatter {
    /// Formats a single record.
    fn format(&self, record: &TraceRecord) -> String;
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// `R002   1.500ms     REGION (49,17) units=3 structures=1`
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Include the time since the tracer started.
    pub show_timestamps: bool,
}

impl HumanFormatter {
    /// Creates a formatter without timestamps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows elapsed time on every line.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }
}

#[allow(clippy::cast_precision_loss)]
fn elapsed(ns: u64) -> String {
    let us = ns / 1000;
    match us {
        1_000_000.. => format!("{:.3}s", us as f64 / 1_000_000.0),
        1000.. => format!("{:.3}ms", us as f64 / 1000.0),
        _ => format!("{us}us"),
    }
}

fn status(success: bool) -> &'static str {
    if success { "OK" } else { "FAILED" }
}

fn describe(event: &TraceEvent) -> String {
    match event {
        TraceEvent::ReportStart { source } => format!("=== {source} START ==="),
        TraceEvent::ReportEnd {
            source,
            lines,
            success,
        } => format!("=== {source} END ({}, {lines} lines) ===", status(*success)),
        TraceEvent::SectionEnter { section, line } => format!("  >> {section} @{line}"),
        TraceEvent::SectionLeave { section, line } => format!("  << {section} @{line}"),
        TraceEvent::BlockSkipped { line, text } => format!("  SKIP @{line} {text:?}"),
        TraceEvent::RegionParsed {
            coords,
            units,
            structures,
        } => format!("    REGION {coords} units={units} structures={structures}"),
        TraceEvent::MergeRegionAdded { coords } => format!("  ADD {coords}"),
        TraceEvent::MergeRegionMerged { coords } => format!("  MERGE {coords}"),
        TraceEvent::MergeUnitUpdated { unit, coords } => format!("    UNIT {unit} in {coords}"),
        TraceEvent::BatchReportDone {
            source,
            elapsed_ms,
            success,
        } => format!("  DONE {source} {elapsed_ms}ms ({})", status(*success)),
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let mut line = format!("R{:03} ", record.report);
        if self.show_timestamps {
            let _ = write!(line, "{:>10} ", elapsed(record.timestamp_ns));
        }
        line.push_str(&describe(&record.event));
        line
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

/// Formats each record as a compact JSON object.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Creates a JSON formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TraceFormatter for JsonFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        // Records hold only strings and integers.
        serde_json::to_string(record).unwrap_or_default()
    }
}
