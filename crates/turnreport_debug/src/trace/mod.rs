//! Tracing system for turnreport.
//!
//! Records what the parser and merge engine did with zero overhead when
//! disabled. Supports both human-readable and JSON output formats.
//!
//! # Example
//!
//! ```text
//! $ turnreport parse --trace turn-12.rep
//! R001       41us === turn-12.rep START ===
//! R001       63us   >> header @1
//! R001      102us   << header @3
//! R001    1.204ms   >> regions @40
//! R001    1.871ms     REGION (49,17) units=3 structures=1
//! ```

pub mod buffer;
pub mod format;
pub mod record;

pub use buffer::{TraceBuffer, TraceBufferStats};
pub use format::{HumanFormatter, JsonFormatter, TraceFormatter};
pub use record::{TraceEvent, TraceRecord};

use std::io::Write;
use std::time::Instant;

/// Destination for records as they are made.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceOutput {
    /// Keep records in the buffer only.
    #[default]
    None,
    /// Also print each record to stderr.
    Stderr,
}

// =============================================================================
// Tracer Configuration
// =============================================================================

/// Settings for a [`Tracer`].
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Record anything at all.
    pub enabled: bool,
    /// Ring buffer capacity in records.
    pub buffer_size: usize,
    /// Where records go besides the buffer.
    pub output: TraceOutput,
    /// Print JSON lines instead of the human format.
    pub json_format: bool,
    /// Event types to keep; empty keeps every type.
    pub event_filter: Vec<String>,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 10_000,
            output: TraceOutput::None,
            json_format: false,
            event_filter: Vec::new(),
        }
    }
}

impl TracerConfig {
    /// A disabled configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns recording on.
    #[must_use]
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Sets the ring buffer capacity.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Prints records to stderr as they are made.
    #[must_use]
    pub fn to_stderr(mut self) -> Self {
        self.output = TraceOutput::Stderr;
        self
    }

    /// Prints JSON lines.
    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Keeps only the named event types.
    #[must_use]
    pub fn filter_events(mut self, types: Vec<String>) -> Self {
        self.event_filter = types;
        self
    }

    fn keeps(&self, event: &TraceEvent) -> bool {
        self.event_filter.is_empty() || self.event_filter.iter().any(|t| t == event.event_type())
    }
}

// =============================================================================
// Tracer
// =============================================================================

/// Records parse and merge events.
///
/// Every method returns at once when tracing is off. Records are numbered
/// by report: each `report_start` begins a new report.
pub struct Tracer {
    config: TracerConfig,
    buffer: TraceBuffer,
    current_report: u64,
    started: Instant,
    human: HumanFormatter,
    json: JsonFormatter,
}

impl Tracer {
    /// Creates a tracer from its settings.
    #[must_use]
    pub fn new(config: TracerConfig) -> Self {
        Self {
            buffer: TraceBuffer::new(config.buffer_size),
            config,
            current_report: 0,
            started: Instant::now(),
            human: HumanFormatter::new().with_timestamps(),
            json: JsonFormatter::new(),
        }
    }

    /// A tracer that records nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(TracerConfig::default())
    }

    /// Whether events are recorded.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Sequence number of the report being traced (0 before the first).
    #[must_use]
    pub fn current_report(&self) -> u64 {
        self.current_report
    }

    /// Records an event if tracing is on and the filter keeps it.
    #[inline]
    pub fn record(&mut self, event: TraceEvent) {
        if self.config.enabled && self.config.keeps(&event) {
            self.push(event);
        }
    }

    fn push(&mut self, event: TraceEvent) {
        let elapsed = u64::try_from(self.started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.buffer.push(self.current_report, elapsed, event);
        if self.config.output != TraceOutput::Stderr {
            return;
        }
        if let Some(record) = self.buffer.last() {
            let line = self.format_record(record);
            let _ = writeln!(std::io::stderr(), "{line}");
        }
    }

    /// Renders a record in the configured format.
    #[must_use]
    pub fn format_record(&self, record: &TraceRecord) -> String {
        if self.config.json_format {
            self.json.format(record)
        } else {
            self.human.format(record)
        }
    }

    /// Records kept so far.
    #[must_use]
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Event counts over the buffer.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        self.buffer.stats()
    }

    // -------------------------------------------------------------------------
    // Convenience methods for common events
    // -------------------------------------------------------------------------

    /// Starts a new report and records its start event.
    #[inline]
    pub fn report_start(&mut self, source: &str) {
        self.current_report += 1;
        if self.config.enabled {
            self.record(TraceEvent::ReportStart {
                source: source.to_string(),
            });
        }
    }

    /// Records a report end event.
    #[inline]
    pub fn report_end(&mut self, source: &str, lines: usize, success: bool) {
        if self.config.enabled {
            self.record(TraceEvent::ReportEnd {
                source: source.to_string(),
                lines,
                success,
            });
        }
    }

    /// Records a section enter event.
    #[inline]
    pub fn section_enter(&mut self, section: &str, line: usize) {
        if self.config.enabled {
            self.record(TraceEvent::SectionEnter {
                section: section.to_string(),
                line,
            });
        }
    }

    /// Records a section leave event.
    #[inline]
    pub fn section_leave(&mut self, section: &str, line: usize) {
        if self.config.enabled {
            self.record(TraceEvent::SectionLeave {
                section: section.to_string(),
                line,
            });
        }
    }

    /// Records a skipped block, keeping at most 40 characters of its text.
    #[inline]
    pub fn block_skipped(&mut self, line: usize, text: &str) {
        if self.config.enabled {
            self.record(TraceEvent::BlockSkipped {
                line,
                text: text.chars().take(40).collect(),
            });
        }
    }

    /// Records a parsed region.
    #[inline]
    pub fn region_parsed(&mut self, coords: &dyn std::fmt::Display, units: usize, structures: usize) {
        if self.config.enabled {
            self.record(TraceEvent::RegionParsed {
                coords: coords.to_string(),
                units,
                structures,
            });
        }
    }

    /// Records a region added by a merge.
    #[inline]
    pub fn merge_region_added(&mut self, coords: &dyn std::fmt::Display) {
        if self.config.enabled {
            self.record(TraceEvent::MergeRegionAdded {
                coords: coords.to_string(),
            });
        }
    }

    /// Records a region merged into an existing one.
    #[inline]
    pub fn merge_region_merged(&mut self, coords: &dyn std::fmt::Display) {
        if self.config.enabled {
            self.record(TraceEvent::MergeRegionMerged {
                coords: coords.to_string(),
            });
        }
    }

    /// Records a unit updated in place by a merge.
    #[inline]
    pub fn merge_unit_updated(&mut self, unit: u32, coords: &dyn std::fmt::Display) {
        if self.config.enabled {
            self.record(TraceEvent::MergeUnitUpdated {
                unit,
                coords: coords.to_string(),
            });
        }
    }

    /// Records a finished batch job.
    #[inline]
    pub fn batch_report_done(&mut self, source: &str, elapsed_ms: u64, success: bool) {
        if self.config.enabled {
            self.record(TraceEvent::BatchReportDone {
                source: source.to_string(),
                elapsed_ms,
                success,
            });
        }
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}

// =============================================================================
// Tests
// =============================================================================
