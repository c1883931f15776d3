//! Trace event and record types.
//!
//! This module defines the events recorded while reports are parsed and
//! merged.

use serde::Serialize;

// =============================================================================
// Trace Event
// =============================================================================

/// Events that can be traced during parsing and merging.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TraceEvent {
    /// A report parse has started.
    ReportStart {
        /// Report name (usually a file path).
        source: String,
    },

    /// A report parse has ended.
    ReportEnd {
        /// Report name.
        source: String,
        /// Last source line read.
        lines: usize,
        /// Whether the parse completed without error.
        success: bool,
    },

    /// A top-level section was entered.
    SectionEnter {
        /// Section name.
        section: String,
        /// Line of the section's first block.
        line: usize,
    },

    /// A top-level section was left.
    SectionLeave {
        /// Section name.
        section: String,
        /// Line of the section's last block.
        line: usize,
    },

    /// A block outside every known section was skipped.
    BlockSkipped {
        /// Line of the skipped block.
        line: usize,
        /// Start of the block's text.
        text: String,
    },

    /// A region was fully parsed.
    RegionParsed {
        /// Region coordinates as printed.
        coords: String,
        /// Units in the region, nested ones included.
        units: usize,
        /// Structures in the region.
        structures: usize,
    },

    /// A region new to the primary document was added by a merge.
    MergeRegionAdded {
        /// Region coordinates.
        coords: String,
    },

    /// A region present in both documents was merged.
    MergeRegionMerged {
        /// Region coordinates.
        coords: String,
    },

    /// A unit already in the primary document was updated.
    MergeUnitUpdated {
        /// Unit number.
        unit: u32,
        /// Region coordinates.
        coords: String,
    },

    /// A batch job finished one report.
    BatchReportDone {
        /// Report name.
        source: String,
        /// Wall time spent on the report.
        elapsed_ms: u64,
        /// Whether the report parsed.
        success: bool,
    },
}

impl TraceEvent {
    /// Returns a short name for the event type.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReportStart { .. } => "report-start",
            Self::ReportEnd { .. } => "report-end",
            Self::SectionEnter { .. } => "section-enter",
            Self::SectionLeave { .. } => "section-leave",
            Self::BlockSkipped { .. } => "block-skipped",
            Self::RegionParsed { .. } => "region-parsed",
            Self::MergeRegionAdded { .. } => "merge-region-added",
            Self::MergeRegionMerged { .. } => "merge-region-merged",
            Self::MergeUnitUpdated { .. } => "merge-unit-updated",
            Self::BatchReportDone { .. } => "batch-report-done",
        }
    }
}

// =============================================================================
// Trace Record
// =============================================================================

/// A timestamped trace record.
#[derive(Clone, Debug, Serialize)]
pub struct TraceRecord {
    /// Unique record ID within the session.
    pub id: u64,
    /// Sequence number of the report being processed.
    pub report: u64,
    /// Timestamp in nanoseconds since session start.
    pub timestamp_ns: u64,
    /// The trace event.
    #[serde(flatten)]
    pub event: TraceEvent,
}

impl TraceRecord {
    /// Creates a new trace record.
    #[must_use]
    pub fn new(id: u64, report: u64, timestamp_ns: u64, event: TraceEvent) -> Self {
        Self {
            id,
            report,
            timestamp_ns,
            event,
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.event.event_type()
    }
}

// =============================================================================
// Tests
// =============================================================================
