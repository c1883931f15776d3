//! Ring buffer for trace records.
//!
//! Keeps the newest records of a session, oldest first.

use std::collections::{BTreeSet, HashMap, VecDeque};

use super::record::{TraceEvent, TraceRecord};

/// Bounded record history. Once full, each new record evicts the oldest.
#[derive(Clone, Debug)]
pub struct TraceBuffer {
    records: VecDeque<TraceRecord>,
    max_size: usize,
    next_id: u64,
}

impl TraceBuffer {
    /// Creates a buffer holding at most `max_size` records.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            next_id: 0,
        }
    }

    /// Stores an event and returns its record id. Ids never repeat, even
    /// after eviction.
    pub fn push(&mut self, report: u64, timestamp_ns: u64, event: TraceEvent) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.records.len() == self.max_size {
            self.records.pop_front();
        }
        if self.max_size > 0 {
            self.records
                .push_back(TraceRecord::new(id, report, timestamp_ns, event));
        }
        id
    }

    /// Records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records.iter()
    }

    /// The newest record.
    #[must_use]
    pub fn last(&self) -> Option<&TraceRecord> {
        self.records.back()
    }

    /// Records of one event type, oldest first.
    #[must_use]
    pub fn by_event_type(&self, event_type: &str) -> Vec<&TraceRecord> {
        self.records
            .iter()
            .filter(|r| r.event_type() == event_type)
            .collect()
    }

    /// Counts per event type and per report.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        let mut event_counts: HashMap<&'static str, usize> = HashMap::new();
        let mut reports = BTreeSet::new();
        for record in &self.records {
            *event_counts.entry(record.event_type()).or_default() += 1;
            reports.insert(record.report);
        }
        TraceBufferStats {
            record_count: self.records.len(),
            max_size: self.max_size,
            report_count: reports.len(),
            event_counts,
        }
    }
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::new(10_000)
    }
}

/// Summary of a [`TraceBuffer`].
#[derive(Clone, Debug)]
pub struct TraceBufferStats {
    /// Records held.
    pub record_count: usize,
    /// Capacity.
    pub max_size: usize,
    /// Distinct reports among the held records.
    pub report_count: usize,
    /// Records per event type.
    pub event_counts: HashMap<&'static str, usize>,
}

// =============================================================================
// Tests
// =============================================================================
