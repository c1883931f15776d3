//! `Errors during turn:` and `Events during turn:`.

use turnreport_foundation::model::Event;
use turnreport_foundation::{ReportSink, Result, Scalar, emit};
use turnreport_lexer::Block;

use crate::entity::split_ref_prefix;

/// Which narrative list is being written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Narrative {
    /// Plain strings.
    Errors,
    /// [`Event`] records with an optional unit prefix.
    Events,
}

/// Error or event list state.
#[derive(Debug)]
pub struct NarrativeSection {
    kind: Narrative,
}

impl NarrativeSection {
    /// Opens the list.
    ///
    /// # Errors
    /// Propagates sink errors.
    pub fn begin(kind: Narrative, sink: &mut dyn ReportSink) -> Result<Self> {
        sink.property(match kind {
            Narrative::Errors => "errors",
            Narrative::Events => "events",
        })?;
        sink.begin_array()?;
        Ok(Self { kind })
    }

    /// Narratives run until another section starts.
    #[must_use]
    pub fn wants(&self, block: &Block) -> bool {
        !block.is_divider()
    }

    /// Writes one entry.
    ///
    /// # Errors
    /// Propagates sink errors.
    pub fn accept(&mut self, block: &Block, sink: &mut dyn ReportSink) -> Result<()> {
        if block.is_blank() {
            return Ok(());
        }
        match self.kind {
            Narrative::Errors => sink.scalar(Scalar::Str(block.text())),
            Narrative::Events => {
                let (unit, message) = split_ref_prefix(block.text());
                emit(
                    sink,
                    &Event {
                        unit,
                        message: message.to_string(),
                    },
                )
            }
        }
    }

    /// Closes the list.
    ///
    /// # Errors
    /// Propagates sink errors.
    pub fn finish(self, sink: &mut dyn ReportSink) -> Result<()> {
        sink.end_array()
    }
}
