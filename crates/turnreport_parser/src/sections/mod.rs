//! Section parsers.
//!
//! One variant per section kind. Each variant owns its own continuation
//! predicate (`wants`) and writes its part of the document straight to the
//! sink as blocks arrive.

mod attitudes;
mod battle;
mod header;
mod lore;
mod narrative;
mod orders;
mod region;
mod status;

pub use attitudes::{AttitudesSection, parse_attitude_line};
pub use battle::{BattleHeader, BattleSection, parse_battle_header};
pub use header::{HeaderLine, HeaderSection, parse_header_line};
pub use lore::{LoreSection, parse_lore_entry};
pub use narrative::{Narrative, NarrativeSection};
pub use orders::OrdersSection;
pub use region::RegionSection;
pub use status::{StatusSection, parse_status_line, write_unclaimed_silver};

use turnreport_debug::Tracer;
use turnreport_foundation::{ReportSink, Result};
use turnreport_lexer::Block;

use crate::section::SectionKind;

/// The running section.
#[derive(Debug)]
pub enum ActiveSection {
    /// Faction, date and engine lines.
    Header(HeaderSection),
    /// Faction status counters.
    Status(StatusSection),
    /// Errors or events.
    Narrative(NarrativeSection),
    /// Skill, item or object reports.
    Lore(LoreSection),
    /// Declared attitudes.
    Attitudes(AttitudesSection),
    /// A one-line section already fully written.
    Silver,
    /// Battle reports.
    Battles(BattleSection),
    /// Region observations.
    Regions(RegionSection),
    /// The orders template.
    Orders(OrdersSection),
}

impl ActiveSection {
    /// Starts `kind` on the block carrying its start marker.
    ///
    /// # Errors
    /// Returns parse or sink errors from the section.
    pub fn begin(kind: SectionKind, block: &Block, sink: &mut dyn ReportSink) -> Result<Self> {
        Ok(match kind {
            SectionKind::Header => Self::Header(HeaderSection::begin(block, sink)?),
            SectionKind::FactionStatus => Self::Status(StatusSection::begin(sink)?),
            SectionKind::Errors => {
                Self::Narrative(NarrativeSection::begin(Narrative::Errors, sink)?)
            }
            SectionKind::Events => {
                Self::Narrative(NarrativeSection::begin(Narrative::Events, sink)?)
            }
            SectionKind::SkillReports | SectionKind::ItemReports | SectionKind::ObjectReports => {
                let property = kind.property().unwrap_or(kind.name());
                Self::Lore(LoreSection::begin(property, sink)?)
            }
            SectionKind::Attitudes => Self::Attitudes(AttitudesSection::begin(block)),
            SectionKind::UnclaimedSilver => {
                write_unclaimed_silver(block, sink)?;
                Self::Silver
            }
            SectionKind::Battles => Self::Battles(BattleSection::begin(block, sink)?),
            SectionKind::Regions => Self::Regions(RegionSection::begin(block, sink)?),
            SectionKind::OrdersTemplate => Self::Orders(OrdersSection::begin(block, sink)?),
        })
    }

    /// The section's own continuation predicate.
    #[must_use]
    pub fn wants(&self, block: &Block) -> bool {
        match self {
            Self::Header(s) => s.wants(block),
            Self::Status(s) => s.wants(block),
            Self::Narrative(s) => s.wants(block),
            Self::Lore(s) => s.wants(block),
            Self::Attitudes(s) => s.wants(block),
            Self::Silver => false,
            Self::Battles(s) => s.wants(block),
            Self::Regions(s) => s.wants(block),
            Self::Orders(_) => true,
        }
    }

    /// Feeds a block the section kept.
    ///
    /// # Errors
    /// Returns parse errors for content the section grammar rejects.
    pub fn accept(&mut self, block: &Block, sink: &mut dyn ReportSink) -> Result<()> {
        match self {
            Self::Header(s) => s.accept(block, sink),
            Self::Status(s) => s.accept(block, sink),
            Self::Narrative(s) => s.accept(block, sink),
            Self::Lore(s) => s.accept(block, sink),
            Self::Attitudes(s) => s.accept(block),
            Self::Silver => Ok(()),
            Self::Battles(s) => s.accept(block),
            Self::Regions(s) => s.accept(block, sink),
            Self::Orders(s) => s.accept(block, sink),
        }
    }

    /// A new start of the running section's own kind.
    ///
    /// # Errors
    /// Returns errors from closing the running entity or opening the next.
    pub fn reenter(
        &mut self,
        block: &Block,
        sink: &mut dyn ReportSink,
        tracer: &mut Tracer,
    ) -> Result<()> {
        match self {
            Self::Battles(s) => s.reenter(block, sink),
            Self::Regions(s) => s.reenter(block, sink, tracer),
            _ => self.accept(block, sink),
        }
    }

    /// Ends the section. `line` is the last line the section saw.
    ///
    /// # Errors
    /// Returns an error if the section is missing required content.
    pub fn finish(self, line: usize, sink: &mut dyn ReportSink, tracer: &mut Tracer) -> Result<()> {
        match self {
            Self::Header(s) => s.finish(sink),
            Self::Status(s) => s.finish(sink),
            Self::Narrative(s) => s.finish(sink),
            Self::Lore(s) => s.finish(sink),
            Self::Attitudes(s) => s.finish(sink),
            Self::Silver => Ok(()),
            Self::Battles(s) => s.finish(line, sink),
            Self::Regions(s) => s.finish(line, sink, tracer),
            Self::Orders(s) => s.finish(line, sink),
        }
    }
}
