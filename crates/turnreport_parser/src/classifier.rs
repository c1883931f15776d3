//! Section classifier.
//!
//! Decides, block by block, whether the running section keeps the block,
//! a new section begins, or the block is skipped as unknown content.
//!
//! ```text
//!   (none) ──start──► Header ──► {Status, Errors, Events, Lore, Attitudes,
//!                                 Silver, Battles*, Regions*} ──► OrdersTemplate
//!        ▲                 │
//!        └───terminate─────┘   (* reentrant: a new start opens a new entity)
//! ```
//!
//! Detected starts always win over a section's own continuation shape, so a
//! `key: value` line that opens a higher priority section closes faction
//! status even though status would have accepted it.

use turnreport_lexer::{Block, BlockKind};

use crate::section::{SectionKind, SectionSet};
use crate::sections::parse_battle_header;

/// What the driver must do with the current block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Start a new section with this block.
    Begin(SectionKind),
    /// The running section sees a new start of its own kind.
    Reenter,
    /// The running section keeps the block.
    Continue,
    /// Finish the running section and classify the block again.
    Terminate,
    /// No enabled section wants the block.
    Skip,
}

/// Section state machine for one document.
#[derive(Clone, Debug)]
pub struct Classifier {
    enabled: SectionSet,
    seen: SectionSet,
    active: Option<SectionKind>,
}

impl Classifier {
    /// Creates a classifier for the enabled sections.
    #[must_use]
    pub fn new(enabled: SectionSet) -> Self {
        Self {
            enabled,
            seen: SectionSet::empty(),
            active: None,
        }
    }

    /// The running section, if any.
    #[must_use]
    pub fn active(&self) -> Option<SectionKind> {
        self.active
    }

    /// Sections that have begun at least once.
    #[must_use]
    pub fn seen(&self) -> SectionSet {
        self.seen
    }

    /// Advances the state machine.
    ///
    /// `start` is the section whose start marker the block carries, and
    /// `continues` is the running section's own continuation predicate.
    pub fn step(&mut self, start: Option<SectionKind>, continues: bool) -> Transition {
        match self.active {
            Some(active) if active.is_terminal() => Transition::Continue,
            Some(active) => match start {
                Some(kind) if kind == active && active.is_reentrant() => Transition::Reenter,
                Some(_) => self.terminate(),
                None if continues => Transition::Continue,
                None => self.terminate(),
            },
            None => match start {
                Some(kind)
                    if self.enabled.contains(kind)
                        && (kind.is_repeatable() || !self.seen.contains(kind)) =>
                {
                    self.seen.insert(kind);
                    self.active = Some(kind);
                    Transition::Begin(kind)
                }
                _ => Transition::Skip,
            },
        }
    }

    /// Drops the running section, returning it.
    pub fn close(&mut self) -> Option<SectionKind> {
        self.active.take()
    }

    fn terminate(&mut self) -> Transition {
        self.active = None;
        Transition::Terminate
    }
}

/// Returns the section whose start marker `block` carries.
///
/// Only unindented text blocks can start a section. Region headers are
/// recognized by the divider that follows them, so the caller looks one
/// block ahead.
#[must_use]
pub fn detect_start(block: &Block, next_is_divider: bool) -> Option<SectionKind> {
    if block.kind != BlockKind::Text || block.indent != 0 {
        return None;
    }
    let text = block.text();
    SectionKind::PRIORITY.into_iter().find(|kind| match kind {
        SectionKind::Header => text.starts_with("Atlantis Report For"),
        SectionKind::OrdersTemplate => text.starts_with("Orders Template"),
        SectionKind::Regions => next_is_divider && !block.is_heading(),
        SectionKind::FactionStatus => text.starts_with("Faction Status"),
        SectionKind::Errors => text.starts_with("Errors during turn"),
        SectionKind::Battles => {
            text.starts_with("Battles during turn") || parse_battle_header(text).is_some()
        }
        SectionKind::Events => text.starts_with("Events during turn"),
        SectionKind::SkillReports => text.starts_with("Skill reports:"),
        SectionKind::ItemReports => text.starts_with("Item reports:"),
        SectionKind::ObjectReports => text.starts_with("Object reports:"),
        SectionKind::Attitudes => text.starts_with("Declared Attitudes"),
        SectionKind::UnclaimedSilver => text.starts_with("Unclaimed silver:"),
    })
}
