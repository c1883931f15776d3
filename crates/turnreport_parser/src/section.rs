//! Report section kinds and section subsets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use turnreport_foundation::{Error, Result};

/// A top-level section of a turn report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    /// `Atlantis Report For:` with faction, date and engine lines.
    Header,
    /// `Faction Status:` counters.
    FactionStatus,
    /// `Errors during turn:`.
    Errors,
    /// `Battles during turn:` or a bare battle header.
    Battles,
    /// `Events during turn:`.
    Events,
    /// `Skill reports:`.
    SkillReports,
    /// `Item reports:`.
    ItemReports,
    /// `Object reports:`.
    ObjectReports,
    /// `Declared Attitudes (default ...):`.
    Attitudes,
    /// `Unclaimed silver: N.`
    UnclaimedSilver,
    /// Region observations, one after another.
    Regions,
    /// `Orders Template (...):` to the end of the report.
    OrdersTemplate,
}

impl SectionKind {
    /// Every kind, in start-detection priority order.
    pub const PRIORITY: [SectionKind; 12] = [
        Self::Header,
        Self::OrdersTemplate,
        Self::Regions,
        Self::FactionStatus,
        Self::Errors,
        Self::Battles,
        Self::Events,
        Self::SkillReports,
        Self::ItemReports,
        Self::ObjectReports,
        Self::Attitudes,
        Self::UnclaimedSilver,
    ];

    /// Stable name used in configuration, traces and errors.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::FactionStatus => "faction-status",
            Self::Errors => "errors",
            Self::Battles => "battles",
            Self::Events => "events",
            Self::SkillReports => "skill-reports",
            Self::ItemReports => "item-reports",
            Self::ObjectReports => "object-reports",
            Self::Attitudes => "attitudes",
            Self::UnclaimedSilver => "unclaimed-silver",
            Self::Regions => "regions",
            Self::OrdersTemplate => "orders-template",
        }
    }

    /// Document property the section writes, for single-property sections.
    #[must_use]
    pub fn property(self) -> Option<&'static str> {
        match self {
            Self::Header => None,
            Self::FactionStatus => Some("status"),
            Self::Errors => Some("errors"),
            Self::Battles => Some("battles"),
            Self::Events => Some("events"),
            Self::SkillReports => Some("skillReports"),
            Self::ItemReports => Some("itemReports"),
            Self::ObjectReports => Some("objectReports"),
            Self::Attitudes => Some("attitudes"),
            Self::UnclaimedSilver => Some("unclaimedSilver"),
            Self::Regions => Some("regions"),
            Self::OrdersTemplate => Some("orders"),
        }
    }

    /// May begin again after other sections have run.
    #[must_use]
    pub fn is_repeatable(self) -> bool {
        matches!(
            self,
            Self::Regions | Self::Errors | Self::Events | Self::Battles
        )
    }

    /// A new start of this kind continues the running section as a new
    /// entity instead of closing it.
    #[must_use]
    pub fn is_reentrant(self) -> bool {
        matches!(self, Self::Regions | Self::Battles)
    }

    /// Once entered, nothing else can follow.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::OrdersTemplate
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::PRIORITY
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::config(format!("unknown section '{wanted}'")))
    }
}

// =============================================================================
// Section Set
// =============================================================================

/// A set of enabled section parsers.
///
/// Parsing with a subset is a first-class entry point: a caller that only
/// wants battles gets only battles, and every other section is skipped
/// without being interpreted.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionSet(u16);

impl SectionSet {
    /// Every section.
    #[must_use]
    pub fn all() -> Self {
        SectionKind::PRIORITY
            .into_iter()
            .fold(Self::empty(), Self::with)
    }

    /// No sections.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Exactly the given sections.
    #[must_use]
    pub fn only(kinds: &[SectionKind]) -> Self {
        kinds.iter().copied().fold(Self::empty(), Self::with)
    }

    /// Adds a section.
    #[must_use]
    pub fn with(self, kind: SectionKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Removes a section.
    #[must_use]
    pub fn without(self, kind: SectionKind) -> Self {
        Self(self.0 & !kind.bit())
    }

    /// Adds a section in place.
    pub fn insert(&mut self, kind: SectionKind) {
        self.0 |= kind.bit();
    }

    /// True if the section is in the set.
    #[must_use]
    pub fn contains(self, kind: SectionKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// True if no section is in the set.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in priority order.
    pub fn iter(self) -> impl Iterator<Item = SectionKind> {
        SectionKind::PRIORITY
            .into_iter()
            .filter(move |k| self.contains(*k))
    }

    /// Parses a comma-separated list of section names.
    ///
    /// # Errors
    /// Returns a configuration error naming the first unknown section.
    pub fn parse_list(list: &str) -> Result<Self> {
        list.split(',')
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<SectionKind>)
            .try_fold(Self::empty(), |set, kind| Ok(set.with(kind?)))
    }
}

impl Default for SectionSet {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Debug for SectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<SectionKind> for SectionSet {
    fn from_iter<T: IntoIterator<Item = SectionKind>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}
