//! Unit and structure observations.

use serde::{Deserialize, Serialize};

use super::common::{Direction, FactionRef, Item, Ratio, Skill};

/// Carrying capacity per movement mode: `Capacity: 0/70/85/0.`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    /// Flying capacity.
    pub flying: u32,
    /// Riding capacity.
    pub riding: u32,
    /// Walking capacity.
    pub walking: u32,
    /// Swimming capacity.
    pub swimming: u32,
}

/// A unit as observed in one report.
///
/// Identity key is `number`, unique within a turn across all factions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Unit name.
    pub name: String,
    /// Unit number.
    pub number: u32,
    /// Owning faction, absent when not revealed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<FactionRef>,
    /// Belongs to the faction the report was written for.
    #[serde(default)]
    pub own: bool,
    /// Flags such as `behind` or `avoiding`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    /// Visible items, men included.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    /// Free-text description after the `;`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Total weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Carrying capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Capacity>,
    /// Known skills; `Some(vec![])` for `Skills: none.`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<Skill>>,
    /// Skills the unit can study.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_study: Option<Vec<Skill>>,
    /// Combat spell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combat_spell: Option<Skill>,
    /// Readied weapon, armor or item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_item: Option<Item>,
    /// Upkeep in silver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upkeep: Option<u32>,
}

impl Unit {
    /// Creates a bare unit observation.
    #[must_use]
    pub fn new(name: impl Into<String>, number: u32) -> Self {
        Self {
            name: name.into(),
            number,
            faction: None,
            own: false,
            flags: Vec::new(),
            items: Vec::new(),
            description: None,
            weight: None,
            capacity: None,
            skills: None,
            can_study: None,
            combat_spell: None,
            ready_item: None,
            upkeep: None,
        }
    }

    /// Returns the owning faction number, if known.
    #[must_use]
    pub fn faction_number(&self) -> Option<u32> {
        self.faction.as_ref().map(|f| f.number)
    }
}

/// One ship class inside a fleet: `2 Longships`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetContent {
    /// Number of vessels.
    pub count: u32,
    /// Vessel type as printed.
    pub kind: String,
}

/// A building or fleet inside a region.
///
/// Identity key is `number` within its region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
    /// Structure number.
    pub number: u32,
    /// Structure name.
    pub name: String,
    /// Structure type, e.g. `Tower` or `Fleet`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Fleet contents.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<FleetContent>,
    /// Comma flags such as `needs 10` or `closed to player units`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ship load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<Ratio>,
    /// Sailing skill present versus required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sailors: Option<Ratio>,
    /// Maximum speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u32>,
    /// Directions sailed this turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sail_directions: Option<Vec<Direction>>,
    /// Units inside.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<Unit>,
}

impl Structure {
    /// Creates a bare structure observation.
    #[must_use]
    pub fn new(number: u32, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            kind: kind.into(),
            contents: Vec::new(),
            flags: Vec::new(),
            description: None,
            load: None,
            sailors: None,
            speed: None,
            sail_directions: None,
            units: Vec::new(),
        }
    }
}
