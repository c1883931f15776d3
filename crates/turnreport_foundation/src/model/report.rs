//! Report-level records: header, narrative sections, battles, orders.

use serde::{Deserialize, Serialize};

use super::common::{Coords, EntityRef, FactionRef, Item};
use super::region::Region;
use super::unit::Unit;

/// `Semigallians (18) (War 1, Trade 2, Magic 2)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionInfo {
    /// Faction name.
    pub name: String,
    /// Faction number.
    pub number: u32,
    /// Faction type points, e.g. `("War", 1)`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, u32)>,
}

impl FactionInfo {
    /// The faction as a plain reference.
    #[must_use]
    pub fn reference(&self) -> FactionRef {
        EntityRef::new(self.name.clone(), self.number)
    }
}

/// `May, Year 3`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnDate {
    /// Month name.
    pub month: String,
    /// Year number.
    pub year: u32,
}

/// Engine and ruleset version lines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineInfo {
    /// `Atlantis Engine Version: 5.2.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Ruleset name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruleset: Option<String>,
    /// Ruleset version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruleset_version: Option<String>,
}

/// One faction status line: `Tax Regions: 1 (2)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionStatus {
    /// What is counted.
    pub what: String,
    /// Current amount.
    pub amount: u32,
    /// Allowed maximum, when printed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

/// A turn event, optionally attributed to a unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The unit the event concerns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<EntityRef>,
    /// Event text.
    pub message: String,
}

/// A skill, item or object description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lore {
    /// Subject name.
    pub name: String,
    /// Code, for skills and items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Skill level described.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    /// Description text.
    pub description: String,
}

/// One declared stance and the factions it applies to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attitude {
    /// Stance name, e.g. `Hostile`.
    pub stance: String,
    /// Factions with that stance.
    #[serde(default)]
    pub factions: Vec<FactionRef>,
}

/// `Declared Attitudes (default Neutral):` block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attitudes {
    /// Default stance.
    pub default: String,
    /// Declared stances.
    #[serde(default)]
    pub declared: Vec<Attitude>,
}

/// One round (or free round) of a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRound {
    /// Round number; absent for free rounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Narrative lines.
    #[serde(default)]
    pub lines: Vec<String>,
}

/// A battle report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    /// The attacking side's leader.
    pub attacker: EntityRef,
    /// The defending side's leader.
    pub defender: EntityRef,
    /// Where the battle happened, as printed.
    pub location: String,
    /// Coordinates of the battle region, when printed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coords>,
    /// Attacking units.
    #[serde(default)]
    pub attackers: Vec<Unit>,
    /// Defending units.
    #[serde(default)]
    pub defenders: Vec<Unit>,
    /// Rounds in order.
    #[serde(default)]
    pub rounds: Vec<BattleRound>,
    /// Outcome lines (`... is routed!`, `... is destroyed!`).
    #[serde(default)]
    pub outcome: Vec<String>,
    /// `Total Casualties:` lines.
    #[serde(default)]
    pub casualties: Vec<String>,
    /// Spoils.
    #[serde(default)]
    pub spoils: Vec<Item>,
}

/// Orders for one unit, byte-exact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOrders {
    /// Unit number.
    pub unit: u32,
    /// Order lines joined with `\n`, comments included.
    pub text: String,
}

/// The orders template closing the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersTemplate {
    /// Template format, e.g. `Long Format`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Faction number from `#atlantis`.
    pub faction: u32,
    /// Password, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Per-unit orders.
    #[serde(default)]
    pub units: Vec<UnitOrders>,
}

/// A complete structured report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// The faction the report was written for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<FactionInfo>,
    /// Turn date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<TurnDate>,
    /// Engine version lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineInfo>,
    /// Faction status counters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<FactionStatus>,
    /// Errors during turn.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Battles during turn.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub battles: Vec<Battle>,
    /// Events during turn.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    /// Skill descriptions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skill_reports: Vec<Lore>,
    /// Item descriptions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item_reports: Vec<Lore>,
    /// Object descriptions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub object_reports: Vec<Lore>,
    /// Declared attitudes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attitudes: Option<Attitudes>,
    /// Unclaimed silver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unclaimed_silver: Option<u32>,
    /// Regions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<Region>,
    /// Orders template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<OrdersTemplate>,
}

impl Report {
    /// The report owner's faction number.
    #[must_use]
    pub fn faction_number(&self) -> Option<u32> {
        self.faction.as_ref().map(|f| f.number)
    }

    /// Finds a region by coordinates.
    #[must_use]
    pub fn region(&self, coords: &Coords) -> Option<&Region> {
        self.regions.iter().find(|r| &r.coords == coords)
    }

    /// Finds a unit anywhere in the report.
    #[must_use]
    pub fn unit(&self, number: u32) -> Option<&Unit> {
        self.regions
            .iter()
            .flat_map(Region::all_units)
            .find(|u| u.number == number)
    }

    /// Rebuilds a typed report from a structured value.
    ///
    /// # Errors
    /// Returns a serialization error if the value does not have report shape.
    pub fn from_value(value: serde_json::Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
