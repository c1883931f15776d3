//! Region observations.

use serde::{Deserialize, Serialize};

use super::common::{Coords, Direction, Item};
use super::unit::{Structure, Unit};

/// Size class of a settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementSize {
    /// Smallest settlement.
    Village,
    /// Medium settlement.
    Town,
    /// Largest settlement.
    City,
}

impl SettlementSize {
    /// Parses the bracketed size word.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "village" => Some(Self::Village),
            "town" => Some(Self::Town),
            "city" => Some(Self::City),
            _ => None,
        }
    }
}

/// A named settlement: `contains Plondmark [city]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Settlement name.
    pub name: String,
    /// Size class.
    pub size: SettlementSize,
}

/// Peasant population: `19564 peasants (humans)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    /// Head count.
    pub amount: u32,
    /// Race as printed.
    pub race: String,
}

/// `Wages: $15.2 (Max: $5930).`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wages {
    /// Silver per man-month.
    pub amount: f64,
    /// Total wages available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

/// Weather for last and next month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    /// Last month's weather.
    pub last: String,
    /// Next month's forecast.
    pub next: String,
}

/// `There is a Gate here (Gate 5 of 20).`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Gate number.
    pub number: u32,
    /// Total gates in the world, when printed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
}

/// The neighbouring-region summary printed in an exit line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionStub {
    /// Terrain type.
    pub terrain: String,
    /// Coordinates.
    pub coords: Coords,
    /// Province name.
    pub province: String,
    /// Settlement, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement: Option<Settlement>,
}

/// One exit: direction to a neighbouring region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exit {
    /// Compass direction.
    pub direction: Direction,
    /// The neighbour.
    pub target: RegionStub,
}

/// A region as observed in one faction's report.
///
/// Identity key is [`Coords`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Terrain type.
    pub terrain: String,
    /// Coordinates (identity key).
    pub coords: Coords,
    /// Province name.
    pub province: String,
    /// Settlement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement: Option<Settlement>,
    /// Peasants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<Population>,
    /// Tax income.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<u32>,
    /// Weather line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    /// Wages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wages: Option<Wages>,
    /// Items the market buys.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wanted: Vec<Item>,
    /// Items the market sells.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub for_sale: Vec<Item>,
    /// Entertainment silver available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entertainment: Option<u32>,
    /// Raw production.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Item>,
    /// Exits to neighbours.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exits: Vec<Exit>,
    /// Gate, if one is visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<Gate>,
    /// Units standing outside any structure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<Unit>,
    /// Structures with their own units.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub structures: Vec<Structure>,
}

impl Region {
    /// Creates an empty region observation.
    #[must_use]
    pub fn new(terrain: impl Into<String>, coords: Coords, province: impl Into<String>) -> Self {
        Self {
            terrain: terrain.into(),
            coords,
            province: province.into(),
            settlement: None,
            population: None,
            tax: None,
            weather: None,
            wages: None,
            wanted: Vec::new(),
            for_sale: Vec::new(),
            entertainment: None,
            products: Vec::new(),
            exits: Vec::new(),
            gate: None,
            units: Vec::new(),
            structures: Vec::new(),
        }
    }

    /// Iterates every unit in the region, inside structures or not.
    pub fn all_units(&self) -> impl Iterator<Item = &Unit> {
        self.units
            .iter()
            .chain(self.structures.iter().flat_map(|s| s.units.iter()))
    }

    /// Finds a structure by number.
    #[must_use]
    pub fn structure(&self, number: u32) -> Option<&Structure> {
        self.structures.iter().find(|s| s.number == number)
    }
}
