//! Small value records shared across the report model.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// Coordinates
// =============================================================================

/// Map coordinates of a region: `(x,y)` or `(x,y,z <label>)`.
///
/// Equality is structural; coordinates are the natural key correlating the
/// same region across several factions' reports.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coords {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Plane/level. Absent on the surface in two-coordinate form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<i32>,
    /// Level label such as `underworld`. Only present with `z`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Coords {
    /// Creates surface coordinates.
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            z: None,
            label: None,
        }
    }

    /// Creates coordinates on a numbered level.
    #[must_use]
    pub fn with_level(x: i32, y: i32, z: i32, label: Option<String>) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            label,
        }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{}", self.x, self.y)?;
        if let Some(z) = self.z {
            write!(f, ",{z}")?;
            if let Some(label) = &self.label {
                write!(f, " <{label}>")?;
            }
        }
        write!(f, ")")
    }
}

// =============================================================================
// Entity references
// =============================================================================

/// A `Name (number)` reference to a faction or unit.
///
/// The number is the stable identity; the name may vary in casing or spelling
/// between reports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Display name as written in the report.
    pub name: String,
    /// Stable number.
    pub number: u32,
}

impl EntityRef {
    /// Creates a reference.
    #[must_use]
    pub fn new(name: impl Into<String>, number: u32) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.number)
    }
}

/// A faction reference.
pub type FactionRef = EntityRef;

// =============================================================================
// Amounts and items
// =============================================================================

/// A quantity that may be unlimited (city markets sell some goods without
/// limit). Serialized as a number or the string `"unlimited"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Amount {
    /// A finite count.
    Count(u32),
    /// No upper bound.
    Unlimited,
}

impl Amount {
    /// Returns the finite count, if any.
    #[must_use]
    pub fn count(self) -> Option<u32> {
        match self {
            Self::Count(n) => Some(n),
            Self::Unlimited => None,
        }
    }

    /// Returns true for the unlimited sentinel.
    #[must_use]
    pub fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::Count(1)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u32(*n),
            Self::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative count or \"unlimited\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                u32::try_from(v)
                    .map(Amount::Count)
                    .map_err(|_| E::custom(format!("amount {v} out of range")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                u32::try_from(v)
                    .map(Amount::Count)
                    .map_err(|_| E::custom(format!("amount {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                if v.eq_ignore_ascii_case("unlimited") {
                    Ok(Amount::Unlimited)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// An item stack: `<amount> <name> [<CODE>]`, optionally priced or annotated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Item code inside the square brackets, e.g. `SWOR`.
    pub code: String,
    /// Name as printed (singular or plural).
    pub name: String,
    /// Quantity.
    #[serde(default)]
    pub amount: Amount,
    /// Market price (`at $23`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    /// Unfinished ship or building kit.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unfinished: bool,
    /// Work still needed on an unfinished item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs: Option<u32>,
    /// Trailing parenthetical text kept verbatim (battle stats and the like).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

impl Item {
    /// Creates an item stack.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, amount: Amount) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            amount,
            price: None,
            unfinished: false,
            needs: None,
            extra: None,
        }
    }
}

/// A skill reference: `<name> [<CODE>] <level> (<days>)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Skill name.
    pub name: String,
    /// Skill code.
    pub code: String,
    /// Level; absent in can-study lists and combat spells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    /// Days of study accumulated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
}

/// A `current/max` pair such as ship load or sailors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio {
    /// Current value.
    pub current: u32,
    /// Capacity.
    pub max: u32,
}

// =============================================================================
// Directions
// =============================================================================

/// Hex compass directions used by exits and sailing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// North.
    North,
    /// Northeast.
    Northeast,
    /// Southeast.
    Southeast,
    /// South.
    South,
    /// Southwest.
    Southwest,
    /// Northwest.
    Northwest,
}

impl Direction {
    /// All directions in report order.
    pub const ALL: [Self; 6] = [
        Self::North,
        Self::Northeast,
        Self::Southeast,
        Self::South,
        Self::Southwest,
        Self::Northwest,
    ];

    /// Parses a full name or abbreviation, case-insensitively.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.into_iter().find(|d| {
            d.name().eq_ignore_ascii_case(text) || d.abbreviation().eq_ignore_ascii_case(text)
        })
    }

    /// Full name as printed in exit lists.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::Northeast => "Northeast",
            Self::Southeast => "Southeast",
            Self::South => "South",
            Self::Southwest => "Southwest",
            Self::Northwest => "Northwest",
        }
    }

    /// Short form used in sail directions and orders.
    #[must_use]
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::Northeast => "NE",
            Self::Southeast => "SE",
            Self::South => "S",
            Self::Southwest => "SW",
            Self::Northwest => "NW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
