//! Region headers, exits and attribute lines.

use turnreport_foundation::model::{
    Direction, Exit, Gate, Item, Population, Region, RegionStub, Settlement, SettlementSize, Wages,
    Weather,
};
use turnreport_lexer::Scanner;

use super::coords::scan_coords;
use super::item::parse_item_list;

/// Reads `terrain (x,y) in Province` and any `contains Name [size]`
/// clause. Shared by region headers and exit targets.
fn scan_stub(s: &mut Scanner<'_>) -> Option<(RegionStub, Vec<String>)> {
    s.attempt(|s| {
        s.skip_whitespace();
        let terrain = s.until_any(&['(']).trim();
        if terrain.is_empty() || terrain.contains([',', ':']) {
            return None;
        }
        let coords = scan_coords(s)?;
        s.skip_whitespace();
        if !s.match_literal("in ") {
            return None;
        }
        let province = s.clause()?;
        let mut stub = RegionStub {
            terrain: terrain.to_string(),
            coords,
            province: province.to_string(),
            settlement: None,
        };

        let mut rest = Vec::new();
        while s.match_char(',') {
            s.skip_whitespace();
            let Some(clause) = s.clause() else {
                break;
            };
            match parse_settlement(clause) {
                Some(settlement) if stub.settlement.is_none() => stub.settlement = Some(settlement),
                _ => rest.push(clause.to_string()),
            }
        }
        s.match_char('.');
        Some((stub, rest))
    })
}

/// `contains Plondmark [city]`.
fn parse_settlement(clause: &str) -> Option<Settlement> {
    let mut s = Scanner::new(clause);
    if !s.match_literal("contains ") {
        return None;
    }
    let name = s.before(" [")?.trim();
    let size = SettlementSize::parse(s.before("]")?)?;
    s.is_at_end().then(|| Settlement {
        name: name.to_string(),
        size,
    })
}

/// `19564 peasants (humans)`.
fn parse_population(clause: &str) -> Option<Population> {
    let mut s = Scanner::new(clause);
    let amount = s.number()?;
    s.skip_whitespace();
    if !s.match_literal("peasants") {
        return None;
    }
    s.skip_whitespace();
    let race = s.between('(', ')')?.trim();
    s.is_at_end().then(|| Population {
        amount,
        race: race.to_string(),
    })
}

/// Parses a region header line such as
/// `plain (49,17) in Inthon, contains Plondmark [city], 19564 peasants (humans), $28172.`
///
/// Unrecognized trailing clauses are ignored.
#[must_use]
pub fn parse_region_header(text: &str) -> Option<Region> {
    let mut s = Scanner::new(text.trim());
    let (stub, clauses) = scan_stub(&mut s)?;
    if !s.is_at_end() {
        return None;
    }
    let mut region = Region::new(stub.terrain, stub.coords, stub.province);
    region.settlement = stub.settlement;
    for clause in &clauses {
        if let Some(population) = parse_population(clause) {
            region.population = Some(population);
        } else if let Some(tax) = clause.strip_prefix('$').and_then(|t| t.parse::<u32>().ok()) {
            region.tax = Some(tax);
        }
    }
    Some(region)
}

/// Parses an exit line: `North : ocean (49,15) in Atlantic Ocean.`
#[must_use]
pub fn parse_exit(text: &str) -> Option<Exit> {
    let mut s = Scanner::new(text.trim());
    let direction = Direction::parse(s.before(":")?)?;
    let (target, _) = scan_stub(&mut s)?;
    s.is_at_end().then_some(Exit { direction, target })
}

// =============================================================================
// Attribute lines
// =============================================================================

/// One recognized region attribute line.
#[derive(Clone, Debug, PartialEq)]
pub enum RegionAttribute {
    /// `The weather was clear last month; it will be winter next month.`
    Weather(Weather),
    /// `Wages: $15.2 (Max: $5930).`
    Wages(Wages),
    /// `Wanted: ...`
    Wanted(Vec<Item>),
    /// `For Sale: ...`
    ForSale(Vec<Item>),
    /// `Entertainment available: $1234.`
    Entertainment(u32),
    /// `Products: ...`
    Products(Vec<Item>),
    /// `There is a Gate here (Gate 5 of 20).`
    Gate(Gate),
}

impl RegionAttribute {
    /// Stores the attribute on its region.
    pub fn apply(self, region: &mut Region) {
        match self {
            Self::Weather(weather) => region.weather = Some(weather),
            Self::Wages(wages) => region.wages = Some(wages),
            Self::Wanted(items) => region.wanted = items,
            Self::ForSale(items) => region.for_sale = items,
            Self::Entertainment(amount) => region.entertainment = Some(amount),
            Self::Products(items) => region.products = items,
            Self::Gate(gate) => region.gate = Some(gate),
        }
    }
}

/// Parses a region attribute line. Returns `None` for anything that is not
/// a known attribute.
#[must_use]
pub fn parse_attribute(text: &str) -> Option<RegionAttribute> {
    let text = text.trim();
    if let Some(list) = text.strip_prefix("Wanted:") {
        return parse_item_list(list).map(RegionAttribute::Wanted);
    }
    if let Some(list) = text.strip_prefix("For Sale:") {
        return parse_item_list(list).map(RegionAttribute::ForSale);
    }
    if let Some(list) = text.strip_prefix("Products:") {
        return parse_item_list(list).map(RegionAttribute::Products);
    }
    if let Some(rest) = text.strip_prefix("Wages:") {
        return parse_wages(rest).map(RegionAttribute::Wages);
    }
    if let Some(rest) = text.strip_prefix("Entertainment available:") {
        let amount = rest.trim().trim_start_matches('$').trim_end_matches('.');
        return amount.parse().ok().map(RegionAttribute::Entertainment);
    }
    if text.contains(" last month") && text.contains(" next month") {
        return parse_weather(text).map(RegionAttribute::Weather);
    }
    parse_gate(text).map(RegionAttribute::Gate)
}

fn parse_wages(text: &str) -> Option<Wages> {
    let mut s = Scanner::new(text.trim());
    if !s.match_char('$') {
        return None;
    }
    let amount = s.decimal()?;
    s.skip_whitespace();
    let max = s.attempt(|s| {
        let inner = s.between('(', ')')?;
        inner.trim().strip_prefix("Max: $")?.parse::<u32>().ok()
    });
    s.match_char('.');
    s.is_at_end().then_some(Wages { amount, max })
}

/// `The weather was clear last month; it will be clear next month.`
/// Older engines write `It was winter last month; ...`.
fn parse_weather(text: &str) -> Option<Weather> {
    let mut s = Scanner::new(text);
    s.after(" was ")?;
    let last = s.before(" last month")?.trim();
    s.after(" be ")?;
    let next = s.before(" next month")?.trim();
    Some(Weather {
        last: last.to_string(),
        next: next.to_string(),
    })
}

/// Parses `There is a Gate here (Gate 5 of 20).` The total is optional.
#[must_use]
pub fn parse_gate(text: &str) -> Option<Gate> {
    let mut s = Scanner::new(text.trim());
    if !s.match_literal("There is a Gate here") {
        return None;
    }
    s.skip_whitespace();
    let inner = s.between('(', ')')?;
    s.match_char('.');
    if !s.is_at_end() {
        return None;
    }
    let mut s = Scanner::new(inner.trim());
    if !s.match_literal("Gate ") {
        return None;
    }
    let number = s.number()?;
    s.skip_whitespace();
    let total = if s.match_literal("of ") {
        Some(s.number()?)
    } else {
        None
    };
    s.is_at_end().then_some(Gate { number, total })
}
