//! Unit lines.
//!
//! ```text
//! Name (n)[, Faction (m)][, flag | item]...[; description]. [Label: value.]...
//! ```
//!
//! The `-`/`*` marker has already been stripped by the block reader; the
//! caller passes whether it was `*`.

use turnreport_foundation::model::{Capacity, Unit};
use turnreport_lexer::Scanner;

use super::item::parse_item;
use super::reference::{entity_ref, scan_entity_ref};
use super::skill::{parse_skill, parse_skill_list};

/// Parses a unit body. Returns `None` unless the line starts with a
/// `Name (number)` reference followed by `,`, `;`, `.` or nothing.
#[must_use]
pub fn parse_unit(body: &str, own: bool) -> Option<Unit> {
    let mut s = Scanner::new(body.trim());
    let head = scan_entity_ref(&mut s)?;
    if !(s.is_at_end() || s.looking_at(",") || s.looking_at(";") || s.looking_at(".")) {
        return None;
    }
    let mut unit = Unit::new(head.name, head.number);
    unit.own = own;

    let mut first = true;
    loop {
        s.skip_whitespace();
        if !s.match_char(',') {
            break;
        }
        s.skip_whitespace();
        let Some(clause) = s.clause() else {
            continue;
        };
        if first && !clause.contains('[') {
            if let Some(faction) = entity_ref(clause) {
                unit.faction = Some(faction);
                first = false;
                continue;
            }
        }
        first = false;
        if clause.contains('[') {
            if let Some(item) = parse_item(clause) {
                unit.items.push(item);
                continue;
            }
        }
        unit.flags.push(clause.to_string());
    }

    s.skip_whitespace();
    if s.match_char(';') {
        unit.description = s.sentence().map(str::to_string);
    }

    loop {
        s.skip_whitespace();
        s.match_char('.');
        s.skip_whitespace();
        if s.is_at_end() {
            break;
        }
        let Some(sentence) = s.sentence() else {
            // A stray separator; step over it.
            s.take_rest();
            break;
        };
        apply_sentence(&mut unit, sentence);
    }
    Some(unit)
}

/// Fills one `Label: value` sentence. Unknown labels are ignored.
fn apply_sentence(unit: &mut Unit, sentence: &str) {
    let Some((label, value)) = sentence.split_once(':') else {
        return;
    };
    let value = value.trim();
    match label.trim() {
        "Weight" => unit.weight = value.parse().ok(),
        "Capacity" => unit.capacity = parse_capacity(value),
        "Skills" => unit.skills = parse_skill_list(value),
        "Can Study" => unit.can_study = parse_skill_list(value),
        "Combat spell" => unit.combat_spell = parse_skill(value),
        "Ready weapon" | "Ready armor" | "Ready item" => unit.ready_item = parse_item(value),
        "Upkeep" => {
            unit.upkeep = value
                .trim_start_matches('$')
                .parse()
                .ok();
        }
        _ => {}
    }
}

/// `flying/riding/walking/swimming`.
fn parse_capacity(text: &str) -> Option<Capacity> {
    let mut parts = text.split('/').map(|p| p.trim().parse::<u32>().ok());
    let capacity = Capacity {
        flying: parts.next()??,
        riding: parts.next()??,
        walking: parts.next()??,
        swimming: parts.next()??,
    };
    parts.next().is_none().then_some(capacity)
}
