//! Structure lines.
//!
//! ```text
//! Name [n] : Type[, 2 Longships][, flag]...; Load: a/b; Sailors: a/b;
//!     MaxSpeed: n; Sail directions: N, NE; description.
//! ```

use turnreport_foundation::model::{Direction, FleetContent, Ratio, Structure};
use turnreport_lexer::Scanner;

/// Parses a structure body (marker already stripped). Returns `None` if
/// the `Name [number] :` anchor is missing.
#[must_use]
pub fn parse_structure(body: &str) -> Option<Structure> {
    let mut s = Scanner::new(body.trim());
    let name = s.before(" [")?.trim();
    let number = s.before("]")?.trim().parse().ok()?;
    s.skip_whitespace();
    if name.is_empty() || !s.match_char(':') {
        return None;
    }
    let rest = s.take_rest().trim();
    let rest = rest.strip_suffix('.').unwrap_or(rest);

    let mut parts = split_top_level(rest, ';').into_iter();
    let mut head = Scanner::new(parts.next()?);
    let kind = head.clause()?;
    let mut structure = Structure::new(number, name, kind);

    while head.match_char(',') {
        head.skip_whitespace();
        let Some(clause) = head.clause() else {
            break;
        };
        match fleet_content(clause) {
            Some(content) => structure.contents.push(content),
            None => structure.flags.push(clause.to_string()),
        }
    }

    for part in parts {
        match part.split_once(':') {
            Some(("Load", value)) => structure.load = parse_ratio(value),
            Some(("Sailors", value)) => structure.sailors = parse_ratio(value),
            Some(("MaxSpeed", value)) => structure.speed = value.trim().parse().ok(),
            Some(("Sail directions", value)) => {
                structure.sail_directions = value
                    .split(',')
                    .map(Direction::parse)
                    .collect::<Option<Vec<_>>>();
            }
            _ => structure.description = Some(part.to_string()),
        }
    }
    Some(structure)
}

/// `2 Longships`: a count followed by a capitalized ship class.
fn fleet_content(clause: &str) -> Option<FleetContent> {
    let (count, kind) = clause.split_once(' ')?;
    let count = count.parse().ok()?;
    kind.starts_with(char::is_uppercase).then(|| FleetContent {
        count,
        kind: kind.to_string(),
    })
}

fn parse_ratio(text: &str) -> Option<Ratio> {
    let (current, max) = text.trim().split_once('/')?;
    Some(Ratio {
        current: current.trim().parse().ok()?,
        max: max.trim().parse().ok()?,
    })
}

/// Splits on `sep` outside brackets and parentheses, trimming each part
/// and dropping empty ones.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}
