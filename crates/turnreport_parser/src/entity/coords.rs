//! Coordinates: `(x,y)` or `(x,y,z <label>)`.

use turnreport_foundation::Coords;
use turnreport_lexer::Scanner;

/// Reads parenthesized coordinates at the scanner position.
pub fn scan_coords(s: &mut Scanner<'_>) -> Option<Coords> {
    s.attempt(|s| {
        s.skip_whitespace();
        let inner = s.between('(', ')')?;
        parse_inner(inner)
    })
}

/// Parses a whole coordinate string such as `(3,4,2 <underworld>)`.
#[must_use]
pub fn parse_coords(text: &str) -> Option<Coords> {
    let mut s = Scanner::new(text.trim());
    let coords = scan_coords(&mut s)?;
    s.is_at_end().then_some(coords)
}

fn parse_inner(inner: &str) -> Option<Coords> {
    let mut s = Scanner::new(inner);
    let x = coordinate(&mut s)?;
    if !s.match_char(',') {
        return None;
    }
    let y = coordinate(&mut s)?;
    if s.is_at_end() {
        return Some(Coords::new(x, y));
    }
    if !s.match_char(',') {
        return None;
    }
    let z = coordinate(&mut s)?;
    s.skip_whitespace();
    let label = if s.is_at_end() {
        None
    } else {
        let label = s.between('<', '>')?.trim();
        if label.is_empty() || !s.is_at_end() {
            return None;
        }
        Some(label.to_string())
    };
    Some(Coords::with_level(x, y, z, label))
}

fn coordinate(s: &mut Scanner<'_>) -> Option<i32> {
    s.skip_whitespace();
    let value = s.integer()?;
    i32::try_from(value).ok()
}
