//! `Name (123)` references to factions and units.

use turnreport_foundation::EntityRef;
use turnreport_lexer::Scanner;

/// Finds the `(digits)` group in `text`, searching from the right when
/// `rightmost` is set. Returns the byte range of the group and its number.
fn number_group(text: &str, rightmost: bool) -> Option<(usize, usize, u32)> {
    let candidates = text.match_indices('(').map(|(i, _)| i);
    let check = |open: usize| {
        let inner = &text[open + 1..];
        let digits = inner.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || inner.as_bytes().get(digits) != Some(&b')') {
            return None;
        }
        let number = inner[..digits].parse().ok()?;
        Some((open, open + digits + 2, number))
    };
    if rightmost {
        candidates.collect::<Vec<_>>().into_iter().rev().find_map(check)
    } else {
        candidates.into_iter().find_map(check)
    }
}

/// Parses a clause that is exactly a reference, such as `Semigallians (18)`.
///
/// Names may themselves contain parenthetical text, so the rightmost clean
/// `(digits)` group is the number and everything before it is the name.
#[must_use]
pub fn entity_ref(text: &str) -> Option<EntityRef> {
    let text = text.trim();
    let (start, end, number) = number_group(text, true)?;
    if end != text.len() {
        return None;
    }
    let name = text[..start].trim_end();
    if name.is_empty() {
        return None;
    }
    Some(EntityRef::new(name, number))
}

/// Reads `Name (123)` at the scanner position: the name runs to the first
/// clean `(digits)` group. Leaves the scanner unchanged on a miss.
pub fn scan_entity_ref(s: &mut Scanner<'_>) -> Option<EntityRef> {
    s.attempt(|s| {
        s.skip_whitespace();
        let rest = s.rest();
        let (start, end, number) = number_group(rest, false)?;
        let name = rest[..start].trim();
        if name.is_empty() {
            return None;
        }
        let name = name.to_string();
        s.after(&rest[start..end])?;
        Some(EntityRef::new(name, number))
    })
}

/// Splits an optional `Name (123): ` prefix off a narrative line.
#[must_use]
pub fn split_ref_prefix(text: &str) -> (Option<EntityRef>, &str) {
    let mut s = Scanner::new(text);
    let parsed = s.attempt(|s| {
        let head = s.before(": ")?;
        entity_ref(head)
    });
    match parsed {
        Some(reference) => (Some(reference), s.rest().trim()),
        None => (None, text.trim()),
    }
}
