//! Item stacks and item lists.
//!
//! `[<amount> | unlimited] [unfinished] <name> [<CODE>] [at $<price>] [(...)]`

use turnreport_foundation::{Amount, Item};
use turnreport_lexer::Scanner;

/// Parses one item clause. The clause must contain a bracketed code.
#[must_use]
pub fn parse_item(text: &str) -> Option<Item> {
    let mut s = Scanner::new(text.trim());
    let item = scan_item(&mut s)?;
    s.match_char('.');
    s.is_at_end().then_some(item)
}

/// Reads one item at the scanner position.
pub fn scan_item(s: &mut Scanner<'_>) -> Option<Item> {
    s.attempt(|s| {
        s.skip_whitespace();
        let amount = scan_amount(s);
        let unfinished = s.match_literal("unfinished ");
        let name = s.before(" [")?.trim();
        if name.is_empty() || name.contains([',', ';']) {
            return None;
        }
        let code = s.before("]")?;
        if code.is_empty() || code.contains(char::is_whitespace) {
            return None;
        }

        let mut item = Item::new(code, name, amount);
        item.unfinished = unfinished;

        s.push_bookmark();
        s.skip_whitespace();
        if s.match_literal("at $") {
            if let Some(price) = s.number() {
                s.remove_bookmark();
                item.price = Some(price);
            } else {
                s.pop_bookmark();
            }
        } else {
            s.pop_bookmark();
        }

        s.push_bookmark();
        s.skip_whitespace();
        match s.between('(', ')') {
            Some(inner) => {
                s.remove_bookmark();
                match inner.strip_prefix("needs ").and_then(|n| n.trim().parse::<u32>().ok()) {
                    Some(needs) => item.needs = Some(needs),
                    None => item.extra = Some(inner.to_string()),
                }
            }
            None => {
                s.pop_bookmark();
            }
        }
        Some(item)
    })
}

/// Reads `unlimited`, a count, or nothing (one item).
fn scan_amount(s: &mut Scanner<'_>) -> Amount {
    if s.match_ignore_case("unlimited ") {
        return Amount::Unlimited;
    }
    let counted = s.attempt(|s| {
        let n = s.number()?;
        s.match_char(' ').then_some(n)
    });
    counted.map_or(Amount::Count(1), Amount::Count)
}

/// Parses a comma-separated item list ending in a period. `none` is the
/// empty list.
#[must_use]
pub fn parse_item_list(text: &str) -> Option<Vec<Item>> {
    let text = text.trim();
    if text.trim_end_matches('.').eq_ignore_ascii_case("none") {
        return Some(Vec::new());
    }
    let mut s = Scanner::new(text);
    let items = s.list(",", |s| {
        let clause = s.clause()?;
        parse_item(clause)
    });
    s.match_char('.');
    (s.is_at_end() && !items.is_empty()).then_some(items)
}
