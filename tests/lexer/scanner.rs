//! Integration tests for the scanner
//!
//! Tests numbers, delimited text, clauses, and speculative reads.

use turnreport_lexer::Scanner;

#[test]
fn numbers_and_decimals() {
    let mut s = Scanner::new("-12 480 15.2.");
    assert_eq!(s.integer(), Some(-12));
    s.skip_whitespace();
    assert_eq!(s.number(), Some(480));
    s.skip_whitespace();
    assert_eq!(s.decimal(), Some(15.2));
    assert_eq!(s.rest(), ".");
    assert_eq!(s.number(), None);
    assert_eq!(s.rest(), ".");
}

#[test]
fn clause_respects_brackets() {
    let mut s = Scanner::new("crossbow [XBOW] (3.5 lbs), 2 swords [SWOR].");
    assert_eq!(s.clause(), Some("crossbow [XBOW] (3.5 lbs)"));
    assert!(s.match_char(','));
    assert_eq!(s.clause(), Some("2 swords [SWOR]"));
    assert_eq!(s.rest(), ".");
}

#[test]
fn sentence_keeps_commas() {
    let mut s = Scanner::new("Walks from plain (49,17), in Inthon. Next");
    assert_eq!(s.sentence(), Some("Walks from plain (49,17), in Inthon"));
    assert!(s.match_literal(". "));
    assert_eq!(s.sentence(), Some("Next"));
}

#[test]
fn period_inside_word_does_not_end_sentence() {
    let mut s = Scanner::new("Atlantis Engine Version: 5.2.4 (beta).");
    assert_eq!(s.sentence(), Some("Atlantis Engine Version: 5.2.4 (beta)"));
}

#[test]
fn delimited_reads() {
    let mut s = Scanner::new("(a (b) c) \"secret\" [XBOW] tail");
    assert_eq!(s.between('(', ')'), Some("a (b) c"));
    s.skip_whitespace();
    assert_eq!(s.quoted(), Some("secret"));
    s.skip_whitespace();
    assert_eq!(s.bracketed_code(), Some("XBOW"));
    assert_eq!(s.take_rest(), " tail");
    assert!(s.is_at_end());
}

#[test]
fn before_and_before_backwards() {
    let mut s = Scanner::new("Sandlings (384) attacks Mystic Masons (15876)");
    assert_eq!(s.before(" attacks "), Some("Sandlings (384)"));
    let mut s = Scanner::new("Tower [1] : Tower : fine");
    assert_eq!(s.before_backwards(" : "), Some("Tower [1] : Tower"));
    assert_eq!(s.rest(), "fine");
}

#[test]
fn list_leaves_trailing_separator() {
    let mut s = Scanner::new("North, Northeast, ; rest");
    let items = s.list(",", |s| {
        let word = s.until_any(&[',', ';']).trim();
        (!word.is_empty()).then_some(word)
    });
    assert_eq!(items, ["North", "Northeast"]);
    assert_eq!(s.rest(), ", ; rest");
}

#[test]
fn attempt_restores_position() {
    let mut s = Scanner::new("abc 12");
    let result = s.attempt(|s| {
        s.match_literal("abc");
        s.skip_whitespace();
        s.match_literal("x").then_some(())
    });
    assert!(result.is_none());
    assert_eq!(s.pos(), 0);
    assert!(s.match_ignore_case("ABC"));
}
