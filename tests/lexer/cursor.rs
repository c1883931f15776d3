//! Integration tests for the block cursor
//!
//! Tests stepping, lookahead, history limits, and bookmarks.

use turnreport_foundation::{CancelFlag, ErrorKind};
use turnreport_lexer::{BlockCursor, BlockReader, StrLines};

const TEXT: &str = "one\ntwo\nthree\nfour\nfive\n";

fn cursor(history: usize) -> BlockCursor<BlockReader<StrLines<'static>>> {
    BlockCursor::with_history(BlockReader::from_str(TEXT), history)
}

fn current<'a>(c: &'a BlockCursor<BlockReader<StrLines<'static>>>) -> Option<&'a str> {
    c.current().map(|b| b.text())
}

#[test]
fn steps_forward_to_the_end() {
    let mut c = cursor(4);
    assert_eq!(current(&c), None);
    let mut seen = Vec::new();
    while c.next().unwrap() {
        seen.push(current(&c).unwrap().to_string());
    }
    assert_eq!(seen, ["one", "two", "three", "four", "five"]);
    assert!(c.is_at_end());
    assert!(!c.next().unwrap());
}

#[test]
fn back_after_end_restores_last_block() {
    let mut c = cursor(4);
    while c.next().unwrap() {}
    c.back().unwrap();
    assert_eq!(current(&c), Some("five"));
    c.back().unwrap();
    assert_eq!(current(&c), Some("four"));
}

#[test]
fn back_beyond_history_is_an_error() {
    let mut c = cursor(2);
    for _ in 0..5 {
        c.next().unwrap();
    }
    c.back().unwrap();
    c.back().unwrap();
    let err = c.back().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Cursor(_)));
    assert_eq!(current(&c), Some("three"));
}

#[test]
fn back_before_first_next_is_an_error() {
    assert!(cursor(4).back().is_err());
}

#[test]
fn peek_does_not_move() {
    let mut c = cursor(4);
    assert_eq!(c.peek(1).unwrap().map(|b| b.text()), Some("one"));
    c.next().unwrap();
    assert_eq!(c.peek(2).unwrap().map(|b| b.text()), Some("three"));
    assert_eq!(c.peek(9).unwrap(), None);
    assert_eq!(current(&c), Some("one"));
}

#[test]
fn skip_until_stops_before_match() {
    let mut c = cursor(4);
    let skipped = c.skip_until(|b| b.text() == "four").unwrap();
    assert_eq!(skipped, 3);
    c.next().unwrap();
    assert_eq!(current(&c), Some("four"));
}

#[test]
fn bookmarks_pin_history() {
    let mut c = cursor(1);
    c.next().unwrap();
    assert_eq!(c.push_bookmark(), 1);
    while c.next().unwrap() {}
    c.pop_bookmark().unwrap();
    assert_eq!(current(&c), Some("one"));
    assert_eq!(c.bookmark_depth(), 0);
    assert!(c.pop_bookmark().is_err());
}

#[test]
fn failed_attempt_rewinds() {
    let mut c = cursor(4);
    c.next().unwrap();
    let none: Option<()> = c
        .attempt(|c| {
            c.next()?;
            c.next()?;
            Ok(None)
        })
        .unwrap();
    assert!(none.is_none());
    assert_eq!(current(&c), Some("one"));

    let kept = c
        .attempt(|c| {
            c.next()?;
            Ok(c.current().map(|b| b.line))
        })
        .unwrap();
    assert_eq!(kept, Some(2));
    assert_eq!(c.position(), Some(1));
}

#[test]
fn cancelled_cursor_reports_last_line() {
    let flag = CancelFlag::new();
    let mut c = cursor(4).with_cancel(flag.clone());
    c.next().unwrap();
    c.next().unwrap();
    flag.cancel();
    let err = c.next().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Cancelled { .. }));
    assert!(c.last_line() >= 2);
}
