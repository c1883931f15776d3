//! Integration tests for the block reader
//!
//! Tests line joining, nesting under structures, and line sources.

use std::io::Cursor as IoCursor;

use turnreport_lexer::{BlockKind, BlockReader, IoLines, read_blocks};

#[test]
fn wrapped_event_is_one_block() {
    let text = "Events during turn:\nScout (120): Walks from plain (49,17) in Inthon to forest\n  (49,15) in Inthon.\nGuards (112): Earns 20 silver.\n";
    let blocks = read_blocks(text).unwrap();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].is_heading());
    assert_eq!(
        blocks[1].text(),
        "Scout (120): Walks from plain (49,17) in Inthon to forest (49,15) in Inthon."
    );
    assert_eq!(blocks[1].line, 2);
    assert_eq!(blocks[1].last_line(), 3);
    assert_eq!(blocks[1].lines.len(), 2);
    assert_eq!(blocks[2].line, 4);
}

#[test]
fn headings_are_never_continued() {
    let blocks = read_blocks("Exits:\n  North : forest (49,15) in Inthon.\n").unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[1].indent, 2);
    assert_eq!(blocks[1].text(), "North : forest (49,15) in Inthon.");
}

#[test]
fn divider_and_blank_lines() {
    let blocks = read_blocks("plain (1,1) in Inthon.\n------------\n\nnext\n").unwrap();
    let kinds: Vec<_> = blocks.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        [BlockKind::Text, BlockKind::Divider, BlockKind::Blank, BlockKind::Text]
    );
    assert!(blocks[1].is_divider());
    assert!(blocks[2].is_blank());
}

#[test]
fn unit_markers_set_ownership() {
    let blocks = read_blocks("* Scout (120), Semigallians (18).\n- Guards (112), on guard.\n").unwrap();
    assert_eq!(blocks[0].kind, BlockKind::Unit { own: true, nested: false });
    assert_eq!(blocks[0].body(), "Scout (120), Semigallians (18).");
    assert_eq!(blocks[1].kind, BlockKind::Unit { own: false, nested: false });
}

#[test]
fn structure_scope_ends_at_blank_line() {
    let text = "+ Tower [1] : Tower,\n    needs 10.\n  - Keeper (113).\n  * Mine (114).\n\n  - Loose (9).\n";
    let blocks = read_blocks(text).unwrap();
    assert_eq!(blocks[0].kind, BlockKind::Structure);
    assert_eq!(blocks[0].text(), "+ Tower [1] : Tower, needs 10.");
    assert_eq!(blocks[1].kind, BlockKind::Unit { own: false, nested: true });
    assert_eq!(blocks[2].kind, BlockKind::Unit { own: true, nested: true });
    assert!(blocks[3].is_blank());
    assert_eq!(blocks[4].kind, BlockKind::Unit { own: false, nested: false });
}

#[test]
fn io_source_strips_line_endings() {
    let reader = BlockReader::new(IoLines::new(IoCursor::new(b"first\r\nsecond\n".to_vec())));
    let texts: Vec<String> = reader.map(|b| b.unwrap().text().to_string()).collect();
    assert_eq!(texts, ["first", "second"]);
}

#[test]
fn reader_counts_physical_lines() {
    let mut reader = BlockReader::from_str("a\n  b\nc\n");
    while reader.next_block().unwrap().is_some() {}
    assert_eq!(reader.lines_read(), 3);
}

#[test]
fn empty_input_has_no_blocks() {
    assert!(read_blocks("").unwrap().is_empty());
}
