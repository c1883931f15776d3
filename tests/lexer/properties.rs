//! Property tests for the lexer
//!
//! Arbitrary text must never panic the reader, cursor, or scanner.

use proptest::prelude::*;
use turnreport_lexer::{BlockCursor, BlockReader, Scanner, read_blocks};

fn report_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("------------".to_string()),
        "[ ]{0,4}[-*+] [a-zA-Z0-9 (),.\\[\\]]{0,30}",
        "[ ]{0,6}[a-zA-Z0-9 (),.:$\\[\\]]{0,40}",
    ]
}

proptest! {
    #[test]
    fn blocks_cover_every_line(lines in prop::collection::vec(report_line(), 0..40)) {
        let text = lines.join("\n");
        let blocks = read_blocks(&text).unwrap();
        let covered: usize = blocks.iter().map(|b| b.lines.len()).sum();
        prop_assert_eq!(covered, text.lines().count());
        for pair in blocks.windows(2) {
            prop_assert_eq!(pair[0].last_line() + 1, pair[1].line);
        }
        for block in &blocks {
            prop_assert!(!block.text().contains('\n'));
        }
    }

    #[test]
    fn cursor_replays_reader(lines in prop::collection::vec(report_line(), 0..30), history in 1usize..6) {
        let text = lines.join("\n");
        let expected = read_blocks(&text).unwrap();
        let mut cursor = BlockCursor::with_history(BlockReader::from_str(&text), history);
        let mut seen = Vec::new();
        while cursor.next().unwrap() {
            seen.push(cursor.current().unwrap().clone());
        }
        prop_assert_eq!(&seen, &expected);
        for _ in 0..history.min(expected.len()) {
            prop_assert!(cursor.back().is_ok());
        }
    }

    #[test]
    fn scanner_never_panics(text in "\\PC{0,60}") {
        let mut s = Scanner::new(&text);
        let _ = s.clause();
        let _ = s.sentence();
        let _ = s.integer();
        let _ = s.decimal();
        let _ = s.between('(', ')');
        let _ = s.take_rest();
        prop_assert!(s.is_at_end());
    }
}
