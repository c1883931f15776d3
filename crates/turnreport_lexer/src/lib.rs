//! Line reading and text scanning for Atlantis turn reports.
//!
//! This crate provides:
//! - [`BlockReader`] - Joins wrapped physical lines into logical [`Block`]s
//! - [`Cursor`] - Buffered, rewindable lookahead with bookmarks
//! - [`Scanner`] - Position-tracking primitives over one block's text

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod block;
pub mod cursor;
pub mod reader;
pub mod scanner;

pub use block::{Block, BlockKind};
pub use cursor::{BlockCursor, Cursor, DEFAULT_HISTORY, Located};
pub use reader::{BlockReader, IoLines, LineSource, StrLines, read_blocks};
pub use scanner::Scanner;
