//! Line reader and block joiner.
//!
//! Reads physical lines from a [`LineSource`] and re-joins wrapped lines
//! into logical [`Block`]s. The report engine wraps long lines and indents
//! the continuation, so a line continues the current block when it is
//! indented deeper than the block's first line. Blank lines, dashed rules
//! and single-line headings (`Exits:`) are never continued.
//!
//! Structure lines (`+ `) open a nested scope: unit lines indented by
//! exactly two spaces belong to the structure until a blank line or a line
//! at column zero closes it.
//!
//! The reader never fails on odd indentation. When a line could be read
//! either way it starts a new block.

use std::io::BufRead;

use turnreport_foundation::Result;

use crate::block::{Block, BlockKind};

// =============================================================================
// Line sources
// =============================================================================

/// Supplies physical lines without their terminators.
pub trait LineSource {
    /// Returns the next line, or `None` at end of input.
    ///
    /// # Errors
    /// Returns an I/O error if the underlying stream fails.
    fn next_line(&mut self) -> Result<Option<String>>;
}

/// Lines of an in-memory string.
pub struct StrLines<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> StrLines<'a> {
    /// Creates a source over `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
        }
    }
}

impl LineSource for StrLines<'_> {
    fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next().map(str::to_string))
    }
}

/// Lines of any buffered reader.
pub struct IoLines<R> {
    reader: R,
    buf: String,
}

impl<R: BufRead> IoLines<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> LineSource for IoLines<R> {
    fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        let line = self.buf.trim_end_matches(['\n', '\r']);
        Ok(Some(line.to_string()))
    }
}

// =============================================================================
// Block reader
// =============================================================================

/// How one physical line relates to the block being built.
#[derive(Debug, PartialEq, Eq)]
enum LineRole {
    Continuation,
    Start(BlockKind, usize),
}

/// Joins physical lines into logical blocks.
pub struct BlockReader<S> {
    source: S,
    line_no: usize,
    current: Option<Block>,
    structure_open: bool,
}

impl<'a> BlockReader<StrLines<'a>> {
    /// Creates a reader over an in-memory report.
    #[must_use]
    pub fn from_str(text: &'a str) -> Self {
        Self::new(StrLines::new(text))
    }
}

impl<S: LineSource> BlockReader<S> {
    /// Creates a reader over a line source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            line_no: 0,
            current: None,
            structure_open: false,
        }
    }

    /// Number of physical lines read so far.
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    /// Returns the next complete block.
    ///
    /// A block is complete once the line after it has been seen, so the
    /// reader always holds at most one block in progress.
    ///
    /// # Errors
    /// Propagates line source errors.
    pub fn next_block(&mut self) -> Result<Option<Block>> {
        loop {
            let Some(raw) = self.source.next_line()? else {
                return Ok(self.current.take());
            };
            self.line_no += 1;
            match self.classify(&raw) {
                LineRole::Continuation => {
                    if let Some(block) = self.current.as_mut() {
                        block.push_line(raw);
                    }
                }
                LineRole::Start(kind, indent) => {
                    let block = Block::new(self.line_no, indent, kind, raw);
                    if let Some(done) = self.current.replace(block) {
                        return Ok(Some(done));
                    }
                }
            }
        }
    }

    fn classify(&mut self, raw: &str) -> LineRole {
        let trimmed = raw.trim_start();
        if trimmed.trim_end().is_empty() {
            self.structure_open = false;
            return LineRole::Start(BlockKind::Blank, 0);
        }
        let indent = raw.len() - trimmed.len();

        if is_divider(trimmed) {
            self.structure_open = false;
            return LineRole::Start(BlockKind::Divider, indent);
        }

        if let Some(marker) = marker(trimmed) {
            if indent == 0 {
                return match marker {
                    Marker::Structure => {
                        self.structure_open = true;
                        LineRole::Start(BlockKind::Structure, 0)
                    }
                    Marker::Unit { own } => {
                        self.structure_open = false;
                        LineRole::Start(
                            BlockKind::Unit { own, nested: false },
                            0,
                        )
                    }
                };
            }
            if let Marker::Unit { own } = marker {
                if indent == 2 && self.structure_open {
                    return LineRole::Start(BlockKind::Unit { own, nested: true }, indent);
                }
            }
            if !self.continues(indent) {
                // Ambiguous padding: keep it as a block of its own.
                let kind = match marker {
                    Marker::Structure => BlockKind::Structure,
                    Marker::Unit { own } => BlockKind::Unit { own, nested: false },
                };
                return LineRole::Start(kind, indent);
            }
            return LineRole::Continuation;
        }

        if self.continues(indent) {
            return LineRole::Continuation;
        }
        if indent == 0 {
            self.structure_open = false;
        }
        LineRole::Start(BlockKind::Text, indent)
    }

    fn continues(&self, indent: usize) -> bool {
        self.current.as_ref().is_some_and(|block| match block.kind {
            BlockKind::Blank | BlockKind::Divider => false,
            BlockKind::Text if block.is_heading() => false,
            _ => indent > block.indent,
        })
    }
}

impl<S: LineSource> Iterator for BlockReader<S> {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_block().transpose()
    }
}

/// Reads every block of an in-memory report.
///
/// # Errors
/// Never fails for in-memory input; the signature matches streaming sources.
pub fn read_blocks(text: &str) -> Result<Vec<Block>> {
    BlockReader::from_str(text).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Unit { own: bool },
    Structure,
}

fn marker(trimmed: &str) -> Option<Marker> {
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    if chars.next() != Some(' ') {
        return None;
    }
    match first {
        '-' => Some(Marker::Unit { own: false }),
        '*' => Some(Marker::Unit { own: true }),
        '+' => Some(Marker::Structure),
        _ => None,
    }
}

fn is_divider(trimmed: &str) -> bool {
    let trimmed = trimmed.trim_end();
    trimmed.len() >= 5 && trimmed.bytes().all(|b| b == b'-')
}
