//! Logical blocks.
//!
//! A block is one or more physical lines joined by the continuation rules
//! of the report format: one event, one unit, one structure header, one
//! market line. Blocks are immutable once the reader hands them out.

/// What kind of logical entry a block starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    /// An empty line. Never continued.
    Blank,
    /// A dashed rule under a region header. Never continued.
    Divider,
    /// A unit line, `- ` or `* `.
    Unit {
        /// `*` marks the reporting faction's own unit.
        own: bool,
        /// Indented under an open structure.
        nested: bool,
    },
    /// A structure line, `+ `.
    Structure,
    /// Anything else.
    Text,
}

/// A logical block with its source position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// 1-based line number of the first physical line.
    pub line: usize,
    /// Leading spaces of the first physical line.
    pub indent: usize,
    /// Classification of the first physical line.
    pub kind: BlockKind,
    /// Physical lines exactly as read, line terminators removed.
    pub lines: Vec<String>,
    text: String,
}

impl Block {
    /// Creates a block from its first physical line.
    #[must_use]
    pub fn new(line: usize, indent: usize, kind: BlockKind, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let text = raw.trim().to_string();
        Self {
            line,
            indent,
            kind,
            lines: vec![raw],
            text,
        }
    }

    /// Appends a continuation line.
    pub(crate) fn push_line(&mut self, raw: String) {
        let piece = raw.trim();
        if !piece.is_empty() {
            if !self.text.is_empty() {
                self.text.push(' ');
            }
            self.text.push_str(piece);
        }
        self.lines.push(raw);
    }

    /// The joined text: every physical line trimmed and joined by one space.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The joined text with a leading `- `, `* ` or `+ ` marker removed.
    #[must_use]
    pub fn body(&self) -> &str {
        match self.kind {
            BlockKind::Unit { .. } | BlockKind::Structure => self
                .text
                .get(2..)
                .map_or("", str::trim_start),
            _ => &self.text,
        }
    }

    /// Last physical line number covered by this block.
    #[must_use]
    pub fn last_line(&self) -> usize {
        self.line + self.lines.len().saturating_sub(1)
    }

    /// True for [`BlockKind::Blank`].
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.kind == BlockKind::Blank
    }

    /// True for [`BlockKind::Divider`].
    #[must_use]
    pub fn is_divider(&self) -> bool {
        self.kind == BlockKind::Divider
    }

    /// True for a plain text block whose joined text starts with `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.kind == BlockKind::Text && self.text.starts_with(prefix)
    }

    /// True for a single-line text heading such as `Exits:`.
    #[must_use]
    pub fn is_heading(&self) -> bool {
        self.kind == BlockKind::Text && self.lines.len() == 1 && self.text.ends_with(':')
    }
}
