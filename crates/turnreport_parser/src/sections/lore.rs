//! Skill, item and object reports.
//!
//! Entries look like `combat [COMB] 1: In combat...`, `sword [SWOR],
//! weight 1. This is...` or `Tower: This is a building...`. A paragraph
//! that does not open an entry continues the previous description.

use turnreport_foundation::model::Lore;
use turnreport_foundation::{Error, ReportSink, Result, emit};
use turnreport_lexer::{Block, Scanner};

/// Parses the opening paragraph of a lore entry.
#[must_use]
pub fn parse_lore_entry(text: &str) -> Option<Lore> {
    coded_entry(text).or_else(|| named_entry(text))
}

fn coded_entry(text: &str) -> Option<Lore> {
    let mut s = Scanner::new(text.trim());
    let name = s.before(" [")?.trim();
    if name.is_empty() || name.contains(['.', ':', ',']) {
        return None;
    }
    let code = s.before("]")?;
    if code.is_empty() || code.contains(char::is_whitespace) {
        return None;
    }
    let level = s.attempt(|s| {
        s.skip_whitespace();
        s.number()
    });
    s.skip_whitespace();
    if !(s.match_char(':') || s.match_char(',')) && level.is_some() {
        return None;
    }
    Some(Lore {
        name: name.to_string(),
        code: Some(code.to_string()),
        level,
        description: s.take_rest().trim().to_string(),
    })
}

fn named_entry(text: &str) -> Option<Lore> {
    let (name, description) = text.trim().split_once(':')?;
    let name = name.trim();
    if name.is_empty() || name.contains(['.', ',', '(', '[']) || name.split(' ').count() > 4 {
        return None;
    }
    Some(Lore {
        name: name.to_string(),
        code: None,
        level: None,
        description: description.trim().to_string(),
    })
}

/// Lore list state. Entries are written once their last paragraph is read.
#[derive(Debug)]
pub struct LoreSection {
    current: Option<Lore>,
}

impl LoreSection {
    /// Opens the list under `property`.
    ///
    /// # Errors
    /// Propagates sink errors.
    pub fn begin(property: &str, sink: &mut dyn ReportSink) -> Result<Self> {
        sink.property(property)?;
        sink.begin_array()?;
        Ok(Self { current: None })
    }

    /// Lore runs until another section starts.
    #[must_use]
    pub fn wants(&self, block: &Block) -> bool {
        !block.is_divider()
    }

    /// Opens an entry or extends the running one.
    ///
    /// # Errors
    /// Returns a parse error for text before the first entry.
    pub fn accept(&mut self, block: &Block, sink: &mut dyn ReportSink) -> Result<()> {
        if block.is_blank() {
            return Ok(());
        }
        if let Some(entry) = parse_lore_entry(block.text()) {
            self.flush(sink)?;
            self.current = Some(entry);
            return Ok(());
        }
        let Some(current) = self.current.as_mut() else {
            return Err(Error::parse("report text before the first entry", block.line));
        };
        if !current.description.is_empty() {
            current.description.push(' ');
        }
        current.description.push_str(block.text());
        Ok(())
    }

    fn flush(&mut self, sink: &mut dyn ReportSink) -> Result<()> {
        match self.current.take() {
            Some(entry) => emit(sink, &entry),
            None => Ok(()),
        }
    }

    /// Writes the last entry and closes the list.
    ///
    /// # Errors
    /// Propagates sink errors.
    pub fn finish(mut self, sink: &mut dyn ReportSink) -> Result<()> {
        self.flush(sink)?;
        sink.end_array()
    }
}
