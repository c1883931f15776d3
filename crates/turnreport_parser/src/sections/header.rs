//! The report header: faction, date and engine lines.

use turnreport_foundation::model::{EngineInfo, FactionInfo, TurnDate};
use turnreport_foundation::{Error, ReportSink, Result, emit};
use turnreport_lexer::Block;

use crate::entity::entity_ref;

/// One recognized header line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderLine {
    /// `Semigallians (18) (War 1, Trade 2, Magic 2)`
    Faction(FactionInfo),
    /// `May, Year 3`
    Date(TurnDate),
    /// `Atlantis Engine Version: 5.2.4 (beta)`
    Engine(String),
    /// `Standard, Version: 1.0.0 (beta)`
    Ruleset(String, String),
}

/// Classifies one header line.
#[must_use]
pub fn parse_header_line(text: &str) -> Option<HeaderLine> {
    let text = text.trim();
    if let Some(version) = text.strip_prefix("Atlantis Engine Version:") {
        return Some(HeaderLine::Engine(version.trim().to_string()));
    }
    if let Some((ruleset, version)) = text.split_once(", Version:") {
        return Some(HeaderLine::Ruleset(
            ruleset.trim().to_string(),
            version.trim().to_string(),
        ));
    }
    if let Some((month, year)) = text.split_once(", Year ") {
        let year = year.trim_end_matches('.').trim().parse().ok()?;
        return Some(HeaderLine::Date(TurnDate {
            month: month.trim().to_string(),
            year,
        }));
    }
    parse_faction_line(text).map(HeaderLine::Faction)
}

/// `Name (n)` with an optional trailing `(War 1, Trade 2)` attribute group.
fn parse_faction_line(text: &str) -> Option<FactionInfo> {
    let (head, attributes) = match trailing_group(text) {
        Some((head, inner)) if !inner.bytes().all(|b| b.is_ascii_digit()) => {
            (head, parse_attributes(inner))
        }
        _ => (text, Vec::new()),
    };
    let reference = entity_ref(head)?;
    Some(FactionInfo {
        name: reference.name,
        number: reference.number,
        attributes,
    })
}

/// Splits a balanced parenthesized group off the end of `text`.
fn trailing_group(text: &str) -> Option<(&str, &str)> {
    let body = text.strip_suffix(')')?;
    let mut depth = 1usize;
    for (i, c) in body.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    return Some((body[..i].trim_end(), &body[i + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_attributes(inner: &str) -> Vec<(String, u32)> {
    inner
        .split(',')
        .filter_map(|pair| {
            let (name, points) = pair.trim().rsplit_once(' ')?;
            Some((name.to_string(), points.parse().ok()?))
        })
        .collect()
}

/// Header section state.
#[derive(Debug, Default)]
pub struct HeaderSection {
    engine: EngineInfo,
    faction_written: bool,
    date_written: bool,
}

impl HeaderSection {
    /// Starts on the `Atlantis Report For:` block.
    ///
    /// # Errors
    /// Propagates sink errors.
    pub fn begin(block: &Block, sink: &mut dyn ReportSink) -> Result<Self> {
        let mut section = Self::default();
        let rest = block
            .text()
            .trim_start_matches("Atlantis Report For")
            .trim_start_matches(':')
            .trim();
        if !rest.is_empty() {
            section.apply(rest, block.line, sink)?;
        }
        Ok(section)
    }

    /// Blank lines are kept until the ruleset line has been read.
    #[must_use]
    pub fn wants(&self, block: &Block) -> bool {
        if block.is_blank() {
            return self.engine.ruleset.is_none();
        }
        block.indent == 0 && parse_header_line(block.text()).is_some()
    }

    /// Handles one header line.
    ///
    /// # Errors
    /// Returns a parse error for a line that is not a header line.
    pub fn accept(&mut self, block: &Block, sink: &mut dyn ReportSink) -> Result<()> {
        if block.is_blank() {
            return Ok(());
        }
        self.apply(block.text(), block.line, sink)
    }

    fn apply(&mut self, text: &str, line: usize, sink: &mut dyn ReportSink) -> Result<()> {
        match parse_header_line(text) {
            Some(HeaderLine::Faction(faction)) if !self.faction_written => {
                self.faction_written = true;
                sink.property("faction")?;
                emit(sink, &faction)
            }
            Some(HeaderLine::Date(date)) if !self.date_written => {
                self.date_written = true;
                sink.property("date")?;
                emit(sink, &date)
            }
            Some(HeaderLine::Engine(version)) => {
                self.engine.version = Some(version);
                Ok(())
            }
            Some(HeaderLine::Ruleset(ruleset, version)) => {
                self.engine.ruleset = Some(ruleset);
                self.engine.ruleset_version = Some(version);
                Ok(())
            }
            _ => Err(Error::parse(format!("unexpected header line '{text}'"), line)),
        }
    }

    /// Writes the engine record.
    ///
    /// # Errors
    /// Propagates sink errors.
    pub fn finish(self, sink: &mut dyn ReportSink) -> Result<()> {
        if self.engine == EngineInfo::default() {
            return Ok(());
        }
        sink.property("engine")?;
        emit(sink, &self.engine)
    }
}
