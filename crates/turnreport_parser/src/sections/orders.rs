//! `Orders Template (...):` to the end of the report.
//!
//! Order text is handed back to the engine next turn, so unit blocks are
//! copied from the raw physical lines, never from joined block text.

use turnreport_foundation::model::UnitOrders;
use turnreport_foundation::{Error, ReportSink, Result, Scalar, emit};
use turnreport_lexer::{Block, Scanner};

#[derive(Debug)]
struct PendingUnit {
    number: u32,
    lines: Vec<String>,
}

/// Orders template state.
#[derive(Debug)]
pub struct OrdersSection {
    started: bool,
    ended: bool,
    unit: Option<PendingUnit>,
}

impl OrdersSection {
    /// Opens the `orders` object and records the template format.
    ///
    /// # Errors
    /// Propagates sink errors.
    pub fn begin(block: &Block, sink: &mut dyn ReportSink) -> Result<Self> {
        sink.property("orders")?;
        sink.begin_object()?;
        let mut s = Scanner::new(block.text());
        s.after("Orders Template");
        s.skip_whitespace();
        if let Some(format) = s.between('(', ')') {
            sink.field("format", Scalar::Str(format.trim()))?;
        }
        Ok(Self {
            started: false,
            ended: false,
            unit: None,
        })
    }

    /// Processes every raw line of the block.
    ///
    /// # Errors
    /// Returns a parse error for a `unit` line before `#atlantis`.
    pub fn accept(&mut self, block: &Block, sink: &mut dyn ReportSink) -> Result<()> {
        for (offset, raw) in block.lines.iter().enumerate() {
            self.line(raw, block.line + offset, sink)?;
        }
        Ok(())
    }

    fn line(&mut self, raw: &str, line: usize, sink: &mut dyn ReportSink) -> Result<()> {
        if self.ended {
            return Ok(());
        }
        let trimmed = raw.trim();
        if let Some(rest) = trimmed.strip_prefix("#atlantis") {
            return self.open(rest, line, sink);
        }
        if trimmed.eq_ignore_ascii_case("#end") {
            self.flush(sink)?;
            self.ended = true;
            return Ok(());
        }
        if let Some(number) = unit_line(trimmed) {
            if !self.started {
                return Err(Error::parse("unit orders before '#atlantis'", line));
            }
            self.flush(sink)?;
            self.unit = Some(PendingUnit {
                number,
                lines: Vec::new(),
            });
            return Ok(());
        }
        if let Some(unit) = self.unit.as_mut() {
            unit.lines.push(raw.to_string());
        }
        Ok(())
    }

    fn open(&mut self, rest: &str, line: usize, sink: &mut dyn ReportSink) -> Result<()> {
        if self.started {
            return Err(Error::parse("second '#atlantis' line", line));
        }
        let mut s = Scanner::new(rest.trim());
        let faction = s
            .number()
            .ok_or_else(|| Error::parse("'#atlantis' without a faction number", line))?;
        s.skip_whitespace();
        sink.field("faction", Scalar::from(faction))?;
        if let Some(password) = s.quoted() {
            sink.field("password", Scalar::Str(password))?;
        }
        sink.property("units")?;
        sink.begin_array()?;
        self.started = true;
        Ok(())
    }

    fn flush(&mut self, sink: &mut dyn ReportSink) -> Result<()> {
        let Some(mut unit) = self.unit.take() else {
            return Ok(());
        };
        while unit.lines.last().is_some_and(|l| l.trim().is_empty()) {
            unit.lines.pop();
        }
        emit(
            sink,
            &UnitOrders {
                unit: unit.number,
                text: unit.lines.join("\n"),
            },
        )
    }

    /// Closes the units array and the `orders` object.
    ///
    /// # Errors
    /// Returns an error if `#atlantis` never appeared.
    pub fn finish(mut self, line: usize, sink: &mut dyn ReportSink) -> Result<()> {
        if !self.started {
            return Err(Error::unexpected_end("'#atlantis'", line));
        }
        self.flush(sink)?;
        sink.end_array()?;
        sink.end_object()
    }
}

/// `unit 120` opens a unit's orders.
fn unit_line(text: &str) -> Option<u32> {
    let (keyword, number) = text.split_once(char::is_whitespace)?;
    if !keyword.eq_ignore_ascii_case("unit") {
        return None;
    }
    number.trim().parse().ok()
}
