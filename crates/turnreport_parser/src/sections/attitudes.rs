//! `Declared Attitudes (default Neutral):` and its stance lines.

use turnreport_foundation::model::{Attitude, Attitudes};
use turnreport_foundation::{Error, ReportSink, Result, emit};
use turnreport_lexer::{Block, BlockKind, Scanner};

use crate::entity::entity_ref;

/// Parses `Ally : Foo (1), Bar (2).` or `Hostile : none.`
#[must_use]
pub fn parse_attitude_line(text: &str) -> Option<Attitude> {
    let (stance, list) = text.trim().split_once(" : ")?;
    let stance = stance.trim();
    if stance.is_empty() || stance.contains(' ') {
        return None;
    }
    let list = list.trim().trim_end_matches('.');
    let factions = if list.eq_ignore_ascii_case("none") {
        Vec::new()
    } else {
        let mut s = Scanner::new(list);
        let factions = s.list(",", |s| entity_ref(s.clause()?));
        if !s.is_at_end() || factions.is_empty() {
            return None;
        }
        factions
    };
    Some(Attitude {
        stance: stance.to_string(),
        factions,
    })
}

/// Attitude section state. The record is written when the section ends.
#[derive(Debug)]
pub struct AttitudesSection {
    attitudes: Attitudes,
}

impl AttitudesSection {
    /// Reads the default stance from the heading.
    #[must_use]
    pub fn begin(block: &Block) -> Self {
        let mut s = Scanner::new(block.text());
        let default = s
            .after("(default ")
            .and_then(|_| s.before(")"))
            .unwrap_or("Neutral");
        Self {
            attitudes: Attitudes {
                default: default.trim().to_string(),
                declared: Vec::new(),
            },
        }
    }

    /// Blank lines and stance lines.
    #[must_use]
    pub fn wants(&self, block: &Block) -> bool {
        block.is_blank()
            || (block.kind == BlockKind::Text && parse_attitude_line(block.text()).is_some())
    }

    /// Collects one stance line.
    ///
    /// # Errors
    /// Returns a parse error if the line is not a stance line.
    pub fn accept(&mut self, block: &Block) -> Result<()> {
        if block.is_blank() {
            return Ok(());
        }
        let attitude = parse_attitude_line(block.text())
            .ok_or_else(|| Error::parse("expected 'Stance : factions.'", block.line))?;
        self.attitudes.declared.push(attitude);
        Ok(())
    }

    /// Writes the `attitudes` record.
    ///
    /// # Errors
    /// Propagates sink errors.
    pub fn finish(self, sink: &mut dyn ReportSink) -> Result<()> {
        sink.property("attitudes")?;
        emit(sink, &self.attitudes)
    }
}
