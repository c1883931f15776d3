//! `Faction Status:` counters and the one-line `Unclaimed silver:` section.

use turnreport_foundation::model::FactionStatus;
use turnreport_foundation::{Error, ReportSink, Result, Scalar, emit};
use turnreport_lexer::{Block, BlockKind, Scanner};

/// Parses `Tax Regions: 1 (3)` or `Mages: 0`.
#[must_use]
pub fn parse_status_line(text: &str) -> Option<FactionStatus> {
    let mut s = Scanner::new(text.trim());
    let what = s.before(":")?.trim();
    if what.is_empty() {
        return None;
    }
    s.skip_whitespace();
    let amount = s.number()?;
    s.skip_whitespace();
    let max = s.attempt(|s| s.between('(', ')')?.trim().parse::<u32>().ok());
    s.match_char('.');
    s.is_at_end().then(|| FactionStatus {
        what: what.to_string(),
        amount,
        max,
    })
}

/// Faction status section state.
#[derive(Debug, Default)]
pub struct StatusSection;

impl StatusSection {
    /// Opens the `status` array.
    ///
    /// # Errors
    /// Propagates sink errors.
    pub fn begin(sink: &mut dyn ReportSink) -> Result<Self> {
        sink.property("status")?;
        sink.begin_array()?;
        Ok(Self)
    }

    /// Status continues only with `key: value` counter lines.
    #[must_use]
    pub fn wants(&self, block: &Block) -> bool {
        block.kind == BlockKind::Text && parse_status_line(block.text()).is_some()
    }

    /// Writes one counter.
    ///
    /// # Errors
    /// Returns a parse error if the line is not a counter.
    pub fn accept(&mut self, block: &Block, sink: &mut dyn ReportSink) -> Result<()> {
        let status = parse_status_line(block.text())
            .ok_or_else(|| Error::parse("expected a 'Name: amount (max)' line", block.line))?;
        emit(sink, &status)
    }

    /// Closes the array.
    ///
    /// # Errors
    /// Propagates sink errors.
    pub fn finish(self, sink: &mut dyn ReportSink) -> Result<()> {
        sink.end_array()
    }
}

/// Writes `unclaimedSilver` from `Unclaimed silver: 1234.`
///
/// # Errors
/// Returns a parse error if the amount is missing.
pub fn write_unclaimed_silver(block: &Block, sink: &mut dyn ReportSink) -> Result<()> {
    let amount = block
        .text()
        .strip_prefix("Unclaimed silver:")
        .map(|rest| rest.trim().trim_start_matches('$').trim_end_matches('.'))
        .and_then(|rest| rest.parse::<u32>().ok())
        .ok_or_else(|| Error::parse("expected 'Unclaimed silver: N.'", block.line))?;
    sink.field("unclaimedSilver", Scalar::from(amount))
}
