//! Battle reports.
//!
//! ```text
//! A (n) attacks D (m) in <region>!
//!
//! Attackers:
//! <unit>...
//!
//! Defenders:
//! <unit>...
//!
//! [<free round line>...]
//! Round 1:
//! <line>...
//! <outcome>
//!
//! Total Casualties:
//! <line>...
//! Spoils: <items>. | No spoils.
//! ```

use turnreport_foundation::model::{Battle, BattleRound, Coords, EntityRef};
use turnreport_foundation::{Error, ReportSink, Result, emit};
use turnreport_lexer::{Block, Scanner};

use crate::entity::{entity_ref, parse_item_list, parse_unit, scan_coords, scan_entity_ref};

/// The parts of a battle header line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleHeader {
    /// Attacking side.
    pub attacker: EntityRef,
    /// Defending side.
    pub defender: EntityRef,
    /// Region text after `in`.
    pub location: String,
    /// Coordinates found in the location, if any.
    pub coords: Option<Coords>,
}

/// Parses `Sandlings (384) attacks Mystic Masons (15876) in desert (10,12) in Yath!`
#[must_use]
pub fn parse_battle_header(text: &str) -> Option<BattleHeader> {
    let text = text.trim().strip_suffix('!')?;
    let mut s = Scanner::new(text);
    let attacker = entity_ref(s.before(" attacks ")?)?;
    let defender = scan_entity_ref(&mut s)?;
    if !s.match_literal(" in ") {
        return None;
    }
    let location = s.take_rest().trim();
    let coords = {
        let mut s = Scanner::new(location);
        s.until_any(&['(']);
        scan_coords(&mut s)
    };
    Some(BattleHeader {
        attacker,
        defender,
        location: location.to_string(),
        coords,
    })
}

fn is_outcome(text: &str) -> bool {
    text.ends_with("is routed!") || text.ends_with("is destroyed!") || text.contains("ends indecisively")
}

fn round_number(text: &str) -> Option<u32> {
    text.strip_prefix("Round ")?
        .strip_suffix(':')?
        .trim()
        .parse()
        .ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Header,
    Attackers,
    Defenders,
    Rounds,
    Casualties,
    Done,
}

/// Battle list state. Each battle is written when the next one starts or
/// the section ends.
#[derive(Debug)]
pub struct BattleSection {
    current: Option<(Battle, Stage)>,
}

impl BattleSection {
    /// Opens the `battles` array.
    ///
    /// # Errors
    /// Propagates sink errors.
    pub fn begin(block: &Block, sink: &mut dyn ReportSink) -> Result<Self> {
        sink.property("battles")?;
        sink.begin_array()?;
        let mut section = Self { current: None };
        section.start(block);
        Ok(section)
    }

    /// Battles run until another section starts.
    #[must_use]
    pub fn wants(&self, block: &Block) -> bool {
        !block.is_divider()
    }

    /// A new battle header, or a repeated `Battles during turn:` heading.
    ///
    /// # Errors
    /// Returns an error if the running battle is incomplete.
    pub fn reenter(&mut self, block: &Block, sink: &mut dyn ReportSink) -> Result<()> {
        self.flush(block.line, sink)?;
        self.start(block);
        Ok(())
    }

    fn start(&mut self, block: &Block) {
        if let Some(header) = parse_battle_header(block.text()) {
            let battle = Battle {
                attacker: header.attacker,
                defender: header.defender,
                location: header.location,
                coords: header.coords,
                attackers: Vec::new(),
                defenders: Vec::new(),
                rounds: Vec::new(),
                outcome: Vec::new(),
                casualties: Vec::new(),
                spoils: Vec::new(),
            };
            self.current = Some((battle, Stage::Header));
        }
    }

    /// Feeds one block to the running battle.
    ///
    /// # Errors
    /// Returns a parse error when a required anchor is missing.
    pub fn accept(&mut self, block: &Block) -> Result<()> {
        if block.is_blank() {
            return Ok(());
        }
        let Some((battle, stage)) = self.current.as_mut() else {
            return Err(Error::parse("battle text before a battle header", block.line));
        };
        let text = block.body();
        match *stage {
            Stage::Header if text == "Attackers:" => *stage = Stage::Attackers,
            Stage::Header => {
                return Err(Error::parse("expected 'Attackers:'", block.line));
            }
            Stage::Attackers if text == "Defenders:" => *stage = Stage::Defenders,
            Stage::Attackers => {
                let unit = parse_unit(text, false)
                    .ok_or_else(|| Error::parse("expected an attacking unit", block.line))?;
                battle.attackers.push(unit);
            }
            Stage::Defenders => match parse_unit(text, false) {
                Some(unit) => battle.defenders.push(unit),
                None => {
                    *stage = Stage::Rounds;
                    round_line(battle, text);
                }
            },
            Stage::Rounds if text == "Total Casualties:" => *stage = Stage::Casualties,
            Stage::Rounds => round_line(battle, text),
            Stage::Casualties => {
                if let Some(list) = text.strip_prefix("Spoils:") {
                    battle.spoils = parse_item_list(list)
                        .ok_or_else(|| Error::parse("unreadable spoils list", block.line))?;
                    *stage = Stage::Done;
                } else if text == "No spoils." {
                    *stage = Stage::Done;
                } else {
                    battle.casualties.push(text.to_string());
                }
            }
            Stage::Done => {
                return Err(Error::parse("unexpected text after spoils", block.line));
            }
        }
        Ok(())
    }

    fn flush(&mut self, line: usize, sink: &mut dyn ReportSink) -> Result<()> {
        match self.current.take() {
            None => Ok(()),
            Some((_, Stage::Header)) => Err(Error::unexpected_end("'Attackers:'", line)),
            Some((battle, _)) => emit(sink, &battle),
        }
    }

    /// Writes the last battle and closes the array.
    ///
    /// # Errors
    /// Returns an error if the last battle never reached `Attackers:`.
    pub fn finish(mut self, line: usize, sink: &mut dyn ReportSink) -> Result<()> {
        self.flush(line, sink)?;
        sink.end_array()
    }
}

fn round_line(battle: &mut Battle, text: &str) {
    if let Some(number) = round_number(text) {
        battle.rounds.push(BattleRound {
            number: Some(number),
            lines: Vec::new(),
        });
        return;
    }
    if is_outcome(text) {
        battle.outcome.push(text.to_string());
        return;
    }
    if battle.rounds.is_empty() {
        battle.rounds.push(BattleRound {
            number: None,
            lines: Vec::new(),
        });
    }
    if let Some(round) = battle.rounds.last_mut() {
        round.lines.push(text.to_string());
    }
}
