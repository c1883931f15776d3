//! Region observations.
//!
//! ```text
//! Header ─► Divider ─► Attributes ─► Exits ─► Contents (units | structures)
//! ```
//!
//! A region is written as it is read: header fields and attributes first,
//! then exits, then units. Structures collect their nested units, so they
//! and the gate line are held back and written when the region ends.

use turnreport_debug::Tracer;
use turnreport_foundation::model::{Coords, Gate, Region, Structure};
use turnreport_foundation::sink::emit_value;
use turnreport_foundation::{Error, ReportSink, Result, emit};
use turnreport_lexer::{Block, BlockKind};

use crate::entity::{
    RegionAttribute, parse_attribute, parse_exit, parse_gate, parse_region_header,
    parse_structure, parse_unit,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Divider,
    Attributes,
    Exits,
    Contents,
}

/// One region being written.
#[derive(Debug)]
struct RegionState {
    coords: Coords,
    state: State,
    units_open: bool,
    units: usize,
    structures: Vec<Structure>,
    gate: Option<Gate>,
}

/// Regions section state.
#[derive(Debug)]
pub struct RegionSection {
    current: Option<RegionState>,
}

impl RegionSection {
    /// Opens the `regions` array and the first region.
    ///
    /// # Errors
    /// Returns a parse error if the header cannot be read.
    pub fn begin(block: &Block, sink: &mut dyn ReportSink) -> Result<Self> {
        sink.property("regions")?;
        sink.begin_array()?;
        let mut section = Self { current: None };
        section.start(block, sink)?;
        Ok(section)
    }

    /// A region keeps every block until the next start.
    #[must_use]
    pub fn wants(&self, _block: &Block) -> bool {
        true
    }

    /// Closes the running region and starts the next.
    ///
    /// # Errors
    /// Returns an error if the running region is incomplete or the new
    /// header cannot be read.
    pub fn reenter(
        &mut self,
        block: &Block,
        sink: &mut dyn ReportSink,
        tracer: &mut Tracer,
    ) -> Result<()> {
        self.close(block.line, sink, tracer)?;
        self.start(block, sink)
    }

    fn start(&mut self, block: &Block, sink: &mut dyn ReportSink) -> Result<()> {
        let region = parse_region_header(block.text())
            .ok_or_else(|| Error::parse("unreadable region header", block.line))?;
        sink.begin_object()?;
        write_fields(&region, sink)?;
        self.current = Some(RegionState {
            coords: region.coords,
            state: State::Divider,
            units_open: false,
            units: 0,
            structures: Vec::new(),
            gate: None,
        });
        Ok(())
    }

    /// Feeds one block to the running region.
    ///
    /// # Errors
    /// Returns a parse error for anything the region grammar does not allow
    /// at this point.
    pub fn accept(&mut self, block: &Block, sink: &mut dyn ReportSink) -> Result<()> {
        let Some(region) = self.current.as_mut() else {
            return Err(Error::parse("region content without a header", block.line));
        };
        if block.is_blank() && region.state != State::Divider {
            return Ok(());
        }
        match region.state {
            State::Divider => {
                if !block.is_divider() {
                    return Err(Error::parse("expected a divider under the region header", block.line));
                }
                region.state = State::Attributes;
                Ok(())
            }
            State::Attributes => region.attribute(block, sink),
            State::Exits => region.exit(block, sink),
            State::Contents => region.content(block, sink),
        }
    }

    fn close(&mut self, line: usize, sink: &mut dyn ReportSink, tracer: &mut Tracer) -> Result<()> {
        match self.current.take() {
            Some(region) => region.finish(line, sink, tracer),
            None => Ok(()),
        }
    }

    /// Closes the last region and the array.
    ///
    /// # Errors
    /// Returns an error if the last region never reached `Exits:`.
    pub fn finish(
        mut self,
        line: usize,
        sink: &mut dyn ReportSink,
        tracer: &mut Tracer,
    ) -> Result<()> {
        self.close(line, sink, tracer)?;
        sink.end_array()
    }
}

impl RegionState {
    fn attribute(&mut self, block: &Block, sink: &mut dyn ReportSink) -> Result<()> {
        if block.kind == BlockKind::Text && block.text() == "Exits:" {
            sink.property("exits")?;
            sink.begin_array()?;
            self.state = State::Exits;
            return Ok(());
        }
        if block.kind != BlockKind::Text {
            return Err(Error::parse("expected 'Exits:' before region contents", block.line));
        }
        match parse_attribute(block.text()) {
            Some(RegionAttribute::Gate(gate)) => {
                self.gate = Some(gate);
                Ok(())
            }
            Some(attribute) => write_attribute(attribute, sink),
            None => Err(Error::parse(
                format!("unknown region attribute '{}'", block.text()),
                block.line,
            )),
        }
    }

    fn exit(&mut self, block: &Block, sink: &mut dyn ReportSink) -> Result<()> {
        if block.kind == BlockKind::Text {
            let text = block.text();
            if text.trim_end_matches('.').eq_ignore_ascii_case("none") {
                return Ok(());
            }
            if let Some(exit) = parse_exit(text) {
                return emit(sink, &exit);
            }
        }
        sink.end_array()?;
        self.state = State::Contents;
        self.content(block, sink)
    }

    fn content(&mut self, block: &Block, sink: &mut dyn ReportSink) -> Result<()> {
        match block.kind {
            BlockKind::Unit { own, nested } => {
                let unit = parse_unit(block.body(), own)
                    .ok_or_else(|| Error::parse("unreadable unit", block.line))?;
                self.units += 1;
                match self.structures.last_mut() {
                    Some(structure) if nested => {
                        structure.units.push(unit);
                        Ok(())
                    }
                    _ => {
                        if !self.units_open {
                            sink.property("units")?;
                            sink.begin_array()?;
                            self.units_open = true;
                        }
                        emit(sink, &unit)
                    }
                }
            }
            BlockKind::Structure => {
                let structure = parse_structure(block.body())
                    .ok_or_else(|| Error::parse("unreadable structure", block.line))?;
                self.structures.push(structure);
                Ok(())
            }
            BlockKind::Text => match parse_gate(block.text()) {
                Some(gate) => {
                    self.gate = Some(gate);
                    Ok(())
                }
                None => Err(Error::parse(
                    format!("unexpected text in region '{}'", block.text()),
                    block.line,
                )),
            },
            BlockKind::Blank => Ok(()),
            BlockKind::Divider => Err(Error::parse("unexpected divider in region", block.line)),
        }
    }

    fn finish(self, line: usize, sink: &mut dyn ReportSink, tracer: &mut Tracer) -> Result<()> {
        match self.state {
            State::Divider | State::Attributes => {
                return Err(Error::unexpected_end("'Exits:'", line));
            }
            State::Exits => sink.end_array()?,
            State::Contents => {}
        }
        if self.units_open {
            sink.end_array()?;
        }
        if !self.structures.is_empty() {
            sink.property("structures")?;
            emit(sink, &self.structures)?;
        }
        if let Some(gate) = &self.gate {
            sink.property("gate")?;
            emit(sink, gate)?;
        }
        sink.end_object()?;
        tracer.region_parsed(&self.coords, self.units, self.structures.len());
        Ok(())
    }
}

/// Writes every present header field of `region`.
fn write_fields(region: &Region, sink: &mut dyn ReportSink) -> Result<()> {
    let value = serde_json::to_value(region)?;
    if let serde_json::Value::Object(fields) = value {
        for (name, field) in &fields {
            sink.property(name)?;
            emit_value(sink, field)?;
        }
    }
    Ok(())
}

fn write_attribute(attribute: RegionAttribute, sink: &mut dyn ReportSink) -> Result<()> {
    match attribute {
        RegionAttribute::Weather(weather) => {
            sink.property("weather")?;
            emit(sink, &weather)
        }
        RegionAttribute::Wages(wages) => {
            sink.property("wages")?;
            emit(sink, &wages)
        }
        RegionAttribute::Wanted(items) => {
            sink.property("wanted")?;
            emit(sink, &items)
        }
        RegionAttribute::ForSale(items) => {
            sink.property("forSale")?;
            emit(sink, &items)
        }
        RegionAttribute::Entertainment(amount) => {
            sink.property("entertainment")?;
            emit(sink, &amount)
        }
        RegionAttribute::Products(items) => {
            sink.property("products")?;
            emit(sink, &items)
        }
        RegionAttribute::Gate(gate) => {
            sink.property("gate")?;
            emit(sink, &gate)
        }
    }
}
