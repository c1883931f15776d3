//! Integration tests for Layer 2: Parser
//!
//! Tests for entity grammars, section parsing, whole reports, and section
//! subsets.

mod entities;
mod report;
mod sections;
mod subset;

pub const SEMIGALLIANS: &str = include_str!("../fixtures/semigallians.rep");
pub const MYSTIC_MASONS: &str = include_str!("../fixtures/mystic_masons.rep");
