//! Integration tests for section subsets
//!
//! Parsing with a subset yields only the chosen sections and never fails on
//! the skipped ones.

use turnreport_debug::{Tracer, TracerConfig};
use turnreport_parser::{ReportParser, SectionKind, SectionSet};

use crate::{MYSTIC_MASONS, SEMIGALLIANS};

fn parser(kinds: &[SectionKind]) -> ReportParser {
    ReportParser::new().with_sections(SectionSet::only(kinds))
}

#[test]
fn battles_only() {
    let report = parser(&[SectionKind::Battles]).parse_report(MYSTIC_MASONS).unwrap();
    assert_eq!(report.battles.len(), 1);
    assert!(report.faction.is_none());
    assert!(report.regions.is_empty());
}

#[test]
fn regions_only() {
    let full = ReportParser::new().parse_report(SEMIGALLIANS).unwrap();
    let report = parser(&[SectionKind::Regions]).parse_report(SEMIGALLIANS).unwrap();
    assert_eq!(report.regions, full.regions);
    assert!(report.orders.is_none());
    assert!(report.events.is_empty());
    assert!(report.unclaimed_silver.is_none());
}

#[test]
fn header_only() {
    let report = parser(&[SectionKind::Header]).parse_report(SEMIGALLIANS).unwrap();
    assert_eq!(report.faction_number(), Some(18));
    assert!(report.regions.is_empty());
    assert!(report.attitudes.is_none());
}

#[test]
fn skipped_sections_are_traced() {
    let mut tracer = Tracer::new(TracerConfig::new().enabled());
    parser(&[SectionKind::UnclaimedSilver])
        .parse_report_with(SEMIGALLIANS, &mut tracer)
        .unwrap();
    assert!(!tracer.buffer().by_event_type("block-skipped").is_empty());
    assert!(tracer.buffer().by_event_type("region-parsed").is_empty());
}

#[test]
fn empty_subset_parses_nothing() {
    let report = ReportParser::new()
        .with_sections(SectionSet::empty())
        .parse_report(SEMIGALLIANS)
        .unwrap();
    assert_eq!(report, turnreport_foundation::Report::default());
}

#[test]
fn section_names_parse_into_sets() {
    let set = SectionSet::parse_list("battles,regions").unwrap();
    assert!(set.contains(SectionKind::Battles));
    assert!(set.contains(SectionKind::Regions));
    assert!(!set.contains(SectionKind::Header));
    assert!(SectionSet::parse_list("weather").is_err());
}
