//! Integration tests for merging parsed reports
//!
//! Merges the Mystic Masons' view of a turn into the Semigallians' report.

use turnreport_debug::{Tracer, TracerConfig};
use turnreport_foundation::{Coords, ErrorKind, Report};
use turnreport_merge::{MergeSummary, Merger, merge_all};
use turnreport_parser::ReportParser;

const SEMIGALLIANS: &str = include_str!("../fixtures/semigallians.rep");
const MYSTIC_MASONS: &str = include_str!("../fixtures/mystic_masons.rep");

fn parse(text: &str) -> Report {
    ReportParser::new().parse_report(text).unwrap()
}

fn merged() -> (Report, MergeSummary) {
    merge_all(parse(SEMIGALLIANS), [&parse(MYSTIC_MASONS)], &mut Tracer::disabled()).unwrap()
}

#[test]
fn summary_counts() {
    let (_, summary) = merged();
    assert_eq!(
        summary,
        MergeSummary {
            reports: 1,
            regions_added: 1,
            regions_merged: 1,
            units_added: 2,
            units_updated: 1,
            structures_added: 1,
            structures_updated: 1,
        }
    );
}

#[test]
fn primary_keeps_top_level_sections() {
    let primary = parse(SEMIGALLIANS);
    let (report, _) = merged();
    assert_eq!(report.faction, primary.faction);
    assert_eq!(report.orders, primary.orders);
    assert_eq!(report.events, primary.events);
    assert!(report.battles.is_empty());
}

#[test]
fn shared_region_gains_information() {
    let (report, _) = merged();
    let region = report.region(&Coords::new(49, 17)).unwrap();
    assert_eq!(region.products.len(), 3);
    assert_eq!(region.exits.len(), 3);
    assert!(region.weather.is_some());

    let guards = region.units.iter().find(|u| u.number == 112).unwrap();
    assert_eq!(guards.items.len(), 3);

    let mason = region.units.iter().find(|u| u.number == 3001).unwrap();
    assert!(!mason.own);

    let worker = region.units.iter().find(|u| u.number == 2465).unwrap();
    assert!(worker.own);
    assert_eq!(worker.weight, Some(10));

    assert_eq!(
        region.structure(1).unwrap().description.as_deref(),
        Some("A squat grey tower")
    );
    let fleet = region.structure(100).unwrap();
    assert_eq!(fleet.units.len(), 1);
    assert!(!fleet.units[0].own);
    assert_eq!(region.all_units().count(), 6);
}

#[test]
fn new_region_is_appended() {
    let (report, _) = merged();
    assert_eq!(report.regions.len(), 3);
    assert_eq!(report.regions[2].coords, Coords::new(50, 18));
    assert!(!report.regions[2].units[0].own);
}

#[test]
fn merge_order_does_not_change_primary_units() {
    let (report, _) = merge_all(
        parse(MYSTIC_MASONS),
        [&parse(SEMIGALLIANS)],
        &mut Tracer::disabled(),
    )
    .unwrap();
    assert_eq!(report.faction_number(), Some(15876));
    let region = report.region(&Coords::new(49, 17)).unwrap();
    let worker = region.units.iter().find(|u| u.number == 2465).unwrap();
    assert!(!worker.own);
    assert_eq!(worker.weight, Some(10));
    assert!(report.region(&Coords::new(49, 15)).is_some());
}

#[test]
fn merge_traces_regions() {
    let mut tracer = Tracer::new(TracerConfig::new().enabled());
    let mut merger = Merger::new(parse(SEMIGALLIANS));
    merger.merge(&parse(MYSTIC_MASONS), &mut tracer).unwrap();
    assert_eq!(tracer.buffer().by_event_type("merge-region-added").len(), 1);
    assert_eq!(tracer.buffer().by_event_type("merge-region-merged").len(), 1);
    assert_eq!(tracer.buffer().by_event_type("merge-unit-updated").len(), 1);
}

#[test]
fn other_turn_is_rejected() {
    let june = MYSTIC_MASONS.replacen("May, Year 3", "June, Year 3", 1);
    let err = merge_all(parse(SEMIGALLIANS), [&parse(&june)], &mut Tracer::disabled())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Merge(_)));
}
