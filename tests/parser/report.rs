//! Integration tests for whole-report parsing
//!
//! Parses full turn reports and checks every section.

use turnreport_debug::{Tracer, TracerConfig};
use turnreport_foundation::model::SettlementSize;
use turnreport_foundation::{Amount, Coords, ErrorKind, JsonSink, Report};
use turnreport_parser::ReportParser;

use crate::{MYSTIC_MASONS, SEMIGALLIANS};

fn semigallians() -> Report {
    ReportParser::new().parse_report(SEMIGALLIANS).unwrap()
}

// =============================================================================
// Header and Narrative Sections
// =============================================================================

#[test]
fn header() {
    let report = semigallians();
    let faction = report.faction.as_ref().unwrap();
    assert_eq!(faction.name, "Semigallians");
    assert_eq!(faction.number, 18);
    assert_eq!(faction.attributes.len(), 3);
    let date = report.date.as_ref().unwrap();
    assert_eq!((date.month.as_str(), date.year), ("May", 3));
    let engine = report.engine.as_ref().unwrap();
    assert_eq!(engine.version.as_deref(), Some("5.2.4"));
    assert_eq!(engine.ruleset.as_deref(), Some("Standard Atlantis"));
}

#[test]
fn status_errors_and_events() {
    let report = semigallians();
    assert_eq!(report.status.len(), 3);
    assert_eq!(report.status[0].what, "Tax Regions");
    assert_eq!(report.status[0].max, Some(3));
    assert_eq!(report.errors, vec!["Scout (120): MOVE: Can't move that direction."]);

    assert_eq!(report.events.len(), 3);
    let walk = &report.events[1];
    assert_eq!(walk.unit.as_ref().unwrap().number, 120);
    assert_eq!(
        walk.message,
        "Walks from plain (49,17) in Inthon to forest (49,15) in Inthon."
    );
    assert!(report.events[2].unit.is_none());
}

#[test]
fn lore_attitudes_and_silver() {
    let report = semigallians();
    let skill = &report.skill_reports[0];
    assert_eq!(skill.code.as_deref(), Some("COMB"));
    assert_eq!(skill.level, Some(1));
    assert!(skill.description.ends_with("hand to hand combat."));
    assert_eq!(report.item_reports[0].code.as_deref(), Some("SWOR"));

    let attitudes = report.attitudes.as_ref().unwrap();
    assert_eq!(attitudes.default, "Neutral");
    assert_eq!(attitudes.declared.len(), 5);
    let ally = attitudes.declared.iter().find(|a| a.stance == "Ally").unwrap();
    assert_eq!(ally.factions[0].number, 15876);

    assert_eq!(report.unclaimed_silver, Some(1200));
}

// =============================================================================
// Regions
// =============================================================================

#[test]
fn region_fields() {
    let report = semigallians();
    assert_eq!(report.regions.len(), 2);
    let region = report.region(&Coords::new(49, 17)).unwrap();
    let settlement = region.settlement.as_ref().unwrap();
    assert_eq!(settlement.name, "Plondmark");
    assert_eq!(settlement.size, SettlementSize::City);
    assert_eq!(region.population.as_ref().unwrap().amount, 19564);
    assert_eq!(region.population.as_ref().unwrap().race, "humans");
    assert_eq!(region.tax, Some(28172));
    assert_eq!(region.wanted.len(), 3);
    assert_eq!(region.wanted[2].code, "FISH");
    assert_eq!(region.for_sale[1].amount, Amount::Unlimited);
    assert_eq!(region.entertainment, Some(1408));
    assert_eq!(region.exits.len(), 2);
    assert_eq!(region.gate.unwrap().number, 5);
}

#[test]
fn region_units_and_structures() {
    let report = semigallians();
    let region = report.region(&Coords::new(49, 17)).unwrap();
    let numbers: Vec<u32> = region.units.iter().map(|u| u.number).collect();
    assert_eq!(numbers, [2465, 120, 112]);

    let worker = &region.units[0];
    assert!(worker.own);
    assert_eq!(worker.items[0].code, "UDWA");
    assert_eq!(worker.weight, Some(10));
    assert_eq!(worker.skills.as_ref().unwrap()[0].code, "MINI");

    let scout = &region.units[1];
    assert_eq!(scout.description.as_deref(), Some("Watches the road"));
    assert_eq!(scout.upkeep, Some(20));
    assert!(!region.units[2].own);

    let tower = region.structure(1).unwrap();
    assert_eq!(tower.kind, "Tower");
    assert_eq!(tower.units[0].number, 113);
}

#[test]
fn fleet_with_nested_unit() {
    let report = ReportParser::new().parse_report(MYSTIC_MASONS).unwrap();
    let region = report.region(&Coords::new(49, 17)).unwrap();
    assert_eq!(
        region.structure(1).unwrap().description.as_deref(),
        Some("A squat grey tower")
    );
    let fleet = region.structure(100).unwrap();
    assert_eq!(fleet.contents[0].count, 2);
    assert_eq!(fleet.load.unwrap().max, 1200);
    assert_eq!(fleet.units[0].number, 3002);
    assert!(fleet.units[0].own);
    assert_eq!(report.regions.len(), 2);
}

// =============================================================================
// Battles and Orders
// =============================================================================

#[test]
fn battle_report() {
    let report = ReportParser::new().parse_report(MYSTIC_MASONS).unwrap();
    assert_eq!(report.battles.len(), 1);
    let battle = &report.battles[0];
    assert_eq!(battle.attacker.number, 384);
    assert_eq!(battle.defender.number, 15876);
    assert_eq!(battle.coords, Some(Coords::new(49, 17)));
    assert_eq!(battle.attackers.len(), 1);
    assert_eq!(battle.defenders[0].items[1].amount, Amount::Count(10));
    assert_eq!(battle.rounds.len(), 1);
    assert_eq!(battle.rounds[0].number, Some(1));
    assert_eq!(battle.rounds[0].lines, vec!["Mason (3001) shoots 7 times."]);
    assert_eq!(battle.outcome, vec!["Sandlings (384) is destroyed!"]);
    assert!(battle.casualties.contains(&"Sandlings (384) loses 7.".to_string()));
    assert_eq!(battle.spoils.len(), 1);
    assert_eq!(battle.spoils[0].code, "XBOW");
    assert_eq!(battle.spoils[0].amount, Amount::Count(1));
}

#[test]
fn orders_template_is_byte_exact() {
    let orders = semigallians().orders.unwrap();
    assert_eq!(orders.format.as_deref(), Some("Long Format"));
    assert_eq!(orders.faction, 18);
    assert_eq!(orders.password.as_deref(), Some("secret"));
    assert_eq!(orders.units.len(), 2);
    assert_eq!(orders.units[0].unit, 2465);
    assert_eq!(orders.units[0].text, ";Unit\nwork");
    assert_eq!(orders.units[1].text, "study COMB");
}

// =============================================================================
// Streaming and Errors
// =============================================================================

#[test]
fn streamed_json_matches_typed_report() {
    let mut sink = JsonSink::new(Vec::new());
    ReportParser::new()
        .parse_reader(SEMIGALLIANS.as_bytes(), &mut sink, &mut Tracer::disabled())
        .unwrap();
    let bytes = sink.into_inner().unwrap();
    let streamed: Report = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(streamed, semigallians());
}

#[test]
fn tracer_sees_sections_and_regions() {
    let mut tracer = Tracer::new(TracerConfig::new().enabled());
    ReportParser::new()
        .parse_report_with(SEMIGALLIANS, &mut tracer)
        .unwrap();
    assert_eq!(tracer.buffer().by_event_type("region-parsed").len(), 2);
    assert!(!tracer.buffer().by_event_type("section-enter").is_empty());
}

#[test]
fn region_error_has_line_and_section() {
    let text = "Atlantis Report For:\nSemigallians (18)\nMay, Year 3\n\nplain (1,1) in Inthon.\n------------\n  Wages: $12.\n  Bogus: thing.\n";
    let err = ReportParser::new()
        .with_source("bad.rep")
        .parse_report(text)
        .unwrap_err();
    let ErrorKind::Parse { line, section, .. } = &err.kind else {
        panic!("expected a parse error, got {err}");
    };
    assert_eq!(*line, 8);
    assert_eq!(section.as_deref(), Some("regions"));
    let context = err.context.unwrap();
    assert_eq!(context.source.as_deref(), Some("bad.rep"));
    assert_eq!(context.line, Some(8));
}

#[test]
fn region_without_exits_is_unexpected_end() {
    let text = "plain (1,1) in Inthon.\n------------\n  Wages: $12.\n";
    let err = ReportParser::new().parse_report(text).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnexpectedEnd { .. }));
}
