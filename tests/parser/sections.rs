//! Integration tests for section line grammars
//!
//! Tests the single-line parsers each section is built from, and section
//! start detection on real report text.

use turnreport_lexer::read_blocks;
use turnreport_parser::sections::{
    HeaderLine, parse_attitude_line, parse_battle_header, parse_header_line, parse_lore_entry,
    parse_status_line,
};
use turnreport_parser::{SectionKind, detect_start};

use crate::SEMIGALLIANS;

#[test]
fn status_lines() {
    let status = parse_status_line("Tax Regions: 1 (3)").unwrap();
    assert_eq!((status.amount, status.max), (1, Some(3)));
    let status = parse_status_line("Mages: 0").unwrap();
    assert_eq!(status.max, None);
    assert!(parse_status_line("Mages: many").is_none());
}

#[test]
fn attitude_lines() {
    let ally = parse_attitude_line("Ally : Mystic Masons (15876), Sandlings (384).").unwrap();
    assert_eq!(ally.stance, "Ally");
    assert_eq!(ally.factions.len(), 2);
    assert!(parse_attitude_line("Hostile : none.").unwrap().factions.is_empty());
    assert!(parse_attitude_line("Ally : everyone.").is_none());
}

#[test]
fn lore_entries() {
    let skill = parse_lore_entry("combat [COMB] 1: Fighting hand to hand.").unwrap();
    assert_eq!(skill.level, Some(1));
    assert_eq!(skill.description, "Fighting hand to hand.");
    let object = parse_lore_entry("Tower: This is a building.").unwrap();
    assert_eq!(object.code, None);
    assert_eq!(object.name, "Tower");
}

#[test]
fn header_lines() {
    assert!(matches!(
        parse_header_line("Atlantis Engine Version: 5.2.4"),
        Some(HeaderLine::Engine(v)) if v == "5.2.4"
    ));
    assert!(matches!(
        parse_header_line("Semigallians (18)"),
        Some(HeaderLine::Faction(f)) if f.number == 18
    ));
}

#[test]
fn battle_header_with_underworld_coords() {
    let header = parse_battle_header(
        "Wolves (4001) attacks Semigallians (18) in tunnels (3,4,2 <underworld>) in Grotto!",
    )
    .unwrap();
    assert_eq!(header.attacker.name, "Wolves");
    assert_eq!(header.coords.unwrap().z, Some(2));
}

#[test]
fn starts_detected_in_fixture_order() {
    let blocks = read_blocks(SEMIGALLIANS).unwrap();
    let starts: Vec<SectionKind> = blocks
        .iter()
        .enumerate()
        .filter_map(|(i, block)| {
            let next_is_divider = blocks.get(i + 1).is_some_and(|b| b.is_divider());
            detect_start(block, next_is_divider)
        })
        .collect();
    assert_eq!(
        starts,
        [
            SectionKind::Header,
            SectionKind::FactionStatus,
            SectionKind::Errors,
            SectionKind::Events,
            SectionKind::SkillReports,
            SectionKind::ItemReports,
            SectionKind::Attitudes,
            SectionKind::UnclaimedSilver,
            SectionKind::Regions,
            SectionKind::Regions,
            SectionKind::OrdersTemplate,
        ]
    );
}
