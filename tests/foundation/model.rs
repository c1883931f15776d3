//! Integration tests for the report model
//!
//! Tests coordinates, amounts, directions, and report lookups.

use turnreport_foundation::model::FactionInfo;
use turnreport_foundation::{Amount, Coords, Direction, Region, Report, Structure, Unit};

// =============================================================================
// Coordinates
// =============================================================================

#[test]
fn surface_coords_display() {
    assert_eq!(Coords::new(49, 17).to_string(), "(49,17)");
}

#[test]
fn level_coords_display() {
    let coords = Coords::with_level(3, 4, 2, Some("underworld".into()));
    assert_eq!(coords.to_string(), "(3,4,2 <underworld>)");
}

#[test]
fn coords_are_structural_keys() {
    use std::collections::HashSet;
    let mut seen = HashSet::new();
    assert!(seen.insert(Coords::new(1, 2)));
    assert!(!seen.insert(Coords::new(1, 2)));
    assert!(seen.insert(Coords::with_level(1, 2, 1, None)));
}

// =============================================================================
// Amounts
// =============================================================================

#[test]
fn unlimited_is_not_a_count() {
    assert!(Amount::Unlimited.is_unlimited());
    assert_eq!(Amount::Unlimited.count(), None);
    assert_eq!(Amount::Count(0).count(), Some(0));
    assert_eq!(Amount::default(), Amount::Count(1));
}

#[test]
fn amount_serializes_as_number_or_word() {
    assert_eq!(serde_json::to_string(&Amount::Count(7)).unwrap(), "7");
    assert_eq!(serde_json::to_string(&Amount::Unlimited).unwrap(), "\"unlimited\"");
    let back: Amount = serde_json::from_str("\"unlimited\"").unwrap();
    assert!(back.is_unlimited());
    assert!(serde_json::from_str::<Amount>("-1").is_err());
}

// =============================================================================
// Directions
// =============================================================================

#[test]
fn directions_parse_names_and_abbreviations() {
    assert_eq!(Direction::parse("North"), Some(Direction::North));
    assert_eq!(Direction::parse("SE"), Some(Direction::Southeast));
    assert_eq!(Direction::parse("Up"), None);
    for d in Direction::ALL {
        assert_eq!(Direction::parse(d.name()), Some(d));
        assert_eq!(Direction::parse(d.abbreviation()), Some(d));
    }
}

// =============================================================================
// Report Lookups
// =============================================================================

#[test]
fn units_are_found_inside_structures() {
    let mut region = Region::new("plain", Coords::new(1, 1), "Inthon");
    region.units.push(Unit::new("Outside", 1));
    let mut tower = Structure::new(1, "Tower", "Tower");
    tower.units.push(Unit::new("Inside", 2));
    region.structures.push(tower);

    let report = Report {
        faction: Some(FactionInfo {
            name: "Semigallians".into(),
            number: 18,
            attributes: Vec::new(),
        }),
        regions: vec![region],
        ..Report::default()
    };

    assert_eq!(report.faction_number(), Some(18));
    assert_eq!(report.unit(2).map(|u| u.name.as_str()), Some("Inside"));
    assert!(report.unit(3).is_none());
    let region = report.region(&Coords::new(1, 1)).unwrap();
    assert_eq!(region.all_units().count(), 2);
    assert!(region.structure(1).is_some());
}

#[test]
fn report_fields_are_camel_case() {
    let report = Report {
        unclaimed_silver: Some(5),
        ..Report::default()
    };
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json, serde_json::json!({ "unclaimedSilver": 5 }));
    assert_eq!(Report::from_value(json).unwrap(), report);
}
