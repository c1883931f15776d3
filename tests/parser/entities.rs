//! Integration tests for entity grammars
//!
//! Tests coordinates, items, units, structures, and region attributes.

use proptest::prelude::*;
use turnreport_foundation::model::{Gate, Weather};
use turnreport_foundation::{Amount, Coords, Direction, Region};
use turnreport_parser::entity::{
    RegionAttribute, parse_attribute, parse_coords, parse_exit, parse_item_list,
    parse_region_header, parse_structure, parse_unit,
};

// =============================================================================
// Units
// =============================================================================

#[test]
fn foreign_unit_with_flags_and_unit_item() {
    let unit = parse_unit(
        "Unit (2465), Semigallians (18), avoiding, behind, under dwarf [UDWA].",
        false,
    )
    .unwrap();
    assert_eq!(unit.name, "Unit");
    assert_eq!(unit.faction_number(), Some(18));
    assert_eq!(unit.flags, vec!["avoiding", "behind"]);
    assert_eq!(unit.items.len(), 1);
    assert_eq!(unit.items[0].name, "under dwarf");
    assert_eq!(unit.items[0].amount, Amount::Count(1));
}

#[test]
fn unit_with_nested_parentheses_in_items() {
    let unit = parse_unit(
        "Sandlings (384), behind, 7 sandlings [SAND] (Combat 1/1, Attacks 1, Hits 1, Tactics 1).",
        false,
    )
    .unwrap();
    assert!(unit.faction.is_none());
    assert_eq!(unit.items[0].amount, Amount::Count(7));
}

// =============================================================================
// Structures
// =============================================================================

#[test]
fn fleet_structure() {
    let fleet = parse_structure(
        "Fleet [100] : Fleet, 2 Longships; Load: 500/1200; Sailors: 8/12; MaxSpeed: 4; Sail directions: N, NE, SE.",
    )
    .unwrap();
    assert_eq!(fleet.contents[0].kind, "Longships");
    assert_eq!(fleet.speed, Some(4));
    assert_eq!(fleet.sail_directions.unwrap().len(), 3);
}

// =============================================================================
// Regions
// =============================================================================

#[test]
fn region_header_and_exit() {
    let region = parse_region_header(
        "plain (49,17) in Inthon, contains Plondmark [city], 19564 peasants (humans), $28172.",
    )
    .unwrap();
    assert_eq!(region.coords, Coords::new(49, 17));
    assert_eq!(region.settlement.unwrap().name, "Plondmark");
    assert_eq!(region.population.unwrap().amount, 19564);

    let exit = parse_exit("Southeast : plain (50,18) in Inthon.").unwrap();
    assert_eq!(exit.direction, Direction::Southeast);
    assert_eq!(exit.target.province, "Inthon");
}

#[test]
fn attributes_apply_to_region() {
    let mut region = Region::new("plain", Coords::new(1, 1), "Inthon");
    for line in [
        "The weather was clear last month; it will be winter next month.",
        "Wages: $15.2 (Max: $5930).",
        "For Sale: 39 nomads [NOMA] at $54, unlimited leaders [LEAD] at $96.",
        "Entertainment available: $1408.",
        "Products: 31 grain [GRAI], 21 horses [HORS].",
        "There is a Gate here (Gate 5 of 20).",
    ] {
        parse_attribute(line).unwrap().apply(&mut region);
    }
    assert_eq!(
        region.weather,
        Some(Weather {
            last: "clear".into(),
            next: "winter".into()
        })
    );
    assert_eq!(region.wages.as_ref().unwrap().max, Some(5930));
    assert!(region.for_sale[1].amount.is_unlimited());
    assert_eq!(region.for_sale[0].price, Some(54));
    assert_eq!(region.entertainment, Some(1408));
    assert_eq!(region.products.len(), 2);
    assert_eq!(
        region.gate,
        Some(Gate {
            number: 5,
            total: Some(20)
        })
    );
}

#[test]
fn unknown_attribute_is_none() {
    assert!(parse_attribute("Bogus: thing.").is_none());
    assert!(matches!(
        parse_attribute("Wanted: none."),
        Some(RegionAttribute::Wanted(items)) if items.is_empty()
    ));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn coords_round_trip(x in -1000i32..1000, y in -1000i32..1000, z in 0i32..8, label in "[a-z]{1,10}") {
        let surface = Coords::new(x, y);
        prop_assert_eq!(parse_coords(&surface.to_string()), Some(surface));
        let level = Coords::with_level(x, y, z, Some(label));
        prop_assert_eq!(parse_coords(&level.to_string()), Some(level));
    }

    #[test]
    fn item_lists_keep_every_item(
        items in prop::collection::vec(
            (1u32..5000, "[a-z]{1,8}", "[A-Z]{4}", prop::option::of(1u32..500)),
            1..8,
        )
    ) {
        let text = items
            .iter()
            .map(|(count, name, code, price)| match price {
                Some(p) => format!("{count} {name} [{code}] at ${p}"),
                None => format!("{count} {name} [{code}]"),
            })
            .collect::<Vec<_>>()
            .join(", ");
        let parsed = parse_item_list(&format!("{text}.")).unwrap();
        prop_assert_eq!(parsed.len(), items.len());
        for (item, (count, name, code, price)) in parsed.iter().zip(&items) {
            prop_assert_eq!(item.amount, Amount::Count(*count));
            prop_assert_eq!(&item.name, name);
            prop_assert_eq!(&item.code, code);
            prop_assert_eq!(item.price, *price);
        }
    }
}
