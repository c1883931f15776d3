//! Property tests for the merge laws
//!
//! Merging is idempotent, a report merged into itself is unchanged, and
//! no unit is ever lost or duplicated.

use std::collections::BTreeSet;

use proptest::prelude::*;
use turnreport_debug::Tracer;
use turnreport_foundation::model::{FactionInfo, TurnDate};
use turnreport_foundation::{Coords, FactionRef, Region, Report, Structure, Unit};
use turnreport_merge::{Merger, merge_all};

const PRIMARY: u32 = 18;

fn unit_strategy() -> impl Strategy<Value = Unit> {
    (1u32..60, prop_oneof![Just(PRIMARY), Just(7u32), Just(99u32)], 0u32..3)
        .prop_map(|(number, faction, weight)| {
            let mut unit = Unit::new(format!("Unit {number}"), number);
            unit.faction = Some(FactionRef::new(format!("Faction {faction}"), faction));
            unit.own = faction == PRIMARY;
            if weight > 0 {
                unit.weight = Some(weight);
            }
            unit
        })
}

fn region_strategy() -> impl Strategy<Value = Region> {
    (
        0i32..6,
        prop::collection::vec(unit_strategy(), 0..5),
        prop::option::of(prop::collection::vec(unit_strategy(), 0..3)),
    )
        .prop_map(|(x, units, tower)| {
            let mut region = Region::new("plain", Coords::new(x, 0), "Inthon");
            region.units = units;
            if let Some(units) = tower {
                let mut structure = Structure::new(1, "Tower", "Tower");
                structure.units = units;
                region.structures.push(structure);
            }
            region
        })
}

/// Units and regions are unique by number and coordinates, as in a real
/// report.
fn report_strategy(faction: u32) -> impl Strategy<Value = Report> {
    prop::collection::vec(region_strategy(), 0..5).prop_map(move |regions| {
        let mut seen_units = BTreeSet::new();
        let mut seen_coords = BTreeSet::new();
        let mut report = Report {
            faction: Some(FactionInfo {
                name: format!("Faction {faction}"),
                number: faction,
                attributes: Vec::new(),
            }),
            date: Some(TurnDate {
                month: "May".into(),
                year: 3,
            }),
            ..Report::default()
        };
        for mut region in regions {
            if !seen_coords.insert(region.coords.x) {
                continue;
            }
            region.units.retain(|u| seen_units.insert(u.number));
            for structure in &mut region.structures {
                structure.units.retain(|u| seen_units.insert(u.number));
            }
            report.regions.push(region);
        }
        report
    })
}

fn unit_numbers(report: &Report) -> Vec<u32> {
    let mut numbers: Vec<u32> = report
        .regions
        .iter()
        .flat_map(Region::all_units)
        .map(|u| u.number)
        .collect();
    numbers.sort_unstable();
    numbers
}

proptest! {
    #[test]
    fn merging_twice_equals_merging_once(
        primary in report_strategy(PRIMARY),
        secondary in report_strategy(7),
    ) {
        let mut merger = Merger::new(primary);
        merger.merge(&secondary, &mut Tracer::disabled()).unwrap();
        let once = merger.report().clone();
        let again = merger.merge(&secondary, &mut Tracer::disabled()).unwrap();
        prop_assert!(again.is_noop());
        prop_assert_eq!(merger.report(), &once);
    }

    #[test]
    fn self_merge_is_a_noop(report in report_strategy(PRIMARY)) {
        let (merged, summary) =
            merge_all(report.clone(), [&report], &mut Tracer::disabled()).unwrap();
        prop_assert!(summary.is_noop());
        prop_assert_eq!(merged, report);
    }

    #[test]
    fn regions_are_a_union(
        primary in report_strategy(PRIMARY),
        secondary in report_strategy(7),
    ) {
        let (merged, _) =
            merge_all(primary.clone(), [&secondary], &mut Tracer::disabled()).unwrap();
        let expected: BTreeSet<i32> = primary
            .regions
            .iter()
            .chain(&secondary.regions)
            .map(|r| r.coords.x)
            .collect();
        let actual: Vec<i32> = merged.regions.iter().map(|r| r.coords.x).collect();
        prop_assert_eq!(actual.len(), expected.len());
        prop_assert_eq!(actual.into_iter().collect::<BTreeSet<_>>(), expected);
    }

    #[test]
    fn units_are_never_duplicated_within_a_region(
        primary in report_strategy(PRIMARY),
        secondary in report_strategy(7),
    ) {
        let (merged, _) =
            merge_all(primary.clone(), [&secondary], &mut Tracer::disabled()).unwrap();
        for region in &merged.regions {
            let numbers: Vec<u32> = region.all_units().map(|u| u.number).collect();
            let unique: BTreeSet<u32> = numbers.iter().copied().collect();
            prop_assert_eq!(numbers.len(), unique.len());
        }
        let kept: BTreeSet<u32> = unit_numbers(&merged).into_iter().collect();
        for number in unit_numbers(&primary) {
            prop_assert!(kept.contains(&number));
        }
    }
}
