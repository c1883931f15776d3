//! Field-level "more information wins" rules.
//!
//! Each rule only ever moves a field towards more information: an empty
//! optional is filled, a list is replaced by a strictly longer one. Applying
//! the same observation twice therefore changes nothing the second time.
//!
//! Every function returns `true` when it changed the target.

use turnreport_foundation::{Region, Structure, Unit};

// =============================================================================
// Primitive Rules
// =============================================================================

/// Fills `target` from `incoming` only when `target` is empty.
pub fn fill<T: Clone>(target: &mut Option<T>, incoming: Option<&T>) -> bool {
    match (target.as_ref(), incoming) {
        (None, Some(value)) => {
            *target = Some(value.clone());
            true
        }
        _ => false,
    }
}

/// Replaces `target` with `incoming` only when `incoming` is strictly longer.
pub fn longer<T: Clone>(target: &mut Vec<T>, incoming: &[T]) -> bool {
    if incoming.len() > target.len() {
        *target = incoming.to_vec();
        true
    } else {
        false
    }
}

/// [`fill`] for an absent list, [`longer`] for a present one.
pub fn longer_optional<T: Clone>(target: &mut Option<Vec<T>>, incoming: Option<&Vec<T>>) -> bool {
    match (target.as_mut(), incoming) {
        (None, Some(list)) => {
            *target = Some(list.clone());
            true
        }
        (Some(current), Some(list)) => longer(current, list),
        _ => false,
    }
}

/// Whether a unit belongs to the primary faction.
#[must_use]
pub fn owned_by(unit: &Unit, primary: Option<u32>) -> bool {
    primary.is_some() && unit.faction_number() == primary
}

// =============================================================================
// Entity Rules
// =============================================================================

/// Takes a unit seen only in a secondary report.
///
/// The ownership marker is recomputed from the primary's point of view,
/// for the unit and for every unit of a structure.
#[must_use]
pub fn adopt_unit(unit: &Unit, primary: Option<u32>) -> Unit {
    let mut unit = unit.clone();
    unit.own = owned_by(&unit, primary);
    unit
}

/// Takes a structure seen only in a secondary report.
#[must_use]
pub fn adopt_structure(structure: &Structure, primary: Option<u32>) -> Structure {
    let mut structure = structure.clone();
    for unit in &mut structure.units {
        unit.own = owned_by(unit, primary);
    }
    structure
}

/// Takes a region seen only in a secondary report.
#[must_use]
pub fn adopt_region(region: &Region, primary: Option<u32>) -> Region {
    let mut region = region.clone();
    for unit in &mut region.units {
        unit.own = owned_by(unit, primary);
    }
    region.structures = region
        .structures
        .iter()
        .map(|s| adopt_structure(s, primary))
        .collect();
    region
}

/// Merges another observation of the same unit.
///
/// The faction reference is filled when unknown; a known faction takes the
/// incoming name since names change between turns while numbers do not.
pub fn merge_unit(existing: &mut Unit, incoming: &Unit, primary: Option<u32>) -> bool {
    let mut changed = false;
    match (existing.faction.as_mut(), incoming.faction.as_ref()) {
        (None, Some(faction)) => {
            existing.faction = Some(faction.clone());
            changed = true;
        }
        (Some(current), Some(faction))
            if current.number == faction.number && current.name != faction.name =>
        {
            current.name.clone_from(&faction.name);
            changed = true;
        }
        _ => {}
    }
    if !existing.own && owned_by(existing, primary) {
        existing.own = true;
        changed = true;
    }
    changed |= longer(&mut existing.flags, &incoming.flags);
    changed |= longer(&mut existing.items, &incoming.items);
    changed |= fill(&mut existing.description, incoming.description.as_ref());
    changed |= fill(&mut existing.weight, incoming.weight.as_ref());
    changed |= fill(&mut existing.capacity, incoming.capacity.as_ref());
    changed |= longer_optional(&mut existing.skills, incoming.skills.as_ref());
    changed |= longer_optional(&mut existing.can_study, incoming.can_study.as_ref());
    changed |= fill(&mut existing.combat_spell, incoming.combat_spell.as_ref());
    changed |= fill(&mut existing.ready_item, incoming.ready_item.as_ref());
    changed |= fill(&mut existing.upkeep, incoming.upkeep.as_ref());
    changed
}

/// Merges the scalar and list fields of another observation of the same
/// structure. Units inside are handled by the region merge.
pub fn merge_structure_fields(existing: &mut Structure, incoming: &Structure) -> bool {
    let mut changed = false;
    changed |= longer(&mut existing.contents, &incoming.contents);
    changed |= longer(&mut existing.flags, &incoming.flags);
    changed |= fill(&mut existing.description, incoming.description.as_ref());
    changed |= fill(&mut existing.load, incoming.load.as_ref());
    changed |= fill(&mut existing.sailors, incoming.sailors.as_ref());
    changed |= fill(&mut existing.speed, incoming.speed.as_ref());
    changed |= longer_optional(&mut existing.sail_directions, incoming.sail_directions.as_ref());
    changed
}

/// Merges the region's own fields. Units and structures are handled by the
/// region merge.
pub fn merge_region_fields(existing: &mut Region, incoming: &Region) -> bool {
    let mut changed = false;
    changed |= fill(&mut existing.settlement, incoming.settlement.as_ref());
    changed |= fill(&mut existing.population, incoming.population.as_ref());
    changed |= fill(&mut existing.tax, incoming.tax.as_ref());
    changed |= fill(&mut existing.weather, incoming.weather.as_ref());
    changed |= fill(&mut existing.wages, incoming.wages.as_ref());
    changed |= longer(&mut existing.wanted, &incoming.wanted);
    changed |= longer(&mut existing.for_sale, &incoming.for_sale);
    changed |= fill(&mut existing.entertainment, incoming.entertainment.as_ref());
    changed |= longer(&mut existing.products, &incoming.products);
    changed |= longer(&mut existing.exits, &incoming.exits);
    changed |= fill(&mut existing.gate, incoming.gate.as_ref());
    changed
}
