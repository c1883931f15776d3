//! The document merge engine.
//!
//! ```text
//! primary ──┐
//!           ├─► Merger ─► merged report + MergeSummary
//! secondary ┘    (regions keyed by coordinates,
//!                 units and structures by number)
//! ```
//!
//! The primary keeps its faction, date, orders and every other top-level
//! section. Regions from secondary reports are added when unknown and
//! merged field by field when already present.

use std::collections::HashMap;
use std::ops::AddAssign;

use serde::Serialize;
use turnreport_debug::Tracer;
use turnreport_foundation::model::TurnDate;
use turnreport_foundation::{Coords, Error, Region, Report, Result, Unit};

use crate::rules::{
    adopt_region, adopt_unit, merge_region_fields, merge_structure_fields, merge_unit,
};

// =============================================================================
// Merge Summary
// =============================================================================

/// Counts of what a merge changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummary {
    /// Secondary reports merged.
    pub reports: usize,
    /// Regions only a secondary report had.
    pub regions_added: usize,
    /// Regions both reports had.
    pub regions_merged: usize,
    /// Units new to a known region.
    pub units_added: usize,
    /// Known units that gained information.
    pub units_updated: usize,
    /// Structures new to a known region.
    pub structures_added: usize,
    /// Known structures that gained information.
    pub structures_updated: usize,
}

impl MergeSummary {
    /// Returns true if nothing changed.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.regions_added == 0
            && self.units_added == 0
            && self.units_updated == 0
            && self.structures_added == 0
            && self.structures_updated == 0
    }
}

impl AddAssign for MergeSummary {
    fn add_assign(&mut self, other: Self) {
        self.reports += other.reports;
        self.regions_added += other.regions_added;
        self.regions_merged += other.regions_merged;
        self.units_added += other.units_added;
        self.units_updated += other.units_updated;
        self.structures_added += other.structures_added;
        self.structures_updated += other.structures_updated;
    }
}

// =============================================================================
// Merger
// =============================================================================

/// Folds secondary reports into a primary one.
#[derive(Clone, Debug)]
pub struct Merger {
    report: Report,
    faction: Option<u32>,
    index: HashMap<Coords, usize>,
    summary: MergeSummary,
}

impl Merger {
    /// Starts from `primary`. Its faction decides unit ownership.
    #[must_use]
    pub fn new(primary: Report) -> Self {
        let index = primary
            .regions
            .iter()
            .enumerate()
            .map(|(i, region)| (region.coords.clone(), i))
            .collect();
        Self {
            faction: primary.faction_number(),
            report: primary,
            index,
            summary: MergeSummary::default(),
        }
    }

    /// The report merged so far.
    #[must_use]
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Totals over every merge so far.
    #[must_use]
    pub fn summary(&self) -> MergeSummary {
        self.summary
    }

    /// Merges one secondary report.
    ///
    /// # Errors
    /// Returns a merge error if both reports carry a date and the dates
    /// differ. Nothing is merged in that case.
    pub fn merge(&mut self, secondary: &Report, tracer: &mut Tracer) -> Result<MergeSummary> {
        if let (Some(ours), Some(theirs)) = (&self.report.date, &secondary.date) {
            if ours != theirs {
                return Err(Error::merge(format!(
                    "cannot merge {} into {}",
                    describe(theirs),
                    describe(ours)
                )));
            }
        }
        if self.report.date.is_none() {
            self.report.date.clone_from(&secondary.date);
        }

        let mut summary = MergeSummary {
            reports: 1,
            ..MergeSummary::default()
        };
        for region in &secondary.regions {
            match self.index.get(&region.coords) {
                Some(&i) => {
                    merge_region(&mut self.report.regions[i], region, self.faction, &mut summary, tracer);
                    summary.regions_merged += 1;
                    tracer.merge_region_merged(&region.coords);
                }
                None => {
                    self.index.insert(region.coords.clone(), self.report.regions.len());
                    self.report.regions.push(adopt_region(region, self.faction));
                    summary.regions_added += 1;
                    tracer.merge_region_added(&region.coords);
                }
            }
        }
        self.summary += summary;
        Ok(summary)
    }

    /// Returns the merged report and the totals.
    #[must_use]
    pub fn finish(self) -> (Report, MergeSummary) {
        (self.report, self.summary)
    }
}

/// Merges every secondary into `primary`, in order.
///
/// # Errors
/// Returns the first merge error.
pub fn merge_all<'a, I>(primary: Report, secondaries: I, tracer: &mut Tracer) -> Result<(Report, MergeSummary)>
where
    I: IntoIterator<Item = &'a Report>,
{
    let mut merger = Merger::new(primary);
    for secondary in secondaries {
        merger.merge(secondary, tracer)?;
    }
    Ok(merger.finish())
}

fn describe(date: &TurnDate) -> String {
    format!("{}, Year {}", date.month, date.year)
}

// =============================================================================
// Region Merge
// =============================================================================

fn merge_region(
    existing: &mut Region,
    incoming: &Region,
    primary: Option<u32>,
    summary: &mut MergeSummary,
    tracer: &mut Tracer,
) {
    merge_region_fields(existing, incoming);

    for structure in &incoming.structures {
        match existing.structures.iter_mut().find(|s| s.number == structure.number) {
            Some(known) => {
                if merge_structure_fields(known, structure) {
                    summary.structures_updated += 1;
                }
            }
            None => {
                let mut added = structure.clone();
                added.units.clear();
                existing.structures.push(added);
                summary.structures_added += 1;
            }
        }
    }

    let placed = incoming
        .units
        .iter()
        .map(|u| (None, u))
        .chain(
            incoming
                .structures
                .iter()
                .flat_map(|s| s.units.iter().map(move |u| (Some(s.number), u))),
        );
    for (structure, unit) in placed {
        match find_unit(existing, unit.number) {
            Some(known) => {
                if merge_unit(known, unit, primary) {
                    summary.units_updated += 1;
                    tracer.merge_unit_updated(unit.number, &existing.coords);
                }
            }
            None => {
                let adopted = adopt_unit(unit, primary);
                match structure.and_then(|n| existing.structures.iter_mut().find(|s| s.number == n)) {
                    Some(s) => s.units.push(adopted),
                    None => existing.units.push(adopted),
                }
                summary.units_added += 1;
            }
        }
    }
}

/// Finds a unit anywhere in the region, inside a structure or not.
fn find_unit(region: &mut Region, number: u32) -> Option<&mut Unit> {
    region
        .units
        .iter_mut()
        .chain(region.structures.iter_mut().flat_map(|s| s.units.iter_mut()))
        .find(|u| u.number == number)
}
