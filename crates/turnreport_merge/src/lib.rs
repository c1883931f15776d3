//! Merge engine for Atlantis turn reports.
//!
//! Several factions see the same turn from different places. This crate
//! folds their reports into one document with a "more information wins"
//! rule:
//!
//! - [`Merger`] / [`merge_all`] - Region, unit and structure correlation
//! - [`MergeSummary`] - What a merge added or updated
//! - [`rules`] - The field-level rules (fill when empty, longer list wins)
//!
//! Merging is idempotent: a second merge of the same report changes nothing.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod engine;
pub mod rules;

pub use engine::{MergeSummary, Merger, merge_all};
