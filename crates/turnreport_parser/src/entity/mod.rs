//! Entity grammars.
//!
//! Each parser here works on the joined text of one logical block (or one
//! clause of it) and answers `None` when its anchor is missing. Section
//! parsers decide whether a miss is fatal.

mod coords;
mod item;
mod reference;
mod region;
mod skill;
mod structure;
mod unit;

pub use coords::{parse_coords, scan_coords};
pub use item::{parse_item, parse_item_list, scan_item};
pub use reference::{entity_ref, scan_entity_ref, split_ref_prefix};
pub use region::{RegionAttribute, parse_attribute, parse_exit, parse_gate, parse_region_header};
pub use skill::{parse_skill, parse_skill_list, scan_skill};
pub use structure::parse_structure;
pub use unit::parse_unit;
