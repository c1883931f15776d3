//! Section classifier and section parsers for Atlantis turn reports.
//!
//! # Architecture
//!
//! ```text
//! report text
//!      │
//!      ▼
//! ┌─────────────────┐
//! │  BLOCK READER   │  → wrapped lines joined into logical blocks
//! └─────────────────┘
//!      │
//!      ▼
//! ┌─────────────────┐
//! │  CURSOR         │  → one block of lookahead, step back on terminate
//! └─────────────────┘
//!      │
//!      ▼
//! ┌─────────────────┐
//! │  CLASSIFIER     │  → Begin / Continue / Reenter / Terminate / Skip
//! └─────────────────┘
//!      │
//!      ▼
//! ┌─────────────────┐
//! │  SECTION        │  → header, status, events, regions, battles, orders...
//! │  PARSERS        │
//! └─────────────────┘
//!      │
//!      ▼
//! ┌─────────────────┐
//! │  ENTITY         │  → units, structures, items, skills, coordinates
//! │  PARSERS        │
//! └─────────────────┘
//!      │
//!      ▼
//!  ReportSink (streamed JSON or an in-memory value)
//! ```
//!
//! # Modules
//!
//! - [`section`] - Section kinds and section subsets
//! - [`classifier`] - The block-by-block section state machine
//! - [`sections`] - One parser per section kind
//! - [`entity`] - Grammars for the entities inside sections
//! - [`document`] - [`ReportParser`], the entry point

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod classifier;
pub mod document;
pub mod entity;
pub mod section;
pub mod sections;

pub use classifier::{Classifier, Transition, detect_start};
pub use document::ReportParser;
pub use section::{SectionKind, SectionSet};
