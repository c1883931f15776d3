//! turnreport - Atlantis turn report parser and merge engine
//!
//! This crate re-exports all layers of the turnreport system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: turnreport_runtime    - CLI, config, batch fan-out, snapshots
//! Layer 3: turnreport_merge      - More-information-wins document merge
//!          turnreport_debug      - Parse and merge tracing
//! Layer 2: turnreport_parser     - Section classifier, section and entity parsers
//! Layer 1: turnreport_lexer      - Block reader, lookahead cursor, text scanner
//! Layer 0: turnreport_foundation - Errors, report model, structured sinks
//! ```

pub use turnreport_debug as debug;
pub use turnreport_foundation as foundation;
pub use turnreport_lexer as lexer;
pub use turnreport_merge as merge;
pub use turnreport_parser as parser;
pub use turnreport_runtime as runtime;
