//! Integration tests for Layer 4: Runtime
//!
//! Tests for configuration loading, batch parsing and merging, and
//! snapshots.

mod batch;
mod config;
mod snapshot;

use std::path::PathBuf;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
