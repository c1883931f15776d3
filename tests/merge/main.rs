//! Integration tests for Layer 3: Merge
//!
//! Tests merging parsed reports of the same turn, and the merge laws.

mod laws;
mod reports;
