//! Integration tests for Layer 0: Foundation
//!
//! Tests for errors, the report model, and structured sinks.

mod model;
mod sinks;
