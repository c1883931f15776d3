//! Integration tests for Layer 1: Lexer
//!
//! Tests for block joining, the rewindable cursor, and the text scanner.

mod cursor;
mod properties;
mod reader;
mod scanner;
