//! Deterministic JSON serialization for view definition files.
//!
//! Saved files diff cleanly:
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::*;
