//! Source parsing
//!
//! - [`program`]: byte-per-instruction parsing and the terminator rules

pub mod program;
