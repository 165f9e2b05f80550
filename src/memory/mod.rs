//! Memory model for the Brainfuck interpreter
//!
//! - [`tape`]: the cell tape, grown to the right on demand up to a cell limit
//!
//! Cells are [`tape::Cell`] (`i32`) with wrapping arithmetic. Only the low
//! byte of a cell is ever written to output.

pub mod tape;
