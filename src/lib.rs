//! # Introduction
//!
//! bfeval runs Brainfuck programs inside fixed limits: a wall-clock budget,
//! a bounded tape and a bounded output buffer. Runs can optionally record a
//! snapshot after every instruction, and the history can be stepped through
//! in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Parser → Instructions → Interpreter → Output (+ Snapshots → TUI)
//! ```
//!
//! 1. [`parser`] turns source bytes into an instruction sequence.
//! 2. [`interpreter`] executes it, scanning for matching brackets at runtime
//!    and checking the timeout whenever a loop repeats.
//! 3. [`memory`] holds the tape of wrapping `i32` cells.
//! 4. [`snapshot`] holds the output sink and the snapshot history.
//! 5. [`ui`] is the ratatui-based debugger; not part of the stable library API.
//!
//! [`genetic`] sits on top of the pipeline: it evolves programs and scores
//! each candidate by evaluating it under a short timeout.
//!
//! ## Quick start
//!
//! ```
//! let output = bfeval::evaluate(b"++++++++[>++++++++<-]>+.", b"", Some(1.0));
//! assert_eq!(output, b"A");
//! ```
//!
//! ## Limits
//!
//! - Output: 4096 bytes, extra bytes are dropped.
//! - Tape: 256 cells; a program that needs more halts as if it had ended.
//! - Time: five seconds by default, checked only at `]`. A timed-out run
//!   returns empty output.

pub mod genetic;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod ui;

pub use interpreter::config::Config;
pub use interpreter::engine::{Halt, Interpreter};
pub use interpreter::evaluate::{Outcome, evaluate, evaluate_with};
pub use interpreter::timeout::Timeout;
