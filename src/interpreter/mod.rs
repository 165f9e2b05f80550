//! Brainfuck execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the per-run [`engine::Interpreter`] context and dispatch loop
//! - [`jumps`]: runtime bracket matching
//! - [`timeout`]: wall-clock budget checked at loop-closing jumps
//! - [`evaluate`]: one-shot entry points
//! - [`config`], [`constants`]: limits and their defaults
//! - [`errors`]: runtime error types
//!
//! # Execution Model
//!
//! The interpreter walks the instruction sequence one byte at a time. Loops
//! are resolved by scanning for the matching bracket when a jump is taken.
//! When history is enabled a snapshot is recorded after every instruction so
//! the run can be replayed backward and forward.

pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod evaluate;
pub mod jumps;
pub mod timeout;
