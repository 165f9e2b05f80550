//! Runtime error types for the Brainfuck interpreter
//!
//! Malformed programs never produce an error: unmatched brackets, unknown
//! bytes, exhausted input, full output and a full tape all have defined
//! behavior. [`RuntimeError`] covers the few things that do stop a run
//! abnormally, plus failed history navigation.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// The wall-clock budget ran out at a loop-closing bracket
    TimedOut { elapsed_ms: f64, budget_ms: f64 },

    /// Recorded history would exceed its memory cap
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// History navigation was not possible (no history, already at an end)
    HistoryOperationFailed { message: String },
}

impl RuntimeError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RuntimeError::TimedOut { .. })
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::TimedOut {
                elapsed_ms,
                budget_ms,
            } => {
                write!(
                    f,
                    "Execution timed out after {:.1} ms (budget {:.1} ms)",
                    elapsed_ms, budget_ms
                )
            }
            RuntimeError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
            RuntimeError::HistoryOperationFailed { message } => {
                write!(f, "History operation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
