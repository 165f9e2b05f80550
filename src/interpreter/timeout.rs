//! Wall-clock execution budget
//!
//! Callers give a timeout in seconds. It is scaled by [`TIMEOUT_SCALE`] into
//! milliseconds and compared against the time elapsed since the run started.
//! The executor only consults the [`Deadline`] when a `]` is about to jump
//! back, so straight-line code can never time out.

use crate::interpreter::constants::{DEFAULT_TIMEOUT_SECS, TIMEOUT_SCALE};
use std::time::Instant;

/// Execution budget in internal (millisecond) units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeout {
    budget_ms: f64,
}

impl Timeout {
    /// Build a budget from a caller timeout in seconds.
    ///
    /// NaN and negative values give a zero budget; `f64::INFINITY` never
    /// expires.
    pub fn from_secs(secs: f64) -> Self {
        let budget_ms = if secs.is_nan() || secs <= 0.0 {
            0.0
        } else {
            secs * TIMEOUT_SCALE
        };
        Timeout { budget_ms }
    }

    pub fn unbounded() -> Self {
        Timeout {
            budget_ms: f64::INFINITY,
        }
    }

    pub fn budget_ms(&self) -> f64 {
        self.budget_ms
    }

    pub fn is_unbounded(&self) -> bool {
        self.budget_ms.is_infinite()
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Timeout::from_secs(DEFAULT_TIMEOUT_SECS)
    }
}

impl From<Option<f64>> for Timeout {
    fn from(secs: Option<f64>) -> Self {
        secs.map(Timeout::from_secs).unwrap_or_default()
    }
}

/// A started clock paired with its budget
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    timeout: Timeout,
}

impl Deadline {
    pub fn start(timeout: Timeout) -> Self {
        Deadline {
            start: Instant::now(),
            timeout,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// True once the elapsed time strictly exceeds the budget
    pub fn expired(&self) -> bool {
        !self.timeout.is_unbounded() && self.elapsed_ms() > self.timeout.budget_ms()
    }

    pub fn timeout(&self) -> Timeout {
        self.timeout
    }
}
