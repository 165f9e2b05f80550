//! Interpreter configuration
//!
//! [`Config`] gathers the per-run limits. The defaults reproduce the
//! classic behavior: 4096 bytes of output, 256 tape cells, a five second
//! budget and no recorded history.

use crate::interpreter::constants::{MAX_TAPE_CELLS, OUTPUT_CAPACITY};
use crate::interpreter::timeout::Timeout;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub timeout: Timeout,
    pub output_capacity: usize,
    pub max_tape_cells: usize,
    /// Memory cap in bytes for recorded snapshots; `None` disables recording
    pub history_limit: Option<usize>,
}

impl Config {
    pub fn with_timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout_secs(self, secs: f64) -> Self {
        self.with_timeout(Timeout::from_secs(secs))
    }

    pub fn with_output_capacity(mut self, capacity: usize) -> Self {
        self.output_capacity = capacity;
        self
    }

    pub fn with_max_tape_cells(mut self, cells: usize) -> Self {
        self.max_tape_cells = cells;
        self
    }

    pub fn with_history(mut self, memory_limit: usize) -> Self {
        self.history_limit = Some(memory_limit);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timeout: Timeout::default(),
            output_capacity: OUTPUT_CAPACITY,
            max_tape_cells: MAX_TAPE_CELLS,
            history_limit: None,
        }
    }
}
