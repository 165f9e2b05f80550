//! Cell tape
//!
//! The tape starts as a single zero cell (the origin) and grows one cell at a
//! time to the right, on demand, until it reaches its cell limit. It never
//! extends to the left of the origin.
//!
//! # Edge Policies
//!
//! - Moving left at the origin leaves the head where it is.
//! - Moving right when the next cell would exceed the limit fails with
//!   [`TapeFull`]; the executor treats that as the end of the program.

use std::fmt;

/// Value stored in one cell. Arithmetic wraps.
pub type Cell = i32;

/// Right move refused because the tape is at its cell limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapeFull {
    pub limit: usize,
}

impl fmt::Display for TapeFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tape limit of {} cells reached", self.limit)
    }
}

impl std::error::Error for TapeFull {}

/// Result of a successful right move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Growth {
    /// Head moved onto an existing cell
    Existing,
    /// A new zero cell was appended and the head moved onto it
    Grew,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Cell>,
    head: usize,
    limit: usize,
}

impl Tape {
    /// Create a tape holding only the origin cell. `limit` is clamped to at
    /// least one cell.
    pub fn new(limit: usize) -> Self {
        Tape {
            cells: vec![0],
            head: 0,
            limit: limit.max(1),
        }
    }

    pub fn get(&self) -> Cell {
        self.cells[self.head]
    }

    pub fn set(&mut self, value: Cell) {
        self.cells[self.head] = value;
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.head];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.head];
        *cell = cell.wrapping_sub(1);
    }

    /// Low byte of the current cell, as written by `.`
    pub fn low_byte(&self) -> u8 {
        self.get() as u8
    }

    /// Move one cell toward the origin. Returns false if already there.
    pub fn move_left(&mut self) -> bool {
        if self.head == 0 {
            return false;
        }
        self.head -= 1;
        true
    }

    /// Move one cell away from the origin, growing the tape if needed
    pub fn move_right(&mut self) -> Result<Growth, TapeFull> {
        if self.head + 1 < self.cells.len() {
            self.head += 1;
            return Ok(Growth::Existing);
        }

        if self.cells.len() >= self.limit {
            return Err(TapeFull { limit: self.limit });
        }

        self.cells.push(0);
        self.head += 1;
        Ok(Growth::Grew)
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for Tape {
    fn default() -> Self {
        Tape::new(crate::interpreter::constants::MAX_TAPE_CELLS)
    }
}
