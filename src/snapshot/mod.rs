// Output capture and snapshot management for reverse execution

use crate::memory::tape::Cell;

/// Fixed-capacity sink for bytes written by `.`
#[derive(Debug, Clone)]
pub struct OutputSink {
    bytes: Vec<u8>,
    capacity: usize,
}

impl OutputSink {
    pub fn new(capacity: usize) -> Self {
        OutputSink {
            bytes: Vec::with_capacity(capacity.min(crate::interpreter::constants::OUTPUT_CAPACITY)),
            capacity,
        }
    }

    /// Append a byte. Returns false, dropping the byte, once the sink is full.
    pub fn write(&mut self, byte: u8) -> bool {
        if self.bytes.len() >= self.capacity {
            return false;
        }
        self.bytes.push(byte);
        true
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bytes.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Output as display lines, one byte per character (Latin-1)
    pub fn lines_up_to(&self, len: usize) -> Vec<String> {
        let text: String = self.bytes[..len.min(self.bytes.len())]
            .iter()
            .map(|&b| b as char)
            .collect();
        let mut lines: Vec<String> = text.split('\n').map(|s| s.to_string()).collect();
        if lines.last().is_some_and(|s| s.is_empty()) {
            lines.pop();
        }
        lines
    }
}

impl Default for OutputSink {
    fn default() -> Self {
        Self::new(crate::interpreter::constants::OUTPUT_CAPACITY)
    }
}

/// Snapshot of execution state, taken before each instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Number of instructions executed before this snapshot
    pub step: u64,
    /// Index of the next instruction, `None` once the program has halted
    pub ip: Option<usize>,
    pub tape: Vec<Cell>,
    pub head: usize,
    /// Output is append-only, so the length is enough to rebuild it
    pub output_len: usize,
    pub read_cursor: usize,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        std::mem::size_of::<Snapshot>() + self.tape.len() * std::mem::size_of::<Cell>()
    }
}

/// Manages execution history for reverse execution
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history. On failure returns the memory that would
    /// have been in use.
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), usize> {
        let snapshot_size = snapshot.estimated_size();
        let needed = self.current_memory + snapshot_size;

        if needed > self.max_memory {
            return Err(needed);
        }

        self.current_memory = needed;
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}
