// Constants for the Brainfuck interpreter

/// Byte that ends the program source; nothing after it is parsed
pub const SENTINEL: u8 = b'!';

/// Capacity of the output sink in bytes. Writes past it are dropped.
pub const OUTPUT_CAPACITY: usize = 4096;

/// Number of cells the tape may grow past the origin
pub const MAX_TAPE_GROWTH: usize = 255;

/// Hard tape length: the origin cell plus every allowed growth step
pub const MAX_TAPE_CELLS: usize = MAX_TAPE_GROWTH + 1;

/// Default wall-clock budget, in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 5.0;

/// Caller timeouts (seconds) are multiplied by this before being compared
/// against elapsed milliseconds
pub const TIMEOUT_SCALE: f64 = 1000.0;

/// Default memory cap for recorded execution history (256 MB)
pub const DEFAULT_HISTORY_LIMIT: usize = 256 * 1024 * 1024;
