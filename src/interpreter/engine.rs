// Execution engine for the Brainfuck interpreter

use crate::interpreter::config::Config;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::timeout::Deadline;
use crate::memory::tape::{Cell, Tape};
use crate::parser::program::{Op, Program};
use crate::snapshot::{OutputSink, Snapshot, SnapshotManager};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Why a run stopped normally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The instruction pointer moved past the last instruction
    EndOfProgram,
    /// A right move needed a cell beyond the tape limit
    TapeLimit,
}

/// Result of executing one instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted(Halt),
}

/// Per-invocation execution context.
///
/// Everything a run touches lives here, so independent interpreters never
/// observe each other.
pub struct Interpreter {
    /// Parsed instruction sequence
    program: Program,

    /// Cell tape and head position
    tape: Tape,

    /// Index of the next instruction to execute
    ip: usize,

    /// Bytes consumed by `,`
    input: Vec<u8>,

    /// Next unread position in `input`
    read_cursor: usize,

    /// Bytes produced by `.`
    output: OutputSink,

    /// Started clock and budget, checked at loop-closing jumps
    deadline: Deadline,

    /// Bracket position -> matching bracket position, filled on first scan
    pub(crate) jump_cache: FxHashMap<usize, usize>,

    /// Instructions executed so far
    steps: u64,

    /// Set once the run stopped normally
    halted: Option<Halt>,

    /// Set once the run stopped abnormally; replayed by later calls
    aborted: Option<RuntimeError>,

    /// Recorded history, if enabled
    snapshot_manager: Option<SnapshotManager>,

    /// Current position in execution history (for stepping backward/forward)
    history_position: usize,

    /// Set by the first call to `step`
    started: bool,
}

impl Interpreter {
    /// Create a new interpreter for a parsed program
    pub fn new(program: Program, input: Vec<u8>, config: &Config) -> Self {
        Interpreter {
            program,
            tape: Tape::new(config.max_tape_cells),
            ip: 0,
            input,
            read_cursor: 0,
            output: OutputSink::new(config.output_capacity),
            deadline: Deadline::start(config.timeout),
            jump_cache: FxHashMap::default(),
            steps: 0,
            halted: None,
            aborted: None,
            snapshot_manager: config.history_limit.map(SnapshotManager::new),
            history_position: 0,
            started: false,
        }
    }

    /// Run the program until it halts, times out, or history fills up
    pub fn run(&mut self) -> Result<Halt, RuntimeError> {
        loop {
            if let Status::Halted(halt) = self.step()? {
                return Ok(halt);
            }
        }
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> Result<Status, RuntimeError> {
        if let Some(err) = &self.aborted {
            return Err(err.clone());
        }
        if let Some(halt) = self.halted {
            return Ok(Status::Halted(halt));
        }
        self.start()?;

        let op = match self.program.get(self.ip) {
            Some(instr) => instr.op,
            None => return self.halt(Halt::EndOfProgram),
        };

        match op {
            Op::Increment => self.tape.increment(),
            Op::Decrement => self.tape.decrement(),
            Op::Output => {
                // Dropped silently once the sink is full
                self.output.write(self.tape.low_byte());
            }
            Op::Input => {
                if let Some(&byte) = self.input.get(self.read_cursor) {
                    // Input bytes are signed: 0xFF reads as -1
                    self.tape.set(Cell::from(byte as i8));
                    self.read_cursor += 1;
                }
            }
            Op::MoveLeft => {
                self.tape.move_left();
            }
            Op::MoveRight => {
                if let Err(full) = self.tape.move_right() {
                    debug!(limit = full.limit, ip = self.ip, "tape limit reached");
                    return self.halt(Halt::TapeLimit);
                }
            }
            Op::LoopOpen => {
                if self.tape.get() == 0 {
                    self.ip = self.matching_close(self.ip);
                }
            }
            Op::LoopClose => {
                if self.tape.get() != 0 {
                    self.check_deadline()?;
                    self.ip = self.matching_open(self.ip);
                }
            }
            Op::Comment(_) => {}
        }

        self.ip += 1;
        self.steps += 1;
        self.take_snapshot()?;
        Ok(Status::Running)
    }

    fn start(&mut self) -> Result<(), RuntimeError> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        // The budget covers execution only, not the time spent between
        // construction and the first instruction.
        self.deadline = Deadline::start(self.deadline.timeout());
        self.take_snapshot()
    }

    fn check_deadline(&mut self) -> Result<(), RuntimeError> {
        if !self.deadline.expired() {
            return Ok(());
        }

        let err = RuntimeError::TimedOut {
            elapsed_ms: self.deadline.elapsed_ms(),
            budget_ms: self.deadline.timeout().budget_ms(),
        };
        debug!(steps = self.steps, ip = self.ip, "{}", err);
        self.aborted = Some(err.clone());
        Err(err)
    }

    fn halt(&mut self, halt: Halt) -> Result<Status, RuntimeError> {
        self.halted = Some(halt);
        debug!(
            ?halt,
            steps = self.steps,
            output_len = self.output.len(),
            "execution halted"
        );

        // The snapshot after the last instruction may still point at an
        // instruction (tape limit); record the halted state once.
        let needs_final = self
            .snapshot_manager
            .as_ref()
            .and_then(|m| m.last())
            .is_some_and(|s| s.ip.is_some());
        if needs_final {
            self.take_snapshot()?;
        }

        Ok(Status::Halted(halt))
    }

    /// Record the current state if history is enabled
    fn take_snapshot(&mut self) -> Result<(), RuntimeError> {
        let ip = if self.halted.is_none() && self.ip < self.program.len() {
            Some(self.ip)
        } else {
            None
        };

        let Some(manager) = self.snapshot_manager.as_mut() else {
            return Ok(());
        };

        let snapshot = Snapshot {
            step: self.steps,
            ip,
            tape: self.tape.cells().to_vec(),
            head: self.tape.head(),
            output_len: self.output.len(),
            read_cursor: self.read_cursor,
        };

        if let Err(current) = manager.push(snapshot) {
            let err = RuntimeError::SnapshotLimitExceeded {
                current,
                limit: manager.memory_limit(),
            };
            self.aborted = Some(err.clone());
            return Err(err);
        }

        self.history_position = manager.len() - 1;
        Ok(())
    }

    // ---- History navigation ----

    fn history(&self) -> Result<&SnapshotManager, RuntimeError> {
        match &self.snapshot_manager {
            Some(manager) if !manager.is_empty() => Ok(manager),
            Some(_) => Err(RuntimeError::HistoryOperationFailed {
                message: "no snapshots recorded".to_string(),
            }),
            None => Err(RuntimeError::HistoryOperationFailed {
                message: "history recording is disabled".to_string(),
            }),
        }
    }

    pub fn step_forward(&mut self) -> Result<(), RuntimeError> {
        let total = self.history()?.len();
        if self.history_position + 1 >= total {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "already at the last step".to_string(),
            });
        }
        self.history_position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), RuntimeError> {
        self.history()?;
        if self.history_position == 0 {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "already at the first step".to_string(),
            });
        }
        self.history_position -= 1;
        Ok(())
    }

    pub fn rewind_to_start(&mut self) -> Result<(), RuntimeError> {
        self.history()?;
        self.history_position = 0;
        Ok(())
    }

    pub fn jump_to_end(&mut self) -> Result<(), RuntimeError> {
        let total = self.history()?.len();
        self.history_position = total - 1;
        Ok(())
    }

    /// Snapshot at the current history position
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.snapshot_manager
            .as_ref()
            .and_then(|m| m.get(self.history_position))
    }

    pub fn history_position(&self) -> usize {
        self.history_position
    }

    pub fn total_snapshots(&self) -> usize {
        self.snapshot_manager.as_ref().map_or(0, |m| m.len())
    }

    pub fn snapshot_manager(&self) -> Option<&SnapshotManager> {
        self.snapshot_manager.as_ref()
    }

    // ---- State accessors ----

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    pub fn read_cursor(&self) -> usize {
        self.read_cursor
    }

    pub fn output(&self) -> &[u8] {
        self.output.as_bytes()
    }

    pub fn output_sink(&self) -> &OutputSink {
        &self.output
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output.into_bytes()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn halted(&self) -> Option<Halt> {
        self.halted
    }

    pub fn aborted(&self) -> Option<&RuntimeError> {
        self.aborted.as_ref()
    }
}
