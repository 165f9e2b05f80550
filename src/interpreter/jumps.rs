//! Bracket matching
//!
//! Brackets are not paired at parse time. When a `[` has to skip its body or
//! a `]` has to repeat it, the instruction sequence is scanned linearly,
//! counting nesting, until the depth returns to zero. The result of each scan
//! is remembered per bracket position, which cannot change the outcome since
//! the program is immutable for the whole run.
//!
//! Unbalanced brackets are not an error:
//! - a `[` with no match skips to the end of the program
//! - a `]` with no match lands on the first instruction and execution
//!   continues after it

use crate::interpreter::engine::Interpreter;
use crate::parser::program::{Instruction, Op};
use tracing::trace;

impl Interpreter {
    /// Position of the `]` closing the loop opened at `open`, or the program
    /// length if there is none
    pub(crate) fn matching_close(&mut self, open: usize) -> usize {
        if let Some(&target) = self.jump_cache.get(&open) {
            return target;
        }
        let target = scan_forward(&self.program().instructions, open);
        trace!(open, target, "scanned forward");
        self.jump_cache.insert(open, target);
        target
    }

    /// Position of the `[` opening the loop closed at `close`, or 0 if the
    /// scan reaches the first instruction unbalanced
    pub(crate) fn matching_open(&mut self, close: usize) -> usize {
        if let Some(&target) = self.jump_cache.get(&close) {
            return target;
        }
        let target = scan_backward(&self.program().instructions, close);
        trace!(close, target, "scanned backward");
        self.jump_cache.insert(close, target);
        target
    }
}

pub fn scan_forward(instructions: &[Instruction], open: usize) -> usize {
    let mut depth = 1usize;
    let mut pos = open;

    while depth > 0 {
        pos += 1;
        match instructions.get(pos).map(|instr| instr.op) {
            None => return instructions.len(),
            Some(Op::LoopOpen) => depth += 1,
            Some(Op::LoopClose) => depth -= 1,
            Some(_) => {}
        }
    }

    pos
}

pub fn scan_backward(instructions: &[Instruction], close: usize) -> usize {
    let mut depth = 1usize;
    let mut pos = close;

    while depth > 0 {
        if pos == 0 {
            return 0;
        }
        pos -= 1;
        match instructions[pos].op {
            Op::LoopClose => depth += 1,
            Op::LoopOpen => depth -= 1,
            _ => {}
        }
    }

    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::program::parse;

    #[test]
    fn test_scan_forward_nested() {
        let program = parse(b"[[]+]-");
        assert_eq!(scan_forward(&program.instructions, 0), 4);
        assert_eq!(scan_forward(&program.instructions, 1), 2);
    }

    #[test]
    fn test_scan_backward_nested() {
        let program = parse(b"+[[]+]");
        assert_eq!(scan_backward(&program.instructions, 5), 1);
        assert_eq!(scan_backward(&program.instructions, 3), 2);
    }

    #[test]
    fn test_scan_ignores_comments() {
        let program = parse(b"[ a ] b ]");
        assert_eq!(scan_forward(&program.instructions, 0), 4);
        assert_eq!(scan_backward(&program.instructions, 4), 0);
    }

    #[test]
    fn test_unmatched_open_runs_to_end() {
        let program = parse(b"+[[]");
        assert_eq!(scan_forward(&program.instructions, 1), program.len());
    }

    #[test]
    fn test_unmatched_close_lands_on_start() {
        let program = parse(b"+-]");
        assert_eq!(scan_backward(&program.instructions, 2), 0);
        let program = parse(b"]");
        assert_eq!(scan_backward(&program.instructions, 0), 0);
    }
}
