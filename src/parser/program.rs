//! Source parsing
//!
//! Brainfuck has no grammar to speak of: every source byte becomes one
//! [`Instruction`], in order, until a terminator byte or the end of the
//! source is reached. Bytes outside the eight operators are kept and execute
//! as no-ops, which lets programs carry free-form comments.
//!
//! # Terminators
//!
//! Parsing stops at the first byte for which [`is_terminator`] holds:
//! - the sentinel [`SENTINEL`] (`!`)
//! - the NUL byte `0x00`
//! - any byte in `0x80..=0xFF`
//!
//! Everything after a terminator is never parsed, so it can never execute.

use crate::interpreter::constants::SENTINEL;
use std::fmt;

/// Decoded operator of a single instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Increment,
    Decrement,
    Output,
    Input,
    MoveLeft,
    MoveRight,
    LoopOpen,
    LoopClose,
    /// Any other byte; executes as a no-op
    Comment(u8),
}

impl Op {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'+' => Op::Increment,
            b'-' => Op::Decrement,
            b'.' => Op::Output,
            b',' => Op::Input,
            b'<' => Op::MoveLeft,
            b'>' => Op::MoveRight,
            b'[' => Op::LoopOpen,
            b']' => Op::LoopClose,
            other => Op::Comment(other),
        }
    }

    /// The source byte this operator was decoded from
    pub fn byte(self) -> u8 {
        match self {
            Op::Increment => b'+',
            Op::Decrement => b'-',
            Op::Output => b'.',
            Op::Input => b',',
            Op::MoveLeft => b'<',
            Op::MoveRight => b'>',
            Op::LoopOpen => b'[',
            Op::LoopClose => b']',
            Op::Comment(byte) => byte,
        }
    }

    pub fn is_comment(self) -> bool {
        matches!(self, Op::Comment(_))
    }
}

/// One parsed source byte.
///
/// Instructions are immutable once parsed. Their neighbours are the
/// previous and next entries of [`Program::instructions`]; bracket pairs are
/// not linked here and are resolved while executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    /// Byte offset in the original source
    pub offset: usize,
}

/// A parsed program: a straight, unbranching instruction sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Number of instructions that are one of the eight operators
    pub fn operator_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|instr| !instr.op.is_comment())
            .count()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in &self.instructions {
            write!(f, "{}", instr.op.byte() as char)?;
        }
        Ok(())
    }
}

/// Whether `byte` ends the program source
pub fn is_terminator(byte: u8) -> bool {
    byte == SENTINEL || byte == 0 || byte >= 0x80
}

/// Parse raw source bytes into a [`Program`].
///
/// Never fails: unknown bytes become comments and unbalanced brackets are
/// left for the executor to resolve.
pub fn parse(source: &[u8]) -> Program {
    let instructions = source
        .iter()
        .take_while(|&&byte| !is_terminator(byte))
        .enumerate()
        .map(|(offset, &byte)| Instruction {
            op: Op::from_byte(byte),
            offset,
        })
        .collect();

    Program { instructions }
}
