//! One-shot evaluation entry points
//!
//! [`evaluate`] is the classic contract: source, input and an optional
//! timeout in seconds go in, output bytes come out. A timed-out run yields
//! an empty byte vector rather than its partial output. [`evaluate_with`]
//! takes a full [`Config`] and reports the outcome explicitly.

use crate::interpreter::config::Config;
use crate::interpreter::engine::{Halt, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::timeout::Timeout;
use crate::parser::program::parse;
use tracing::warn;

/// How an evaluation ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Completed { output: Vec<u8>, halt: Halt },
    TimedOut { elapsed_ms: f64 },
}

impl Outcome {
    /// Output bytes; empty if the run timed out
    pub fn into_output(self) -> Vec<u8> {
        match self {
            Outcome::Completed { output, .. } => output,
            Outcome::TimedOut { .. } => Vec::new(),
        }
    }

    pub fn output(&self) -> &[u8] {
        match self {
            Outcome::Completed { output, .. } => output,
            Outcome::TimedOut { .. } => &[],
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, Outcome::TimedOut { .. })
    }
}

/// Run `source` against `input` and return what it printed.
///
/// `timeout` is in seconds and defaults to five. Returns an empty vector if
/// the source is empty or the run times out.
pub fn evaluate(source: &[u8], input: &[u8], timeout: Option<f64>) -> Vec<u8> {
    let config = Config::default().with_timeout(Timeout::from(timeout));
    evaluate_with(source, input, &config).into_output()
}

/// Run `source` with explicit limits.
///
/// History recording is not available here; `config.history_limit` is
/// ignored. Use [`Interpreter`] directly to record snapshots.
pub fn evaluate_with(source: &[u8], input: &[u8], config: &Config) -> Outcome {
    if source.is_empty() {
        return Outcome::Completed {
            output: Vec::new(),
            halt: Halt::EndOfProgram,
        };
    }

    let config = Config {
        history_limit: None,
        ..config.clone()
    };
    let mut interpreter = Interpreter::new(parse(source), input.to_vec(), &config);

    match interpreter.run() {
        Ok(halt) => Outcome::Completed {
            output: interpreter.into_output(),
            halt,
        },
        Err(RuntimeError::TimedOut { elapsed_ms, .. }) => Outcome::TimedOut { elapsed_ms },
        Err(err) => {
            // Only history can fail otherwise, and it is disabled above
            warn!("unexpected runtime error: {}", err);
            Outcome::Completed {
                output: interpreter.into_output(),
                halt: Halt::EndOfProgram,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_skips_execution() {
        let outcome = evaluate_with(b"", b"input", &Config::default().with_timeout_secs(0.0));
        assert_eq!(
            outcome,
            Outcome::Completed {
                output: Vec::new(),
                halt: Halt::EndOfProgram
            }
        );
    }

    #[test]
    fn test_timed_out_outcome_has_no_output() {
        let outcome = evaluate_with(b"+.[.]", b"", &Config::default().with_timeout_secs(0.001));
        assert!(outcome.is_timed_out());
        assert!(outcome.output().is_empty());
        assert!(outcome.into_output().is_empty());
    }

    #[test]
    fn test_completed_reports_halt() {
        let config = Config::default().with_max_tape_cells(2);
        let outcome = evaluate_with(b"+.>>.", b"", &config);
        assert_eq!(
            outcome,
            Outcome::Completed {
                output: vec![1],
                halt: Halt::TapeLimit
            }
        );
    }

    #[test]
    fn test_history_limit_is_ignored() {
        let config = Config::default().with_history(1);
        assert_eq!(evaluate_with(b"+++.", b"", &config).into_output(), vec![3]);
    }
}
