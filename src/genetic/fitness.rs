//! Scoring candidate programs by what they print

use crate::interpreter::config::Config;
use crate::interpreter::evaluate::evaluate_with;

/// Per-candidate time budget in seconds
pub const FITNESS_TIMEOUT_SECS: f64 = 0.1;

/// Score for a program that printed nothing or timed out
pub const NO_OUTPUT_PENALTY: f64 = 100_000.0;

/// Levenshtein distance between two byte strings
pub fn edit_distance(a: &[u8], b: &[u8]) -> usize {
    // Single-row dynamic programming: row[j] is the distance between the
    // current prefix of `a` and b[..j]
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, &ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let next = (row[j + 1] + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[b.len()]
}

/// Distance between a candidate's output and a target string; lower is
/// better
#[derive(Debug, Clone)]
pub struct OutputDistance {
    target: Vec<u8>,
    config: Config,
}

impl OutputDistance {
    pub fn new(target: impl Into<Vec<u8>>) -> Self {
        OutputDistance {
            target: target.into(),
            config: Config::default().with_timeout_secs(FITNESS_TIMEOUT_SECS),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn target(&self) -> &[u8] {
        &self.target
    }

    /// Run `genes` with no input and score what it printed
    pub fn score(&self, genes: &[u8]) -> f64 {
        let outcome = evaluate_with(genes, b"", &self.config);
        match outcome.output() {
            [] => NO_OUTPUT_PENALTY,
            output => edit_distance(output, &self.target) as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance(b"", b""), 0);
        assert_eq!(edit_distance(b"abc", b""), 3);
        assert_eq!(edit_distance(b"", b"hello"), 5);
        assert_eq!(edit_distance(b"kitten", b"sitting"), 3);
        assert_eq!(edit_distance(b"hello_world", b"hello_world"), 0);
        assert_eq!(edit_distance(b"flaw", b"lawn"), 2);
    }

    #[test]
    fn test_exact_output_scores_zero() {
        // 'A' = 65
        let fitness = OutputDistance::new("A");
        assert_eq!(fitness.score(b"++++++++[>++++++++<-]>+."), 0.0);
    }

    #[test]
    fn test_near_output_scores_distance() {
        let fitness = OutputDistance::new("AB");
        // prints 'A' only
        assert_eq!(fitness.score(b"++++++++[>++++++++<-]>+."), 1.0);
    }

    #[test]
    fn test_silent_or_looping_program_is_penalised() {
        let fitness = OutputDistance::new("hello_world");
        assert_eq!(fitness.score(b"+++"), NO_OUTPUT_PENALTY);
        assert_eq!(fitness.score(b""), NO_OUTPUT_PENALTY);

        let fitness = fitness.with_config(Config::default().with_timeout_secs(0.001));
        assert_eq!(fitness.score(b"+.[]"), NO_OUTPUT_PENALTY);
    }
}
