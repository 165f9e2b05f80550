// Integration tests for the Brainfuck evaluator

use bfeval::interpreter::constants::{MAX_TAPE_CELLS, MAX_TAPE_GROWTH, OUTPUT_CAPACITY};
use bfeval::parser::program::parse;
use bfeval::{Config, Halt, Interpreter, Outcome, evaluate, evaluate_with};
use std::thread;

const GENEROUS: Option<f64> = Some(10.0);

#[test]
fn test_increment_and_output() {
    assert_eq!(evaluate(b"+++.", b"", GENEROUS), vec![3]);
}

#[test]
fn test_echo_single_input_byte() {
    assert_eq!(evaluate(b",.", b"A", GENEROUS), b"A".to_vec());
}

#[test]
fn test_hello_world() {
    let source = concat!(
        "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]",
        ">>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++."
    )
    .as_bytes();
    assert_eq!(evaluate(source, b"", GENEROUS), b"Hello World!\n".to_vec());
}

#[test]
fn test_cat_until_input_exhausted() {
    // Copies input until a zero cell; exhausted input leaves the last byte,
    // so a trailing NUL in the input is what ends the loop.
    let output = evaluate(b",[.,]", b"abc\0", GENEROUS);
    assert_eq!(output, b"abc".to_vec());
}

#[test]
fn test_empty_source_yields_empty_output() {
    assert!(evaluate(b"", b"ignored", GENEROUS).is_empty());
}

#[test]
fn test_high_input_byte_reads_as_negative_cell() {
    // 0xFF reads as -1, so the increment zeroes the cell and the loop is skipped
    assert!(evaluate(b",+[>+++.<[-]]", &[0xFF], GENEROUS).is_empty());
    // a high byte still prints back unchanged
    assert_eq!(evaluate(b",.", &[0xC8], GENEROUS), vec![0xC8]);
}

#[test]
fn test_sentinel_stops_parsing() {
    assert_eq!(evaluate(b"+.!+.", b"", GENEROUS), vec![1]);
}

#[test]
fn test_high_byte_terminates_program() {
    assert_eq!(evaluate(&[b'+', b'.', 0xC3, b'+', b'.'], b"", GENEROUS), vec![1]);
}

#[test]
fn test_comments_are_noops() {
    let source = b"increment thrice: +++ then print: .";
    assert_eq!(evaluate(source, b"", GENEROUS), vec![3]);
}

#[test]
fn test_infinite_loop_times_out_with_empty_output() {
    assert!(evaluate(b"+[]", b"", Some(0.001)).is_empty());
}

#[test]
fn test_timeout_discards_partial_output() {
    let outcome = evaluate_with(b"+.[]", b"", &Config::default().with_timeout_secs(0.001));
    assert!(outcome.is_timed_out());
    assert!(outcome.into_output().is_empty());
}

#[test]
fn test_terminating_loop_completes() {
    let outcome = evaluate_with(b"+[-]", b"", &Config::default().with_timeout_secs(10.0));
    assert_eq!(
        outcome,
        Outcome::Completed {
            output: Vec::new(),
            halt: Halt::EndOfProgram
        }
    );
}

#[test]
fn test_loop_free_program_never_times_out() {
    let source = "+.".repeat(10_000);
    let outcome = evaluate_with(source.as_bytes(), b"", &Config::default().with_timeout_secs(0.0));
    assert!(!outcome.is_timed_out());
    assert_eq!(outcome.output().len(), OUTPUT_CAPACITY);
}

#[test]
fn test_output_truncated_at_capacity() {
    // 16 * 16 * 20 = 5120 writes of a zero cell
    let source = format!(
        "{}[>{}[>{}[>.<-]<-]<-]",
        "+".repeat(16),
        "+".repeat(16),
        "+".repeat(20)
    );
    let output = evaluate(source.as_bytes(), b"", GENEROUS);
    assert_eq!(output.len(), OUTPUT_CAPACITY);
    assert!(output.iter().all(|&b| b == 0));
}

#[test]
fn test_tape_growth_cap_halts_silently() {
    let mut source = ">".repeat(MAX_TAPE_GROWTH + 1);
    source.push_str("+.");
    let outcome = evaluate_with(source.as_bytes(), b"", &Config::default());
    assert_eq!(
        outcome,
        Outcome::Completed {
            output: Vec::new(),
            halt: Halt::TapeLimit
        }
    );
}

#[test]
fn test_tape_growth_up_to_cap_is_allowed() {
    let mut source = ">".repeat(MAX_TAPE_GROWTH);
    source.push_str("+.");
    assert_eq!(evaluate(source.as_bytes(), b"", GENEROUS), vec![1]);
}

#[test]
fn test_tape_limit_keeps_earlier_output() {
    let mut source = String::from("+.");
    source.push_str(&">".repeat(MAX_TAPE_CELLS));
    source.push('.');
    assert_eq!(evaluate(source.as_bytes(), b"", GENEROUS), vec![1]);
}

#[test]
fn test_move_left_at_origin_is_noop() {
    assert_eq!(evaluate(b"<<<+++.>+.<.", b"", GENEROUS), vec![3, 1, 3]);
}

#[test]
fn test_cell_wraps_and_outputs_low_byte() {
    assert_eq!(evaluate(b"-.", b"", GENEROUS), vec![0xFF]);
    // 256 increments: low byte wraps to zero, the cell itself does not
    let source = format!("{}.[-]", "+".repeat(256));
    let outcome = evaluate_with(source.as_bytes(), b"", &Config::default());
    assert_eq!(outcome.output(), &[0]);
}

#[test]
fn test_unmatched_open_bracket_skips_to_end() {
    assert_eq!(evaluate(b"+.>[+.", b"", GENEROUS), vec![1]);
}

#[test]
fn test_unmatched_close_bracket_resumes_after_first_instruction() {
    // ']' scans back to the first instruction and execution continues after
    // it, so the leading ',' runs once and the second input byte is never read.
    let config = Config::default().with_timeout_secs(10.0);
    let mut interpreter = Interpreter::new(parse(b",-.]"), vec![3, 9], &config);
    assert_eq!(interpreter.run(), Ok(Halt::EndOfProgram));
    assert_eq!(interpreter.output(), &[2, 1, 0]);
    assert_eq!(interpreter.read_cursor(), 1);
}

#[test]
fn test_nested_loops_multiply() {
    // 3 * 4 * 5 = 60
    let source = b"+++[>++++[>+++++<-]<-]>>.";
    assert_eq!(evaluate(source, b"", GENEROUS), vec![60]);
}

#[test]
fn test_concurrent_evaluations_are_independent() {
    let handles: Vec<_> = (1u8..=8)
        .map(|n| {
            thread::spawn(move || {
                let source = format!(",{}.", "+".repeat(n as usize));
                evaluate(source.as_bytes(), &[n], GENEROUS)
            })
        })
        .collect();

    for (n, handle) in (1u8..=8).zip(handles) {
        assert_eq!(handle.join().unwrap(), vec![n * 2]);
    }
}

#[test]
fn test_repeated_calls_do_not_share_state() {
    assert_eq!(evaluate(b",.", b"x", GENEROUS), b"x".to_vec());
    assert_eq!(evaluate(b",.", b"", GENEROUS), vec![0]);
    assert_eq!(evaluate(b">>+.", b"", GENEROUS), vec![1]);
}

#[test]
fn test_interpreter_with_history_replays_run() {
    let config = Config::default().with_history(1 << 20);
    let mut interpreter = Interpreter::new(parse(b"++[>+<-]>."), Vec::new(), &config);
    assert_eq!(interpreter.run(), Ok(Halt::EndOfProgram));
    assert_eq!(interpreter.output(), &[2]);

    interpreter.rewind_to_start().unwrap();
    let mut max_head = 0;
    let mut last_step = 0;
    while interpreter.step_forward().is_ok() {
        let snapshot = interpreter.current_snapshot().unwrap();
        assert!(snapshot.step > last_step);
        last_step = snapshot.step;
        max_head = max_head.max(snapshot.head);
    }
    assert_eq!(max_head, 1);
    assert_eq!(last_step, interpreter.steps());
}
