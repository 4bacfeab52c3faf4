//! Integration tests for the Foldy engine, organized by instruction group.

use std::io::{self, BufRead, Cursor, Write};

use foldy_engine::{Direction, Engine, Flow, LoadError, RuntimeError};
use num_bigint::BigInt;
use num_traits::{One, ToPrimitive};

// ============================================================
// Helper functions
// ============================================================

/// Run `code` with no input for at most `ticks` ticks, expecting success.
fn run_ok(code: &str, ticks: u64) -> Engine<io::Empty, Vec<u8>> {
    let mut engine = Engine::with_io(code, io::empty(), Vec::new()).unwrap();
    engine.run(ticks).unwrap();
    engine
}

/// Run `code` with no input, expecting a runtime error.
fn run_err(code: &str, ticks: u64) -> RuntimeError {
    let mut engine = Engine::with_io(code, io::empty(), Vec::new()).unwrap();
    engine.run(ticks).unwrap_err()
}

/// Run `code` against the given input text, expecting success.
fn run_with_input(code: &str, input: &str, ticks: u64) -> Engine<Cursor<Vec<u8>>, Vec<u8>> {
    let mut engine =
        Engine::with_io(code, Cursor::new(input.as_bytes().to_vec()), Vec::new()).unwrap();
    engine.run(ticks).unwrap();
    engine
}

/// The captured output as a string.
fn output_of<R: BufRead>(engine: &Engine<R, Vec<u8>>) -> String {
    String::from_utf8(engine.output().clone()).unwrap()
}

/// The stack as plain i64s, bottom first.
fn stack_of<R: BufRead, W: Write>(engine: &Engine<R, W>) -> Vec<i64> {
    engine
        .stack()
        .iter()
        .map(|n| n.to_i64().expect("test stacks fit in i64"))
        .collect()
}

// ---- Loading ----

#[test]
fn unknown_characters_fail_to_load() {
    let err = Engine::with_io("b1a2b", io::empty(), Vec::new())
        .map(|_| ())
        .unwrap_err();
    assert_eq!(
        err,
        LoadError::UnknownCharacters {
            chars: "ab".to_string()
        }
    );
    assert_eq!(err.to_string(), "unknown character(s) (ab) found in code");
}

#[test]
fn empty_program_loads_as_one_cell() {
    let engine = Engine::with_io("", io::empty(), Vec::new()).unwrap();
    assert_eq!((engine.grid().width(), engine.grid().height()), (1, 1));
}

// ---- Digits and arithmetic ----

#[test]
fn digits_push_in_order() {
    let engine = run_ok("123@", 10);
    assert_eq!(stack_of(&engine), vec![1, 2, 3]);
}

#[test]
fn addition_prints_five() {
    let engine = run_ok("23+.@", 10);
    assert_eq!(output_of(&engine), "5");
}

#[test]
fn subtraction_and_multiplication() {
    assert_eq!(output_of(&run_ok("52-.@", 10)), "3");
    assert_eq!(output_of(&run_ok("34*.@", 10)), "12");
}

#[test]
fn division_floors() {
    assert_eq!(output_of(&run_ok("92:.@", 10)), "4");
}

#[test]
fn repeated_division_keeps_flooring() {
    let engine = run_ok("92:2:@", 10);
    assert_eq!(stack_of(&engine), vec![2]);
}

#[test]
fn division_floors_toward_negative_infinity() {
    // 0 - 5 = -5, then -5 // 2 = -3.
    assert_eq!(output_of(&run_ok("05-2:.@", 10)), "-3");
}

#[test]
fn division_by_zero_is_fatal() {
    assert_eq!(run_err("90:@", 10), RuntimeError::DivisionByZero);
}

#[test]
fn arithmetic_pads_the_bottom_with_zeros() {
    // One operand short: 0 - 7.
    assert_eq!(output_of(&run_ok("7-.@", 10)), "-7");
    // Two operands short: 0 + 0.
    let engine = run_ok("+@", 10);
    assert_eq!(stack_of(&engine), vec![0]);
}

#[test]
fn values_grow_without_bound() {
    // 9 multiplied by 9, 21 times: 9^22, past i64.
    let code = format!("9{}@", "9*".repeat(21));
    let engine = run_ok(&code, 100);
    let expected = (0..22).fold(BigInt::one(), |acc, _| acc * 9);
    assert_eq!(engine.stack(), &[expected]);
}

// ---- Direction control and mirrors ----

#[test]
fn direction_forcer_wraps_left_to_far_edge() {
    // '<' sends the IP left; wrapping lands it on '@'.
    let engine = run_ok("<@", 10);
    assert_eq!(engine.ip().direction, Direction::Left);
}

#[test]
fn up_and_down_forcers_set_direction() {
    let mut engine = Engine::with_io("^v", io::empty(), Vec::new()).unwrap();
    assert_eq!(engine.tick().unwrap(), Flow::Running);
    assert_eq!(engine.ip().direction, Direction::Up);
}

#[test]
fn slash_bounces_right_to_up_and_back() {
    // On one row, '/' turns the IP up; the next tick re-reads it (the IP
    // wrapped in place) and turns it right again, onto '@'.
    run_ok("/@", 3);
}

#[test]
fn backslash_bounces_right_to_down_and_back() {
    run_ok("\\@", 3);
}

#[test]
fn vertical_mirror_reverses_horizontal_travel() {
    let engine = run_ok("|@", 2);
    assert_eq!(engine.ip().direction, Direction::Left);
}

#[test]
fn horizontal_mirror_passes_horizontal_travel_through() {
    let engine = run_ok("_@", 2);
    assert_eq!(engine.ip().direction, Direction::Right);
}

// ---- Skip ----

#[test]
fn skip_jumps_over_one_cell_when_top_is_positive() {
    let engine = run_ok("1$2@", 10);
    assert_eq!(stack_of(&engine), vec![1]);
}

#[test]
fn skip_does_nothing_when_top_is_zero() {
    let engine = run_ok("0$2@", 10);
    assert_eq!(stack_of(&engine), vec![0, 2]);
}

#[test]
fn skip_on_empty_stack_is_a_no_op() {
    let engine = run_ok("$@", 10);
    assert!(engine.stack().is_empty());
}

// ---- Randomness ----

#[test]
fn random_is_deterministic_under_a_seed() {
    let run_seeded = |seed| {
        let mut engine = Engine::with_io("9?.@", io::empty(), Vec::new())
            .unwrap()
            .with_seed(seed);
        engine.run(10).unwrap();
        output_of(&engine)
    };
    assert_eq!(run_seeded(42), run_seeded(42));
    let value: i64 = run_seeded(42).parse().unwrap();
    assert!((0..9).contains(&value));
}

#[test]
fn random_on_nonpositive_pops_without_pushing() {
    let engine = run_ok("0?@", 10);
    assert!(engine.stack().is_empty());
}

#[test]
fn random_on_empty_stack_is_a_no_op() {
    let engine = run_ok("?@", 10);
    assert!(engine.stack().is_empty());
}

// ---- Folding ----

#[test]
fn clockwise_fold_turns_the_row_into_a_column() {
    // '}' folds "12@" downward; the IP then walks down the new column.
    let engine = run_ok("}12@", 10);
    assert_eq!((engine.grid().width(), engine.grid().height()), (4, 4));
    assert_eq!(stack_of(&engine), vec![1, 2]);
    assert_eq!(engine.ip().direction, Direction::Down);
}

#[test]
fn counter_clockwise_fold_grows_the_grid_upward() {
    let engine = run_ok("{12@", 10);
    assert_eq!((engine.grid().width(), engine.grid().height()), (4, 4));
    assert_eq!(stack_of(&engine), vec![1, 2]);
    assert_eq!(engine.ip().direction, Direction::Up);
}

#[test]
fn braces_only_turn_when_fold_mode_is_off() {
    let engine = run_ok("#{@", 10);
    // No fold happened, and '#' ran twice on the way to '@'.
    assert_eq!(engine.grid().height(), 1);
    assert!(engine.ip().fold_mode);
}

// ---- Output ----

#[test]
fn print_char_emits_the_code_point() {
    // 8 * 9 = 72 = 'H'.
    assert_eq!(output_of(&run_ok("89*!@", 10)), "H");
}

#[test]
fn print_char_wraps_negative_values() {
    // -1 mod 0x110000 is the last code point.
    assert_eq!(output_of(&run_ok("01-!@", 10)), "\u{10FFFF}");
}

#[test]
fn print_on_empty_stack_emits_zero() {
    assert_eq!(output_of(&run_ok(".@", 10)), "0");
    assert_eq!(output_of(&run_ok("!@", 10)), "\0");
}

// ---- Input ----

#[test]
fn read_char_pushes_the_code_point() {
    let engine = run_with_input(";@", "A", 10);
    assert_eq!(stack_of(&engine), vec![65]);
}

#[test]
fn read_char_handles_multibyte_input() {
    let engine = run_with_input(";;@", "hé", 10);
    assert_eq!(stack_of(&engine), vec![104, 233]);
}

#[test]
fn read_char_at_eof_is_fatal() {
    let mut engine = Engine::with_io(";@", io::empty(), Vec::new()).unwrap();
    assert_eq!(engine.run(10), Err(RuntimeError::InputExhausted));
}

#[test]
fn read_int_parses_a_line() {
    let engine = run_with_input(",@", "42\n", 10);
    assert_eq!(stack_of(&engine), vec![42]);
}

#[test]
fn read_int_accepts_negative_numbers() {
    let engine = run_with_input(",@", "-7\n", 10);
    assert_eq!(stack_of(&engine), vec![-7]);
}

#[test]
fn read_int_pushes_zero_when_unparseable_or_eof() {
    let engine = run_with_input(",@", "not a number\n", 10);
    assert_eq!(stack_of(&engine), vec![0]);
    let engine = run_with_input(",@", "", 10);
    assert_eq!(stack_of(&engine), vec![0]);
}

// ---- Stack manipulation ----

#[test]
fn dup_doubles_the_top() {
    assert_eq!(output_of(&run_ok("5&+.@", 10)), "10");
}

#[test]
fn discard_drops_the_top() {
    assert_eq!(output_of(&run_ok("12~.@", 10)), "1");
}

#[test]
fn bury_moves_the_top_to_the_bottom() {
    let engine = run_ok("123[@", 10);
    assert_eq!(stack_of(&engine), vec![3, 1, 2]);
}

#[test]
fn dup_discard_and_bury_ignore_an_empty_stack() {
    assert!(run_ok("&@", 10).stack().is_empty());
    assert!(run_ok("~@", 10).stack().is_empty());
    assert!(run_ok("[@", 10).stack().is_empty());
}

#[test]
fn rotate_pulls_the_nth_element_to_the_top() {
    // Pop 2, then lift the 2nd-from-top of [1, 2, 3].
    let engine = run_ok("1232]@", 10);
    assert_eq!(stack_of(&engine), vec![1, 3, 2]);
}

#[test]
fn rotate_index_wraps_through_zero() {
    // Pop 0: (0 - 1) mod 2 + 1 = 2, the bottom of [1, 2].
    let engine = run_ok("120]@", 10);
    assert_eq!(stack_of(&engine), vec![2, 1]);
}

#[test]
fn rotate_on_empty_stack_is_fatal() {
    assert_eq!(
        run_err("]@", 10),
        RuntimeError::StackEmpty { op: ']' }
    );
}

#[test]
fn rotate_with_nothing_left_to_index_is_fatal() {
    assert_eq!(
        run_err("1]@", 10),
        RuntimeError::StackEmpty { op: ']' }
    );
}

// ---- Termination and budgets ----

#[test]
fn halt_alone_terminates_in_one_tick() {
    let engine = run_ok("@", 1);
    assert!(engine.stack().is_empty());
}

#[test]
fn exhausted_budget_reports_the_tick_count() {
    assert_eq!(
        run_err("1", 10),
        RuntimeError::TickLimitExceeded { ticks: 10 }
    );
}

#[test]
fn wrapping_program_keeps_its_stack_when_the_budget_ends() {
    let mut engine = Engine::with_io("5>", io::empty(), Vec::new()).unwrap();
    assert_eq!(
        engine.run(2),
        Err(RuntimeError::TickLimitExceeded { ticks: 2 })
    );
    assert_eq!(stack_of(&engine), vec![5]);
}

#[test]
fn unbounded_run_honors_cancellation() {
    let mut engine = Engine::with_io("1", io::empty(), Vec::new()).unwrap();
    let cancel = engine.cancel_handle();
    cancel.store(true, std::sync::atomic::Ordering::Relaxed);
    assert_eq!(engine.run(0), Err(RuntimeError::Cancelled));
}

#[test]
fn unbounded_run_completes_terminating_programs() {
    let mut engine = Engine::with_io("23+.@", io::empty(), Vec::new()).unwrap();
    engine.run(0).unwrap();
    assert_eq!(output_of(&engine), "5");
}

// ---- Rendering ----

#[test]
fn display_marks_the_ip_cell() {
    let engine = Engine::with_io("1@", io::empty(), Vec::new()).unwrap();
    assert_eq!(engine.to_string(), "\u{00B7} @");
}
