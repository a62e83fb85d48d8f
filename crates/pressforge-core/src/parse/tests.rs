//! Tests for the machine line parser.

use super::*;
use crate::error::MachineError;

#[test]
fn test_parse_with_indicator() {
    let m = parse_machine(7, "[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}").unwrap();

    assert_eq!(m.index(), 7);
    assert_eq!(m.button_count(), 6);
    assert_eq!(m.target(), &[3, 5, 4, 7]);
    assert_eq!(m.buttons()[1].counters(), &[1, 3]);
    assert_eq!(m.max_presses(), vec![7, 7, 4, 7, 4, 5]);
    assert_eq!(m.max_target(), 7);
}

#[test]
fn test_tokens_generic_over_element_type() {
    let list = String::from(" 4, x ,,7 ");
    let counters: Vec<usize> = tokens(&list).collect();
    let targets: Vec<u32> = tokens(&list).collect();

    assert_eq!(counters, vec![4, 0, 0, 7]);
    assert_eq!(targets, vec![4, 0, 0, 7]);
}

#[test]
fn test_parse_without_indicator() {
    let m = parse_machine(0, "(0) (1) {2,3}").unwrap();

    assert_eq!(m.button_count(), 2);
    assert_eq!(m.target(), &[2, 3]);
}

#[test]
fn test_parse_tolerates_whitespace() {
    let m = parse_machine(0, "  ( 0 , 1 )   (1)  { 4 , 2 }  ").unwrap();

    assert_eq!(m.buttons()[0].counters(), &[0, 1]);
    assert_eq!(m.target(), &[4, 2]);
}

#[test]
fn test_malformed_numbers_read_as_zero() {
    let m = parse_machine(0, "(x,1) (-2) {3,oops}").unwrap();

    // "x" and "-2" both read as counter 0
    assert_eq!(m.buttons()[0].counters(), &[0, 1]);
    assert_eq!(m.buttons()[1].counters(), &[0]);
    assert_eq!(m.target(), &[3, 0]);
}

#[test]
fn test_empty_group_reads_as_counter_zero() {
    let m = parse_machine(0, "() {1}").unwrap();
    assert_eq!(m.buttons()[0].counters(), &[0]);
}

#[test]
fn test_no_buttons() {
    let m = parse_machine(0, "[#] {0,0}").unwrap();
    assert_eq!(m.button_count(), 0);
    assert_eq!(m.target(), &[0, 0]);
}

#[test]
fn test_missing_target() {
    assert_eq!(
        parse_machine(0, "[.#] (0) (1)").unwrap_err(),
        ParseError::MissingTarget
    );
}

#[test]
fn test_unterminated_groups() {
    assert_eq!(
        parse_machine(0, "[.# (0) {1}").unwrap_err(),
        ParseError::UnterminatedGroup { open: '[' }
    );
    assert_eq!(
        parse_machine(0, "(0 {1}").unwrap_err(),
        ParseError::UnterminatedGroup { open: '(' }
    );
    assert_eq!(
        parse_machine(0, "(0) {1").unwrap_err(),
        ParseError::UnterminatedGroup { open: '{' }
    );
}

#[test]
fn test_counter_out_of_range() {
    let err = parse_machine(0, "(0) (2) {1,1}").unwrap_err();
    assert_eq!(
        err,
        ParseError::Machine(MachineError::CounterOutOfRange {
            button: 1,
            counter: 2,
            counters: 2,
        })
    );
}

#[test]
fn test_parse_batch_skips_blank_lines() {
    let text = "(0) {1}\n\n   \n(0,1) {1,0}\n(0) (1) {2,3}\n";
    let machines = parse_batch(text).unwrap();

    assert_eq!(machines.len(), 3);
    let indices: Vec<_> = machines.iter().map(Machine::index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_parse_batch_reports_line_number() {
    let text = "(0) {1}\n\n(0) (1)\n";
    let err = parse_batch(text).unwrap_err();

    match err {
        PressForgeError::Parse { line, source } => {
            assert_eq!(line, 3);
            assert_eq!(source, ParseError::MissingTarget);
        }
        other => panic!("unexpected error: {other}"),
    }
}
