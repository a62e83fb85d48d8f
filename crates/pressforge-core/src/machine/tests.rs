//! Tests for the machine model.

use super::*;

fn machine(buttons: Vec<Vec<usize>>, target: Vec<u32>) -> Machine {
    Machine::new(0, buttons, target).unwrap()
}

#[test]
fn test_max_presses_is_largest_touched_target() {
    let m = machine(vec![vec![0], vec![1, 2], vec![0, 2]], vec![3, 5, 4]);

    assert_eq!(m.max_presses(), vec![3, 5, 4]);
    assert_eq!(m.max_target(), 5);
}

#[test]
fn test_duplicate_counters_collapse() {
    let m = machine(vec![vec![2, 0, 2, 0]], vec![1, 1, 1]);

    assert_eq!(m.buttons()[0].counters(), &[0, 2]);
}

#[test]
fn test_empty_button_rejected() {
    let err = Machine::new(4, vec![vec![0], vec![]], vec![1]).unwrap_err();
    assert_eq!(err, MachineError::EmptyButton { button: 1 });
}

#[test]
fn test_out_of_range_counter_rejected() {
    let err = Machine::new(0, vec![vec![0, 3]], vec![1, 1]).unwrap_err();
    assert_eq!(
        err,
        MachineError::CounterOutOfRange {
            button: 0,
            counter: 3,
            counters: 2,
        }
    );
}

#[test]
fn test_every_button_advances() {
    let m = machine(vec![vec![0], vec![0, 1]], vec![2, 2]);
    assert!(m.every_button_advances());

    let no_buttons = machine(Vec::new(), vec![0]);
    assert!(no_buttons.every_button_advances());
}

#[test]
fn test_classify() {
    let m = machine(vec![vec![0], vec![1]], vec![2, 3]);

    assert_eq!(m.classify(&[0, 0]), CounterMatch::Below);
    assert_eq!(m.classify(&[2, 1]), CounterMatch::Below);
    assert_eq!(m.classify(&[2, 3]), CounterMatch::Exact);
    assert_eq!(m.classify(&[3, 0]), CounterMatch::Overshoot);
    assert_eq!(m.classify(&[0, 4]), CounterMatch::Overshoot);
}

#[test]
fn test_accumulate() {
    let m = machine(vec![vec![0], vec![0, 1]], vec![5, 2]);

    assert_eq!(m.accumulate(&[3, 2]), Some(vec![5, 2]));
    assert_eq!(m.accumulate(&[1]), None);
}

#[test]
fn test_search_space() {
    let m = machine(vec![vec![0], vec![1]], vec![2, 3]);
    assert_eq!(m.search_space(), 12);
}

#[test]
fn test_status_transitions_once() {
    let m = machine(vec![vec![0]], vec![1]);
    assert_eq!(m.status(), MachineStatus::InProgress);
    assert!(m.outcome().is_none());

    m.finish(SolveOutcome::Solved(Solution::from_presses(vec![1])))
        .unwrap();
    assert_eq!(m.status(), MachineStatus::Success);
    assert_eq!(m.outcome().and_then(SolveOutcome::total_presses), Some(1));

    let err = m.finish(SolveOutcome::Unsolvable).unwrap_err();
    assert_eq!(err, MachineError::AlreadyFinished { machine: 0 });
    assert_eq!(m.status(), MachineStatus::Success);
}

#[test]
fn test_telemetry_accumulates() {
    let m = machine(vec![vec![0]], vec![1]);
    m.record_presses(3);
    m.record_presses(2);
    assert_eq!(m.presses_attempted(), 5);
}

#[test]
fn test_outcome_from_option() {
    assert_eq!(SolveOutcome::from(None), SolveOutcome::Unsolvable);
    let solved = SolveOutcome::from(Some(Solution::from_presses(vec![2, 3])));
    assert_eq!(solved.total_presses(), Some(5));
    assert_eq!(solved.status(), MachineStatus::Success);
}

#[test]
fn test_status_display() {
    assert_eq!(format!("{}", MachineStatus::InProgress), "InProgress");
    assert_eq!(format!("{}", MachineStatus::Success), "Success");
    assert_eq!(format!("{}", MachineStatus::Failed), "Failed");
}
