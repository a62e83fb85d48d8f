//! Hand-checked machines.

use pressforge_core::{parse_machine, Machine};

/// Three sample machine lines; their minimal presses are 10, 12 and 11.
pub const SAMPLE_LINES: [&str; 3] = [
    "[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}",
    "[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}",
    "[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}",
];

/// Sum of minimal presses over [`SAMPLE_LINES`].
pub const SAMPLE_SUM: u64 = 33;

/// Target `[1]`, one button on counter 0. Minimum 1.
pub fn scenario_a() -> Machine {
    machine(0, vec![vec![0]], vec![1])
}

/// Target `[1, 0]`, one button on both counters. Unsolvable.
pub fn scenario_b() -> Machine {
    machine(1, vec![vec![0, 1]], vec![1, 0])
}

/// Target `[2, 3]`, one button per counter. Minimum 5.
pub fn scenario_c() -> Machine {
    machine(2, vec![vec![0], vec![1]], vec![2, 3])
}

/// Scenarios A, B and C as one batch: sum 6, two solved, one failed.
pub fn scenario_batch() -> Vec<Machine> {
    vec![scenario_a(), scenario_b(), scenario_c()]
}

/// The parsed sample batch.
pub fn sample_batch() -> Vec<Machine> {
    SAMPLE_LINES
        .iter()
        .enumerate()
        .map(|(index, line)| parse_machine(index, line).expect("sample line parses"))
        .collect()
}

fn machine(index: usize, buttons: Vec<Vec<usize>>, target: Vec<u32>) -> Machine {
    Machine::new(index, buttons, target).expect("fixture machine is valid")
}
