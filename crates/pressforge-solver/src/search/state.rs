//! Per-branch search state.

use pressforge_core::{Button, Machine, Solution};

/// Accumulated counters and press counts along one search branch.
///
/// Every recursive call owns its own copy; siblings never share a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    counters: Vec<u32>,
    presses: Vec<u32>,
    total_presses: u64,
}

impl SearchState {
    /// All counters at zero, nothing pressed.
    pub fn root(machine: &Machine) -> Self {
        Self {
            counters: vec![0; machine.counter_count()],
            presses: vec![0; machine.button_count()],
            total_presses: 0,
        }
    }

    /// Applies one press of `button`.
    pub fn press(&mut self, button: &Button) {
        for &counter in button.counters() {
            self.counters[counter] += 1;
        }
        self.presses[button.index()] += 1;
        self.total_presses += 1;
    }

    pub fn counters(&self) -> &[u32] {
        &self.counters
    }

    /// Press count per button.
    pub fn presses(&self) -> &[u32] {
        &self.presses
    }

    pub fn total_presses(&self) -> u64 {
        self.total_presses
    }

    /// Snapshot of this state's press assignment.
    pub fn to_solution(&self) -> Solution {
        Solution {
            total_presses: self.total_presses,
            presses: self.presses.clone(),
        }
    }
}
