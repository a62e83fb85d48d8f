//! Machine model.
//!
//! A [`Machine`] is one independent subproblem: a fixed, ordered list of
//! [`Button`]s and a target counter vector. Each press of a button adds one to
//! every counter in its set, so counters only ever grow. That monotonicity is
//! what the search relies on:
//!
//! - once a counter exceeds its target the state can never recover, and
//! - once every counter equals its target, any further press moves at least
//!   one counter past its target (every button touches at least one counter).
//!
//! Besides the immutable description, a machine carries two fields written by
//! the worker that solves it: a relaxed telemetry counter of presses attempted,
//! and a write-once [`SolveOutcome`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use smallvec::SmallVec;

use crate::error::MachineError;

/// Counter indices touched by one button.
pub type CounterSet = SmallVec<[usize; 8]>;

/// An action that increments a fixed set of counters by one per press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    index: usize,
    counters: CounterSet,
    max_presses: u32,
}

impl Button {
    /// Position of this button within its machine.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Sorted, de-duplicated counter indices this button increments.
    pub fn counters(&self) -> &[usize] {
        &self.counters
    }

    /// Upper bound on useful presses: the largest target among the touched
    /// counters. One more press always overshoots.
    pub fn max_presses(&self) -> u32 {
        self.max_presses
    }
}

/// Lifecycle status of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachineStatus {
    /// No outcome recorded yet.
    InProgress,
    /// An exact assignment was found.
    Success,
    /// The search space holds no exact assignment.
    Failed,
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineStatus::InProgress => write!(f, "InProgress"),
            MachineStatus::Success => write!(f, "Success"),
            MachineStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// A press assignment that reaches the target exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Sum of all per-button press counts.
    pub total_presses: u64,
    /// Press count per button, in button order.
    pub presses: Vec<u32>,
}

impl Solution {
    /// Builds a solution from per-button press counts.
    pub fn from_presses(presses: Vec<u32>) -> Self {
        let total_presses = presses.iter().map(|&p| u64::from(p)).sum();
        Self {
            total_presses,
            presses,
        }
    }
}

/// Final result of solving one machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Minimal assignment found.
    Solved(Solution),
    /// No assignment within the press bounds reaches the target.
    Unsolvable,
}

impl SolveOutcome {
    /// Status this outcome maps to.
    pub fn status(&self) -> MachineStatus {
        match self {
            SolveOutcome::Solved(_) => MachineStatus::Success,
            SolveOutcome::Unsolvable => MachineStatus::Failed,
        }
    }

    /// Minimal total presses, if solved.
    pub fn total_presses(&self) -> Option<u64> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution.total_presses),
            SolveOutcome::Unsolvable => None,
        }
    }
}

impl From<Option<Solution>> for SolveOutcome {
    fn from(best: Option<Solution>) -> Self {
        best.map_or(SolveOutcome::Unsolvable, SolveOutcome::Solved)
    }
}

/// How an accumulated counter vector relates to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMatch {
    /// Some counter is above its target; unrecoverable.
    Overshoot,
    /// Every counter equals its target.
    Exact,
    /// No counter above target, at least one below.
    Below,
}

/// One subproblem: buttons, target vector and solve-time fields.
#[derive(Debug)]
pub struct Machine {
    index: usize,
    buttons: Vec<Button>,
    target: Vec<u32>,
    max_target: u32,
    presses_attempted: AtomicU64,
    outcome: OnceLock<SolveOutcome>,
}

impl Machine {
    /// Creates a machine from per-button counter lists and a target vector.
    ///
    /// Duplicate counter indices within a button collapse. Fails if a button
    /// is empty or references a counter outside `target`.
    pub fn new(
        index: usize,
        buttons: Vec<Vec<usize>>,
        target: Vec<u32>,
    ) -> Result<Self, MachineError> {
        let buttons = buttons
            .into_iter()
            .enumerate()
            .map(|(button, counters)| build_button(button, counters, &target))
            .collect::<Result<Vec<_>, _>>()?;
        let max_target = target.iter().copied().max().unwrap_or(0);

        Ok(Self {
            index,
            buttons,
            target,
            max_target,
            presses_attempted: AtomicU64::new(0),
            outcome: OnceLock::new(),
        })
    }

    /// Position of this machine within its batch.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    pub fn target(&self) -> &[u32] {
        &self.target
    }

    pub fn counter_count(&self) -> usize {
        self.target.len()
    }

    /// Largest value in the target vector.
    pub fn max_target(&self) -> u32 {
        self.max_target
    }

    /// Per-button press bounds, in button order.
    pub fn max_presses(&self) -> Vec<u32> {
        self.buttons.iter().map(Button::max_presses).collect()
    }

    /// Number of assignments the search may enumerate, saturating at `u128::MAX`.
    pub fn search_space(&self) -> u128 {
        self.buttons.iter().fold(1u128, |acc, b| {
            acc.saturating_mul(u128::from(b.max_presses) + 1)
        })
    }

    /// True when every button advances at least one counter per press.
    ///
    /// Abandoning a branch at an exact match is only sound under this
    /// property; construction guarantees it.
    pub fn every_button_advances(&self) -> bool {
        self.buttons.iter().all(|b| !b.counters.is_empty())
    }

    /// Compares an accumulated counter vector against the target.
    pub fn classify(&self, counters: &[u32]) -> CounterMatch {
        debug_assert_eq!(counters.len(), self.target.len());
        let mut exact = true;
        for (&current, &wanted) in counters.iter().zip(&self.target) {
            if current > wanted {
                return CounterMatch::Overshoot;
            }
            if current != wanted {
                exact = false;
            }
        }
        if exact {
            CounterMatch::Exact
        } else {
            CounterMatch::Below
        }
    }

    /// Counter vector produced by pressing each button `presses[i]` times.
    ///
    /// Returns `None` if `presses` has the wrong length.
    pub fn accumulate(&self, presses: &[u32]) -> Option<Vec<u32>> {
        if presses.len() != self.buttons.len() {
            return None;
        }
        let mut counters = vec![0u32; self.target.len()];
        for (button, &count) in self.buttons.iter().zip(presses) {
            for &counter in &button.counters {
                counters[counter] += count;
            }
        }
        Some(counters)
    }

    /// Adds `count` to the presses-attempted telemetry.
    ///
    /// Relaxed: the value is display-only and monotonic.
    pub fn record_presses(&self, count: u64) {
        self.presses_attempted.fetch_add(count, Ordering::Relaxed);
    }

    /// Presses attempted so far. May lag the owning worker.
    pub fn presses_attempted(&self) -> u64 {
        self.presses_attempted.load(Ordering::Relaxed)
    }

    pub fn status(&self) -> MachineStatus {
        self.outcome
            .get()
            .map_or(MachineStatus::InProgress, SolveOutcome::status)
    }

    pub fn outcome(&self) -> Option<&SolveOutcome> {
        self.outcome.get()
    }

    /// Records the final outcome. Only the first call succeeds.
    pub fn finish(&self, outcome: SolveOutcome) -> Result<(), MachineError> {
        self.outcome
            .set(outcome)
            .map_err(|_| MachineError::AlreadyFinished {
                machine: self.index,
            })
    }
}

fn build_button(
    index: usize,
    counters: Vec<usize>,
    target: &[u32],
) -> Result<Button, MachineError> {
    let mut counters: CounterSet = counters.into_iter().collect();
    counters.sort_unstable();
    counters.dedup();

    if counters.is_empty() {
        return Err(MachineError::EmptyButton { button: index });
    }

    let mut max_presses = 0;
    for &counter in &counters {
        let wanted = target
            .get(counter)
            .copied()
            .ok_or(MachineError::CounterOutOfRange {
                button: index,
                counter,
                counters: target.len(),
            })?;
        max_presses = max_presses.max(wanted);
    }

    Ok(Button {
        index,
        counters,
        max_presses,
    })
}

#[cfg(test)]
mod tests;
