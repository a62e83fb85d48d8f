//! Final batch summary.

use std::time::Duration;

use pressforge_core::{Machine, MachineStatus};

use crate::aggregate::AggregateTotals;

/// One machine's final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineReport {
    pub index: usize,
    pub status: MachineStatus,
    /// Minimal total presses, if solved.
    pub min_presses: Option<u64>,
    pub presses_attempted: u64,
}

impl MachineReport {
    pub fn from_machine(machine: &Machine) -> Self {
        Self {
            index: machine.index(),
            status: machine.status(),
            min_presses: machine.outcome().and_then(|o| o.total_presses()),
            presses_attempted: machine.presses_attempted(),
        }
    }
}

/// Result of solving a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Sum of minimal presses over solved machines.
    pub sum: u64,
    pub succeeded: usize,
    pub failed: usize,
    /// Per-machine reports, in batch order.
    pub machines: Vec<MachineReport>,
    pub total_presses_attempted: u64,
    pub workers: usize,
    pub elapsed: Duration,
}

impl BatchReport {
    pub(crate) fn new(
        totals: AggregateTotals,
        machines: &[Machine],
        workers: usize,
        elapsed: Duration,
    ) -> Self {
        let machines: Vec<MachineReport> = machines.iter().map(MachineReport::from_machine).collect();
        let total_presses_attempted = machines.iter().map(|m| m.presses_attempted).sum();
        Self {
            sum: totals.sum,
            succeeded: totals.succeeded,
            failed: totals.failed,
            machines,
            total_presses_attempted,
            workers,
            elapsed,
        }
    }

    pub fn totals(&self) -> AggregateTotals {
        AggregateTotals {
            sum: self.sum,
            succeeded: self.succeeded,
            failed: self.failed,
        }
    }

    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}
