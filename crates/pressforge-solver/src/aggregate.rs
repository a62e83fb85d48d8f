//! Batch-wide result totals.

use std::sync::Mutex;

use pressforge_core::SolveOutcome;

/// Snapshot of the aggregated totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateTotals {
    /// Sum of minimal presses over solved machines.
    pub sum: u64,
    pub succeeded: usize,
    pub failed: usize,
}

impl AggregateTotals {
    /// Machines recorded so far.
    pub fn recorded(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Totals shared by every worker of a batch.
///
/// All three fields change together under one lock, so a reader never sees
/// a sum without its matching success count. A lock poisoned by a panicking
/// worker is recovered: each update is a single assignment and leaves the
/// totals consistent.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    totals: Mutex<AggregateTotals>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one machine's outcome.
    pub fn record(&self, outcome: &SolveOutcome) {
        match outcome {
            SolveOutcome::Solved(solution) => self.record_success(solution.total_presses),
            SolveOutcome::Unsolvable => self.record_failure(),
        }
    }

    pub fn record_success(&self, presses: u64) {
        let mut totals = self.totals.lock().unwrap_or_else(|e| e.into_inner());
        totals.sum += presses;
        totals.succeeded += 1;
    }

    pub fn record_failure(&self) {
        let mut totals = self.totals.lock().unwrap_or_else(|e| e.into_inner());
        totals.failed += 1;
    }

    pub fn totals(&self) -> AggregateTotals {
        *self.totals.lock().unwrap_or_else(|e| e.into_inner())
    }
}
