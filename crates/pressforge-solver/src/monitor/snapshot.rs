//! Point-in-time view of a running batch.

use std::time::Duration;

use pressforge_core::{Machine, MachineStatus};

/// One machine's progress as read by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineProgress {
    pub index: usize,
    pub status: MachineStatus,
    pub presses_attempted: u64,
}

/// Machines per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub in_progress: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.in_progress + self.succeeded + self.failed
    }
}

/// Telemetry and status of every machine, captured without any lock.
///
/// Values may be stale by the time they are drawn; they only ever grow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub machines: Vec<MachineProgress>,
    /// Time since the monitor started.
    pub elapsed: Duration,
}

impl ProgressSnapshot {
    pub fn capture(machines: &[Machine], elapsed: Duration) -> Self {
        Self {
            machines: machines
                .iter()
                .map(|m| MachineProgress {
                    index: m.index(),
                    status: m.status(),
                    presses_attempted: m.presses_attempted(),
                })
                .collect(),
            elapsed,
        }
    }

    /// Largest presses-attempted value in the snapshot, at least 1.
    pub fn max_presses(&self) -> u64 {
        self.machines
            .iter()
            .map(|m| m.presses_attempted)
            .max()
            .unwrap_or(0)
            .max(1)
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for machine in &self.machines {
            match machine.status {
                MachineStatus::InProgress => counts.in_progress += 1,
                MachineStatus::Success => counts.succeeded += 1,
                MachineStatus::Failed => counts.failed += 1,
            }
        }
        counts
    }
}
