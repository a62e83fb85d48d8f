//! Frame rendering.

use std::io;

use pressforge_config::ProgressConfig;
use pressforge_core::MachineStatus;
use tracing::info;

use super::snapshot::{MachineProgress, ProgressSnapshot};
use crate::batch::BatchReport;

/// Draws progress frames.
///
/// Called from the monitor thread only. Errors are logged by the monitor and
/// never reach the workers.
pub trait FrameRenderer {
    fn render_frame(&mut self, snapshot: &ProgressSnapshot) -> io::Result<()>;

    /// Called once after the batch finished.
    fn render_summary(&mut self, _report: &BatchReport) -> io::Result<()> {
        Ok(())
    }
}

/// Fixed-column text grid, filled column-major.
///
/// Each cell reads `M<index>` followed by `OK`, `FAIL`, or a bar of `#`
/// scaled against the snapshot's largest presses-attempted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    columns: usize,
    width: usize,
}

impl GridLayout {
    pub fn new(columns: usize, width: usize) -> Self {
        Self {
            columns: columns.max(1),
            width,
        }
    }

    pub fn from_config(config: &ProgressConfig) -> Self {
        Self::new(config.columns, config.width)
    }

    pub fn column_width(&self) -> usize {
        self.width / self.columns
    }

    /// Rows needed for `machines` cells.
    pub fn rows(&self, machines: usize) -> usize {
        machines.div_ceil(self.columns)
    }

    /// Grid rows for `snapshot`, each cell padded to the column width.
    pub fn lines(&self, snapshot: &ProgressSnapshot) -> Vec<String> {
        let max = snapshot.max_presses();
        let count = snapshot.machines.len();
        let rows = self.rows(count);

        (0..rows)
            .map(|row| {
                let mut line = String::with_capacity(self.width);
                for col in 0..self.columns {
                    let idx = col * rows + row;
                    if let Some(machine) = snapshot.machines.get(idx) {
                        line.push_str(&self.cell(machine, max));
                    }
                }
                line
            })
            .collect()
    }

    /// One padded grid cell.
    pub fn cell(&self, machine: &MachineProgress, max_presses: u64) -> String {
        let col_width = self.column_width();
        let mut cell = format!("M{:<3} ", machine.index);

        match machine.status {
            MachineStatus::Success => cell.push_str("OK"),
            MachineStatus::Failed => cell.push_str("FAIL"),
            MachineStatus::InProgress => {
                let bar_width = col_width.saturating_sub(cell.len() + 2) as u64;
                let hashes = (machine.presses_attempted.saturating_mul(bar_width)
                    / max_presses.max(1))
                .min(bar_width);
                cell.extend(std::iter::repeat('#').take(hashes as usize));
            }
        }

        if cell.len() < col_width {
            cell.push_str(&" ".repeat(col_width - cell.len()));
        }
        cell
    }
}

/// `Total: N | In Progress: a | Success: b | Failed: c`
pub fn summary_line(snapshot: &ProgressSnapshot) -> String {
    let counts = snapshot.counts();
    format!(
        "Total: {} | In Progress: {} | Success: {} | Failed: {}",
        counts.total(),
        counts.in_progress,
        counts.succeeded,
        counts.failed
    )
}

/// Emits one `progress` event per frame.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl FrameRenderer for LogRenderer {
    fn render_frame(&mut self, snapshot: &ProgressSnapshot) -> io::Result<()> {
        let counts = snapshot.counts();
        info!(
            event = "progress",
            total = counts.total(),
            in_progress = counts.in_progress,
            succeeded = counts.succeeded,
            failed = counts.failed,
            max_presses = snapshot.max_presses(),
            elapsed_ms = snapshot.elapsed.as_millis() as u64,
        );
        Ok(())
    }
}

/// Draws nothing.
#[derive(Debug, Default)]
pub struct NoopRenderer;

impl FrameRenderer for NoopRenderer {
    fn render_frame(&mut self, _snapshot: &ProgressSnapshot) -> io::Result<()> {
        Ok(())
    }
}
