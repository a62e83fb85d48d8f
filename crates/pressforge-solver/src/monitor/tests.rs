//! Tests for the progress monitor.

use std::io;
use std::thread;

use crossbeam::channel::bounded;
use pressforge_core::{MachineStatus, Solution, SolveOutcome};
use pressforge_test::scenario_batch;

use super::*;

fn progress(index: usize, status: MachineStatus, presses_attempted: u64) -> MachineProgress {
    MachineProgress {
        index,
        status,
        presses_attempted,
    }
}

fn snapshot(machines: Vec<MachineProgress>) -> ProgressSnapshot {
    ProgressSnapshot {
        machines,
        elapsed: Duration::ZERO,
    }
}

#[derive(Default)]
struct Recording {
    frames: Vec<ProgressSnapshot>,
}

impl FrameRenderer for Recording {
    fn render_frame(&mut self, snapshot: &ProgressSnapshot) -> io::Result<()> {
        self.frames.push(snapshot.clone());
        Ok(())
    }
}

struct Failing {
    calls: usize,
}

impl FrameRenderer for Failing {
    fn render_frame(&mut self, _snapshot: &ProgressSnapshot) -> io::Result<()> {
        self.calls += 1;
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
    }
}

#[test]
fn test_capture_reads_status_and_telemetry() {
    let machines = scenario_batch();
    machines[0].record_presses(4);
    machines[0]
        .finish(SolveOutcome::Solved(Solution::from_presses(vec![1])))
        .unwrap();
    machines[1].finish(SolveOutcome::Unsolvable).unwrap();
    machines[2].record_presses(9);

    let snap = ProgressSnapshot::capture(&machines, Duration::from_millis(3));

    assert_eq!(snap.machines[0], progress(0, MachineStatus::Success, 4));
    assert_eq!(snap.machines[1], progress(1, MachineStatus::Failed, 0));
    assert_eq!(snap.machines[2], progress(2, MachineStatus::InProgress, 9));
    assert_eq!(snap.max_presses(), 9);
    assert_eq!(
        snap.counts(),
        StatusCounts {
            in_progress: 1,
            succeeded: 1,
            failed: 1
        }
    );
}

#[test]
fn test_max_presses_at_least_one() {
    assert_eq!(snapshot(vec![]).max_presses(), 1);
    assert_eq!(
        snapshot(vec![progress(0, MachineStatus::InProgress, 0)]).max_presses(),
        1
    );
}

#[test]
fn test_grid_is_column_major() {
    let snap = snapshot(
        (0..7)
            .map(|i| progress(i, MachineStatus::Success, 0))
            .collect(),
    );
    let layout = GridLayout::new(3, 60);
    let lines = layout.lines(&snap);

    assert_eq!(lines.len(), 3);
    let labels = |line: &str| -> Vec<String> {
        line.split_whitespace()
            .filter(|t| t.starts_with('M'))
            .map(str::to_string)
            .collect()
    };
    assert_eq!(labels(&lines[0]), vec!["M0", "M3", "M6"]);
    assert_eq!(labels(&lines[1]), vec!["M1", "M4"]);
    assert_eq!(labels(&lines[2]), vec!["M2", "M5"]);
    assert_eq!(lines[0].len(), 60);
}

#[test]
fn test_cells() {
    let layout = GridLayout::new(3, 60);
    assert_eq!(layout.column_width(), 20);

    let ok = layout.cell(&progress(12, MachineStatus::Success, 50), 100);
    assert_eq!(ok, format!("{:<20}", "M12  OK"));

    let fail = layout.cell(&progress(3, MachineStatus::Failed, 50), 100);
    assert_eq!(fail, format!("{:<20}", "M3   FAIL"));

    // Bar width is 20 - "M7   ".len() - 2 = 13.
    let full = layout.cell(&progress(7, MachineStatus::InProgress, 100), 100);
    assert_eq!(full, format!("{:<20}", format!("M7   {}", "#".repeat(13))));

    let half = layout.cell(&progress(7, MachineStatus::InProgress, 50), 100);
    assert_eq!(half, format!("{:<20}", format!("M7   {}", "#".repeat(6))));

    let empty = layout.cell(&progress(7, MachineStatus::InProgress, 0), 100);
    assert_eq!(empty.trim_end(), "M7");
}

#[test]
fn test_narrow_columns_do_not_underflow() {
    let layout = GridLayout::new(4, 8);
    let cell = layout.cell(&progress(1, MachineStatus::InProgress, 10), 10);
    assert_eq!(cell, "M1   ");
}

#[test]
fn test_summary_line() {
    let snap = snapshot(vec![
        progress(0, MachineStatus::InProgress, 1),
        progress(1, MachineStatus::Success, 1),
        progress(2, MachineStatus::Success, 1),
        progress(3, MachineStatus::Failed, 1),
    ]);
    assert_eq!(
        summary_line(&snap),
        "Total: 4 | In Progress: 1 | Success: 2 | Failed: 1"
    );
}

#[test]
fn test_run_renders_until_stopped() {
    let machines = scenario_batch();
    let monitor = ProgressMonitor::new(Duration::from_millis(5));
    let (stop_tx, stop_rx) = bounded(1);
    let mut recording = Recording::default();

    let frames = thread::scope(|s| {
        let handle = s.spawn(|| monitor.run(&machines, &mut recording, &stop_rx));
        machines[2].record_presses(3);
        thread::sleep(Duration::from_millis(60));
        stop_tx.send(()).unwrap();
        handle.join().unwrap()
    });

    assert!(frames >= 1);
    assert_eq!(frames, recording.frames.len());
    assert!(recording.frames.iter().all(|f| f.machines.len() == 3));
}

#[test]
fn test_run_exits_immediately_on_stop() {
    let machines = scenario_batch();
    let monitor = ProgressMonitor::new(Duration::from_secs(3600));
    let (stop_tx, stop_rx) = bounded(1);
    stop_tx.send(()).unwrap();

    let frames = monitor.run(&machines, &mut NoopRenderer, &stop_rx);
    assert_eq!(frames, 0);
}

#[test]
fn test_run_exits_on_disconnect() {
    let machines = scenario_batch();
    let monitor = ProgressMonitor::new(Duration::from_secs(3600));
    let (stop_tx, stop_rx) = bounded::<()>(1);
    drop(stop_tx);

    assert_eq!(monitor.run(&machines, &mut LogRenderer, &stop_rx), 0);
}

#[test]
fn test_renderer_errors_do_not_stop_monitor() {
    let machines = scenario_batch();
    let monitor = ProgressMonitor::new(Duration::from_millis(2));
    let (stop_tx, stop_rx) = bounded(1);
    let mut failing = Failing { calls: 0 };

    thread::scope(|s| {
        let handle = s.spawn(|| monitor.run(&machines, &mut failing, &stop_rx));
        thread::sleep(Duration::from_millis(40));
        stop_tx.send(()).unwrap();
        handle.join().unwrap();
    });

    assert!(failing.calls >= 2);
}
