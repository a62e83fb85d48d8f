//! In-place terminal progress grid.

use std::io::{self, Write};

use owo_colors::OwoColorize;
use pressforge_config::ProgressConfig;
use pressforge_solver::{
    summary_line, BatchReport, FrameRenderer, GridLayout, MachineProgress, ProgressSnapshot,
};

/// Clear screen, cursor home.
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Redraws the progress grid on every frame.
pub struct TerminalRenderer<W = io::Stdout> {
    out: W,
    layout: GridLayout,
}

impl TerminalRenderer {
    /// Renderer on stdout with the configured grid.
    pub fn stdout(config: &ProgressConfig) -> Self {
        Self::new(io::stdout(), GridLayout::from_config(config))
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, layout: GridLayout) -> Self {
        Self { out, layout }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, snapshot: &ProgressSnapshot) -> io::Result<()> {
        let mut frame = String::from(CLEAR);
        for line in self.layout.lines(snapshot) {
            frame.push_str(&line);
            frame.push('\n');
        }
        frame.push('\n');
        frame.push_str(&summary_line(snapshot).bold().to_string());
        frame.push('\n');

        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> FrameRenderer for TerminalRenderer<W> {
    fn render_frame(&mut self, snapshot: &ProgressSnapshot) -> io::Result<()> {
        self.draw(snapshot)
    }

    /// Draws the finished grid once more, then the sum.
    fn render_summary(&mut self, report: &BatchReport) -> io::Result<()> {
        let snapshot = ProgressSnapshot {
            machines: report
                .machines
                .iter()
                .map(|m| MachineProgress {
                    index: m.index,
                    status: m.status,
                    presses_attempted: m.presses_attempted,
                })
                .collect(),
            elapsed: report.elapsed,
        };
        self.draw(&snapshot)?;
        writeln!(
            self.out,
            "{} {}",
            "Sum:".bright_white().bold(),
            report.sum.bright_green().bold()
        )?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressforge_core::MachineStatus;
    use std::time::Duration;

    fn snapshot() -> ProgressSnapshot {
        ProgressSnapshot {
            machines: vec![
                MachineProgress {
                    index: 0,
                    status: MachineStatus::Success,
                    presses_attempted: 10,
                },
                MachineProgress {
                    index: 1,
                    status: MachineStatus::InProgress,
                    presses_attempted: 20,
                },
                MachineProgress {
                    index: 2,
                    status: MachineStatus::Failed,
                    presses_attempted: 5,
                },
            ],
            elapsed: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_frame_clears_and_draws_grid() {
        let mut renderer = TerminalRenderer::new(Vec::new(), GridLayout::new(3, 60));
        renderer.render_frame(&snapshot()).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();

        assert!(out.starts_with(CLEAR));
        assert!(out.contains("M0   OK"));
        assert!(out.contains(&format!("M1   {}", "#".repeat(13))));
        assert!(out.contains("M2   FAIL"));
        assert!(out.contains("Total: 3 | In Progress: 1 | Success: 1 | Failed: 1"));
    }

    #[test]
    fn test_summary_draws_final_grid_and_sum() {
        let report = BatchReport {
            sum: 33,
            succeeded: 3,
            failed: 0,
            machines: Vec::new(),
            total_presses_attempted: 0,
            workers: 3,
            elapsed: Duration::ZERO,
        };
        let mut renderer = TerminalRenderer::new(Vec::new(), GridLayout::new(3, 60));
        renderer.render_summary(&report).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();

        assert!(out.contains("Total: 0"));
        assert!(out.contains("Sum:"));
        assert!(out.contains("33"));
    }
}
