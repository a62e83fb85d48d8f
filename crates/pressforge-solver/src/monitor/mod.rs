//! Live progress display.
//!
//! The monitor runs on its own thread for the lifetime of a batch. On every
//! tick it captures a [`ProgressSnapshot`] straight from the machines'
//! telemetry and hands it to a [`FrameRenderer`]. It exits when the stop
//! channel fires or disconnects.

mod render;
mod snapshot;

pub use render::{summary_line, FrameRenderer, GridLayout, LogRenderer, NoopRenderer};
pub use snapshot::{MachineProgress, ProgressSnapshot, StatusCounts};

use std::time::{Duration, Instant};

use crossbeam::channel::{select, tick, Receiver};
use pressforge_core::Machine;
use tracing::warn;

/// Periodic progress poller.
#[derive(Debug, Clone, Copy)]
pub struct ProgressMonitor {
    interval: Duration,
}

impl ProgressMonitor {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Renders a frame every interval until `stop` receives or disconnects.
    ///
    /// Returns the number of frames drawn. Renderer errors are logged and
    /// the loop keeps going.
    pub fn run(
        &self,
        machines: &[Machine],
        renderer: &mut dyn FrameRenderer,
        stop: &Receiver<()>,
    ) -> usize {
        let started = Instant::now();
        let ticker = tick(self.interval);
        let mut frames = 0;

        loop {
            select! {
                recv(stop) -> _ => return frames,
                recv(ticker) -> _ => {
                    let snapshot = ProgressSnapshot::capture(machines, started.elapsed());
                    if let Err(err) = renderer.render_frame(&snapshot) {
                        warn!(event = "render_error", error = %err);
                    }
                    frames += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
