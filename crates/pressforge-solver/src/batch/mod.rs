//! Concurrent batch orchestration.
//!
//! [`BatchSolver`] runs one search per machine on a rayon pool sized by
//! [`WorkerCount`](pressforge_config::WorkerCount), while a
//! [`ProgressMonitor`] thread draws frames. Every worker writes only its own
//! machine's outcome and telemetry; the batch totals live behind the
//! [`ResultAggregator`] lock. The totals are read only after every worker has
//! finished, and only then is the monitor told to stop.
//!
//! # Example
//!
//! ```
//! use pressforge_config::{BatchConfig, RendererKind};
//! use pressforge_core::parse_batch;
//! use pressforge_solver::BatchSolver;
//!
//! let machines = parse_batch("(0) {1}\n(0,1) {1,0}\n(0) (1) {2,3}").unwrap();
//! let config = BatchConfig::new().with_renderer(RendererKind::None);
//! let report = BatchSolver::new(config).solve(&machines).unwrap();
//!
//! assert_eq!(report.sum, 6);
//! assert_eq!(report.succeeded, 2);
//! assert_eq!(report.failed, 1);
//! ```

mod report;

pub use report::{BatchReport, MachineReport};

use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use crossbeam::channel::bounded;
use pressforge_config::{BatchConfig, RendererKind, SearchConfig};
use pressforge_core::{Machine, MachineError, MachineStatus, PressForgeError, Result, SolveOutcome};
use rayon::ThreadPoolBuilder;
use tracing::{debug, info, warn};

use crate::aggregate::ResultAggregator;
use crate::monitor::{FrameRenderer, LogRenderer, NoopRenderer, ProgressMonitor};
use crate::search::{ButtonSearch, NoOpListener, SearchListener};

/// Solves batches of machines.
pub struct BatchSolver {
    config: BatchConfig,
    renderer: Box<dyn FrameRenderer + Send>,
}

impl BatchSolver {
    /// Creates a solver with the renderer named by the config.
    ///
    /// The terminal renderer lives in the console crate; until one is set
    /// with [`with_renderer`](Self::with_renderer), `Terminal` draws frames
    /// as log events.
    pub fn new(config: BatchConfig) -> Self {
        let renderer: Box<dyn FrameRenderer + Send> = match config.progress.renderer {
            RendererKind::Terminal | RendererKind::Log => Box::new(LogRenderer),
            RendererKind::None => Box::new(NoopRenderer),
        };
        Self { config, renderer }
    }

    pub fn with_renderer(mut self, renderer: impl FrameRenderer + Send + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Solves every machine and returns the batch totals.
    ///
    /// # Errors
    ///
    /// Fails without searching if any machine already has an outcome, or if
    /// the worker pool cannot be built.
    pub fn solve(&mut self, machines: &[Machine]) -> Result<BatchReport> {
        self.solve_with_listeners(machines, |_| NoOpListener)
    }

    /// Like [`solve`](Self::solve), with a listener per machine created on
    /// that machine's worker.
    pub fn solve_with_listeners<F, L>(
        &mut self,
        machines: &[Machine],
        make_listener: F,
    ) -> Result<BatchReport>
    where
        F: Fn(&Machine) -> L + Sync,
        L: SearchListener,
    {
        if let Some(done) = machines.iter().find(|m| m.status() != MachineStatus::InProgress) {
            return Err(PressForgeError::InvalidState(format!(
                "machine {} already finished with status {}",
                done.index(),
                done.status()
            )));
        }

        let started = Instant::now();
        let workers = self.config.workers.count.resolve(machines.len());
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("pressforge-worker-{}", i))
            .build()
            .map_err(|e| PressForgeError::WorkerPool(e.to_string()))?;

        info!(
            event = "batch_start",
            machines = machines.len(),
            workers = workers,
            worker_count = %self.config.workers.count,
        );

        let aggregator = ResultAggregator::new();
        let errors: Mutex<Vec<MachineError>> = Mutex::new(Vec::new());
        let search_config = &self.config.search;
        let monitor = self
            .config
            .progress
            .enabled
            .then(|| ProgressMonitor::new(self.config.progress.refresh_interval()));
        let renderer = &mut self.renderer;

        thread::scope(|s| {
            let (stop_tx, stop_rx) = bounded::<()>(1);
            let monitor_handle = monitor.map(|monitor| {
                thread::Builder::new()
                    .name("pressforge-monitor".to_string())
                    .spawn_scoped(s, move || monitor.run(machines, &mut **renderer, &stop_rx))
            });

            pool.scope(|pool_scope| {
                for machine in machines {
                    let aggregator = &aggregator;
                    let errors = &errors;
                    let make_listener = &make_listener;
                    pool_scope.spawn(move |_| {
                        let listener = make_listener(machine);
                        if let Err(err) = run_worker(machine, search_config, listener, aggregator) {
                            errors.lock().unwrap_or_else(|e| e.into_inner()).push(err);
                        }
                    });
                }
            });

            // Every worker has finished; the monitor may stop.
            let _ = stop_tx.send(());
            match monitor_handle {
                Some(Ok(handle)) => match handle.join() {
                    Ok(frames) => debug!(event = "monitor_stopped", frames = frames),
                    Err(_) => warn!(event = "monitor_panicked"),
                },
                Some(Err(err)) => warn!(event = "monitor_spawn_failed", error = %err),
                None => {}
            }
        });

        let report = BatchReport::new(aggregator.totals(), machines, workers, started.elapsed());

        if let Err(err) = self.renderer.render_summary(&report) {
            warn!(event = "render_error", error = %err);
        }

        info!(
            event = "batch_end",
            sum = report.sum,
            succeeded = report.succeeded,
            failed = report.failed,
            presses_attempted = report.total_presses_attempted,
            duration_ms = report.elapsed_ms(),
        );

        match errors.into_inner().unwrap_or_else(|e| e.into_inner()).into_iter().next() {
            Some(err) => Err(err.into()),
            None => Ok(report),
        }
    }
}

fn run_worker<L: SearchListener>(
    machine: &Machine,
    config: &SearchConfig,
    listener: L,
    aggregator: &ResultAggregator,
) -> std::result::Result<(), MachineError> {
    let result = ButtonSearch::new(machine)
        .with_config(config.clone())
        .with_listener(listener)
        .solve();
    let duration_ms = result.stats.elapsed_ms();
    let outcome = result.into_outcome();

    machine.finish(outcome.clone())?;
    aggregator.record(&outcome);

    match outcome {
        SolveOutcome::Solved(solution) => info!(
            event = "machine_solved",
            machine = machine.index(),
            presses = solution.total_presses,
            presses_attempted = machine.presses_attempted(),
            duration_ms = duration_ms,
        ),
        SolveOutcome::Unsolvable => info!(
            event = "machine_failed",
            machine = machine.index(),
            presses_attempted = machine.presses_attempted(),
            duration_ms = duration_ms,
        ),
    }
    Ok(())
}
