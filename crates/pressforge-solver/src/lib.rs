//! PressForge Solver Engine
//!
//! This crate provides:
//! - Branch-and-bound search for one machine, with listener hooks
//! - Search statistics
//! - The lock-protected batch result aggregator
//! - Concurrent batch orchestration on a capped worker pool
//! - The live progress monitor and its frame renderers

pub mod aggregate;
pub mod batch;
pub mod monitor;
pub mod search;
pub mod stats;

pub use aggregate::{AggregateTotals, ResultAggregator};
pub use batch::{BatchReport, BatchSolver, MachineReport};
pub use monitor::{
    summary_line, FrameRenderer, GridLayout, LogRenderer, MachineProgress, NoopRenderer,
    ProgressMonitor, ProgressSnapshot, StatusCounts,
};
pub use search::{solve, ButtonSearch, NoOpListener, SearchListener, SearchResult, SearchState};
pub use stats::{PruneReason, SearchStats};
