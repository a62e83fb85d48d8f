//! PressForge - Minimal Button Press Solver in Rust
//!
//! Each machine line lists buttons, the counters each button increments, and
//! the counter values to reach. PressForge finds the fewest presses per
//! machine, solving machines in parallel, and sums the minima.
//!
//! # Example
//!
//! ```rust
//! use pressforge::prelude::*;
//!
//! let report = solve_lines(["(0) {1}", "(0,1) {1,0}", "(0) (1) {2,3}"]).unwrap();
//! assert_eq!(report.sum, 6);
//! assert_eq!(report.succeeded, 2);
//! assert_eq!(report.failed, 1);
//! ```

pub use pressforge_config::{BatchConfig, ConfigError, RendererKind, WorkerCount};
pub use pressforge_core::{
    parse_batch, parse_machine, Machine, MachineStatus, ParseError, PressForgeError, Result,
    Solution, SolveOutcome,
};
pub use pressforge_solver::{
    BatchReport, BatchSolver, ButtonSearch, FrameRenderer, MachineReport, ProgressSnapshot,
    SearchResult,
};

mod solver;
pub use solver::{load_config, solve_lines, solve_machines, solve_text};

pub mod prelude {
    pub use super::{solve_lines, solve_machines, solve_text};
    pub use super::{BatchConfig, BatchReport, Machine, MachineStatus, PressForgeError};
}
