//! Search statistics.
//!
//! Plain counters owned by a single search; never shared across threads.

use std::time::{Duration, Instant};

/// Why a branch was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PruneReason {
    /// A counter went above its target.
    Overshoot,
    /// Every counter hit its target; further presses can only overshoot.
    ExactMatch,
    /// The running total already reached the best total found so far.
    Incumbent,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Overshoot => write!(f, "Overshoot"),
            PruneReason::ExactMatch => write!(f, "ExactMatch"),
            PruneReason::Incumbent => write!(f, "Incumbent"),
        }
    }
}

/// Counters for one machine's search.
///
/// # Example
///
/// ```
/// use pressforge_solver::stats::{PruneReason, SearchStats};
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_node();
/// stats.record_press();
/// stats.record_press();
/// stats.record_prune(PruneReason::Overshoot);
///
/// assert_eq!(stats.nodes_expanded, 1);
/// assert_eq!(stats.presses_applied, 2);
/// assert_eq!(stats.overshoot_prunes, 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    start_time: Option<Instant>,
    finish_time: Option<Instant>,
    /// Recursive expansions (one per button level entered).
    pub nodes_expanded: u64,
    /// Single presses applied to a search state.
    pub presses_applied: u64,
    /// Branches abandoned because a counter exceeded its target.
    pub overshoot_prunes: u64,
    /// Branches abandoned at an exact match.
    pub exact_matches: u64,
    /// Branches abandoned against the incumbent total.
    pub incumbent_prunes: u64,
    /// Exact matches that improved the best total.
    pub improvements: u64,
}

impl SearchStats {
    /// Marks the start of the search.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.finish_time = None;
    }

    /// Marks the end of the search; freezes [`elapsed`](Self::elapsed).
    pub fn finish(&mut self) {
        self.finish_time = Some(Instant::now());
    }

    /// Time spent searching. Keeps counting until [`finish`](Self::finish).
    pub fn elapsed(&self) -> Duration {
        match (self.start_time, self.finish_time) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    pub fn record_node(&mut self) {
        self.nodes_expanded += 1;
    }

    pub fn record_press(&mut self) {
        self.presses_applied += 1;
    }

    /// Records an abandoned branch.
    pub fn record_prune(&mut self, reason: PruneReason) {
        match reason {
            PruneReason::Overshoot => self.overshoot_prunes += 1,
            PruneReason::ExactMatch => self.exact_matches += 1,
            PruneReason::Incumbent => self.incumbent_prunes += 1,
        }
    }

    pub fn record_improvement(&mut self) {
        self.improvements += 1;
    }

    /// Returns the presses per second rate.
    pub fn presses_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.presses_applied as f64 / secs) as u64
        } else {
            0
        }
    }
}
