//! Branch-and-bound search over one machine.
//!
//! Buttons are visited in fixed order. At button `b` the search tries every
//! press count from zero up to the button's `max_presses`: for each count it
//! first recurses into button `b + 1` with the counters as accumulated so far,
//! then applies one more press of `b` and classifies the result.
//!
//! - A counter above its target abandons the branch.
//! - All counters on target is a candidate: it is kept if it strictly
//!   improves the best total, then the branch is abandoned (every press
//!   advances some counter, so nothing deeper can match).
//! - Otherwise the search continues with one more press.
//!
//! Each recursive call owns its [`SearchState`]. The only side effects are
//! the machine's presses-attempted telemetry and whatever the
//! [`SearchListener`] does.
//!
//! # Example
//!
//! ```
//! use pressforge_core::parse_machine;
//! use pressforge_solver::search::ButtonSearch;
//!
//! let machine = parse_machine(0, "[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}").unwrap();
//! let result = ButtonSearch::new(&machine).solve();
//!
//! assert_eq!(result.min_presses(), Some(10));
//! assert_eq!(machine.accumulate(&result.best.unwrap().presses).unwrap(), vec![3, 5, 4, 7]);
//! ```

mod listener;
mod state;

pub use listener::{NoOpListener, SearchListener};
pub use state::SearchState;

use pressforge_config::SearchConfig;
use pressforge_core::{CounterMatch, Machine, Solution, SolveOutcome};
use tracing::debug;

use crate::stats::{PruneReason, SearchStats};

/// Result of searching one machine.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Minimal assignment, if any reaches the target.
    pub best: Option<Solution>,
    pub stats: SearchStats,
}

impl SearchResult {
    /// True if an exact assignment was found.
    pub fn found(&self) -> bool {
        self.best.is_some()
    }

    /// Minimal total presses, if found.
    pub fn min_presses(&self) -> Option<u64> {
        self.best.as_ref().map(|s| s.total_presses)
    }

    /// Converts into the outcome recorded on the machine.
    pub fn into_outcome(self) -> SolveOutcome {
        SolveOutcome::from(self.best)
    }
}

/// Exhaustive search for the minimal press assignment of one machine.
pub struct ButtonSearch<'m, L = NoOpListener> {
    machine: &'m Machine,
    config: SearchConfig,
    listener: L,
    best: Option<Solution>,
    stats: SearchStats,
}

impl<'m> ButtonSearch<'m> {
    pub fn new(machine: &'m Machine) -> Self {
        Self {
            machine,
            config: SearchConfig::default(),
            listener: NoOpListener,
            best: None,
            stats: SearchStats::default(),
        }
    }
}

impl<'m, L: SearchListener> ButtonSearch<'m, L> {
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the listener.
    pub fn with_listener<L2: SearchListener>(self, listener: L2) -> ButtonSearch<'m, L2> {
        ButtonSearch {
            machine: self.machine,
            config: self.config,
            listener,
            best: self.best,
            stats: self.stats,
        }
    }

    /// Runs the search to completion.
    pub fn solve(mut self) -> SearchResult {
        let machine = self.machine;
        self.stats.start();

        let root = SearchState::root(machine);
        match machine.classify(root.counters()) {
            CounterMatch::Exact => {
                self.offer(&root);
                self.prune(0, PruneReason::ExactMatch, &root);
            }
            CounterMatch::Below if machine.button_count() > 0 => self.expand(0, root),
            // No buttons to press. The all-zero root never overshoots.
            CounterMatch::Below | CounterMatch::Overshoot => {}
        }

        self.stats.finish();
        debug!(
            event = "search_end",
            machine = machine.index(),
            found = self.best.is_some(),
            nodes = self.stats.nodes_expanded,
            presses = self.stats.presses_applied,
            search_space = %machine.search_space(),
            presses_per_second = self.stats.presses_per_second(),
            elapsed_ms = self.stats.elapsed_ms(),
        );

        SearchResult {
            best: self.best,
            stats: self.stats,
        }
    }

    fn expand(&mut self, button_idx: usize, mut state: SearchState) {
        let machine = self.machine;
        let button = &machine.buttons()[button_idx];
        let last = button_idx + 1 == machine.button_count();
        let max = button.max_presses();

        self.stats.record_node();
        self.listener.on_expand(button_idx, &state);

        for presses in 0..=max {
            if presses == max {
                if !last {
                    self.expand(button_idx + 1, state);
                }
                return;
            }
            if !last {
                self.expand(button_idx + 1, state.clone());
            }

            state.press(button);
            machine.record_presses(1);
            self.stats.record_press();
            self.listener.on_press(button_idx, &state);

            match machine.classify(state.counters()) {
                CounterMatch::Overshoot => {
                    self.prune(button_idx, PruneReason::Overshoot, &state);
                    return;
                }
                CounterMatch::Exact => {
                    self.offer(&state);
                    self.prune(button_idx, PruneReason::ExactMatch, &state);
                    return;
                }
                CounterMatch::Below => {
                    if self.beaten(&state) {
                        self.prune(button_idx, PruneReason::Incumbent, &state);
                        return;
                    }
                }
            }
        }
    }

    /// Running total already at or above the incumbent; presses only add.
    fn beaten(&self, state: &SearchState) -> bool {
        self.config.prune_by_incumbent
            && self
                .best
                .as_ref()
                .is_some_and(|best| state.total_presses() >= best.total_presses)
    }

    fn offer(&mut self, state: &SearchState) {
        let improved = self
            .best
            .as_ref()
            .map_or(true, |best| state.total_presses() < best.total_presses);
        let solution = state.to_solution();
        self.listener.on_solution(&solution, improved);
        if improved {
            self.stats.record_improvement();
            self.best = Some(solution);
        }
    }

    fn prune(&mut self, button_idx: usize, reason: PruneReason, state: &SearchState) {
        self.stats.record_prune(reason);
        self.listener.on_prune(button_idx, reason, state);
    }
}

/// Solves `machine` with default options and no listener.
pub fn solve(machine: &Machine) -> SearchResult {
    ButtonSearch::new(machine).solve()
}
