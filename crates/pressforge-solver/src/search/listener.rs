//! Hooks into a running search.

use pressforge_core::Solution;

use super::SearchState;
use crate::stats::PruneReason;

/// Observer of search events.
///
/// Called synchronously from the search's own thread. All methods default
/// to doing nothing, so [`NoOpListener`] compiles away.
pub trait SearchListener {
    /// A button level is entered with `state`.
    fn on_expand(&mut self, _button: usize, _state: &SearchState) {}

    /// `button` was pressed once; `state` is the result.
    fn on_press(&mut self, _button: usize, _state: &SearchState) {}

    /// The branch at `button` is abandoned.
    fn on_prune(&mut self, _button: usize, _reason: PruneReason, _state: &SearchState) {}

    /// An exact assignment was reached.
    fn on_solution(&mut self, _solution: &Solution, _improved: bool) {}
}

/// Listener that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpListener;

impl SearchListener for NoOpListener {}

impl<L: SearchListener + ?Sized> SearchListener for &mut L {
    fn on_expand(&mut self, button: usize, state: &SearchState) {
        (**self).on_expand(button, state);
    }

    fn on_press(&mut self, button: usize, state: &SearchState) {
        (**self).on_press(button, state);
    }

    fn on_prune(&mut self, button: usize, reason: PruneReason, state: &SearchState) {
        (**self).on_prune(button, reason, state);
    }

    fn on_solution(&mut self, solution: &Solution, improved: bool) {
        (**self).on_solution(solution, improved);
    }
}
