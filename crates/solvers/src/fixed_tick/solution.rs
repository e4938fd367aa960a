use super::Snapshot;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Ran the full tick budget.
    Complete,

    /// Stopped early due to an observer action.
    ///
    /// For [`run_until`](super::run_until) this means the target was reached.
    StoppedByObserver,
}

/// The result of a fixed-tick run.
#[derive(Debug, Clone)]
pub struct Solution<S, C, D> {
    /// How the solver terminated.
    pub status: Status,

    /// History of snapshots from each tick (including the initial state).
    pub history: Vec<Snapshot<S, C, D>>,

    /// Number of ticks completed.
    pub ticks: usize,
}

impl<S, C, D> Solution<S, C, D> {
    /// Returns the last snapshot of the run.
    ///
    /// The history always holds at least the initial snapshot, so this is
    /// `None` only for a hand-built solution with an empty history.
    #[must_use]
    pub fn last(&self) -> Option<&Snapshot<S, C, D>> {
        self.history.last()
    }

    /// Returns the final state of the run.
    #[must_use]
    pub fn final_state(&self) -> Option<&S> {
        self.last().map(|snapshot| &snapshot.state)
    }
}
