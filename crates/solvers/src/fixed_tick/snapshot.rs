use uom::si::f64::Time;

/// The state of a run after a given tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<S, C, D> {
    /// Ticks completed (0 for the initial state).
    pub tick: usize,

    /// Simulated time since the start of the run.
    pub elapsed: Time,

    pub state: S,

    /// Control held during the tick that produced `state`.
    ///
    /// `None` for the initial snapshot.
    pub control: Option<C>,

    /// Diagnostics from the tick that produced `state`.
    ///
    /// `None` for the initial snapshot.
    pub diagnostics: Option<D>,
}
