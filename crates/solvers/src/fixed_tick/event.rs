use super::Snapshot;

/// Event emitted by the fixed-tick solver for each snapshot.
///
/// Tick 0 is the initial state before any integration.
/// Ticks 1..N are emitted after each integration tick.
#[derive(Debug, Clone)]
pub struct Event<S, C, D> {
    /// The tick number (0 for initial, 1..N for integration ticks).
    pub tick: usize,

    /// Snapshot of the run at this tick.
    pub snapshot: Snapshot<S, C, D>,
}
