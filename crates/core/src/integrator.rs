use crate::TimeStep;

/// A fixed-timestep state update.
///
/// An integrator owns its parameters and maps the state at the start of a
/// tick, the control inputs held during the tick, and the tick duration to the
/// state at the end of the tick:
///
/// ```text
/// (state, parameters, control, dt) -> state'
/// ```
///
/// Implementations must be pure with respect to their inputs.
/// They must not read clocks, poll input devices, or keep hidden state between
/// calls, so any driver (a frame loop, a test harness, a solver) can replay a
/// run exactly by feeding the same sequence of inputs.
pub trait TickIntegrator {
    /// State carried from one tick to the next.
    type State;

    /// Control inputs held constant for the duration of a tick.
    type Control;

    /// Observational values computed during a tick.
    ///
    /// Diagnostics never feed back into the dynamics.
    type Diagnostics;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Advances `state` by one tick of length `dt`.
    ///
    /// A zero-length tick must return the state unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the tick cannot be evaluated.
    fn tick(
        &self,
        state: &Self::State,
        control: &Self::Control,
        dt: TimeStep,
    ) -> Result<Tick<Self::State, Self::Diagnostics>, Self::Error>;
}

/// The outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick<S, D> {
    /// State at the end of the tick.
    pub state: S,

    /// Observational values computed during the tick.
    pub diagnostics: D,
}

/// Type alias for the [`Tick`] produced by an integrator.
pub type TickOf<I> =
    Tick<<I as TickIntegrator>::State, <I as TickIntegrator>::Diagnostics>;
