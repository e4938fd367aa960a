//! Fixed-tick run loop for driveline integrators.
//!
//! This module drives a [`TickIntegrator`] forward at a constant `dt`,
//! asking a [`ControlSource`] for the control before every tick:
//!
//! ```text
//! control_n   = controls(n, state_n)
//! state_{n+1} = integrator.tick(state_n, control_n, dt)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use driveline_solvers::{Constant, fixed_tick};
//!
//! let solution = fixed_tick::run_until(&drivetrain, initial, Constant(control), dt, 10_000, |state| {
//!     state.wheel < target
//! })?;
//!
//! println!("reached target after {} ticks", solution.ticks);
//! ```

mod action;
mod error;
mod event;
mod snapshot;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use snapshot::Snapshot;
pub use solution::{Solution, Status};

use driveline_core::{Observer, TickIntegrator, TimeStep};
use tracing::{debug, info, trace};
use uom::si::{f64::Time, time::second};

use crate::ControlSource;

/// Solution type produced by running an integrator.
pub type SolutionOf<I> = Solution<
    <I as TickIntegrator>::State,
    <I as TickIntegrator>::Control,
    <I as TickIntegrator>::Diagnostics,
>;

/// Event type emitted while running an integrator.
pub type EventOf<I> = Event<
    <I as TickIntegrator>::State,
    <I as TickIntegrator>::Control,
    <I as TickIntegrator>::Diagnostics,
>;

/// Runs an integrator for up to `max_ticks` ticks of length `dt`.
///
/// # Algorithm
///
/// 1. Emit the initial snapshot (tick 0) to the observer.
/// 2. For each tick:
///    - Ask the control source for the control, given the current state.
///    - Advance the integrator by `dt`.
///    - Record a snapshot and emit an [`Event`] to the observer.
///    - If the observer returns `StopEarly`, terminate.
/// 3. Return the solution with the full history.
///
/// # Observer
///
/// The observer receives an [`Event`] for the initial state and after each
/// tick, and may return [`Action::StopEarly`] to end the run.
///
/// # Errors
///
/// Returns an error if the integrator fails on any tick.
pub fn solve<I, Src, Obs>(
    integrator: &I,
    initial: I::State,
    mut controls: Src,
    dt: TimeStep,
    max_ticks: usize,
    mut observer: Obs,
) -> Result<SolutionOf<I>, Error>
where
    I: TickIntegrator,
    I::State: Clone,
    I::Control: Clone,
    I::Diagnostics: Clone,
    Src: ControlSource<I::State, I::Control>,
    Obs: Observer<EventOf<I>, Action>,
{
    debug!(dt = dt.seconds(), max_ticks, "starting fixed-tick run");

    let initial_snapshot = Snapshot {
        tick: 0,
        elapsed: Time::new::<second>(0.0),
        state: initial,
        control: None,
        diagnostics: None,
    };

    let mut history = vec![initial_snapshot.clone()];

    let event = Event {
        tick: 0,
        snapshot: initial_snapshot,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        debug!(tick = 0, "observer stopped the run");
        return Ok(finish(Status::StoppedByObserver, history, 0));
    }

    let mut current = event.snapshot;

    for tick in 1..=max_ticks {
        let control = controls.control(tick - 1, &current.state);
        let next = integrator
            .tick(&current.state, &control, dt)
            .map_err(|err| Error::integrator(tick, err))?;

        let snapshot = Snapshot {
            tick,
            elapsed: current.elapsed + dt,
            state: next.state,
            control: Some(control),
            diagnostics: Some(next.diagnostics),
        };
        trace!(tick, elapsed = snapshot.elapsed.get::<second>(), "tick");

        history.push(snapshot.clone());

        let event = Event { tick, snapshot };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            debug!(tick, "observer stopped the run");
            return Ok(finish(Status::StoppedByObserver, history, tick));
        }

        current = event.snapshot;
    }

    Ok(finish(Status::Complete, history, max_ticks))
}

/// Runs an integrator without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error if the integrator fails on any tick.
pub fn solve_unobserved<I, Src>(
    integrator: &I,
    initial: I::State,
    controls: Src,
    dt: TimeStep,
    max_ticks: usize,
) -> Result<SolutionOf<I>, Error>
where
    I: TickIntegrator,
    I::State: Clone,
    I::Control: Clone,
    I::Diagnostics: Clone,
    Src: ControlSource<I::State, I::Control>,
{
    solve(integrator, initial, controls, dt, max_ticks, ())
}

/// Runs an integrator until `done` holds for the current state.
///
/// The initial state is checked too, so a run that starts at the target
/// completes zero ticks. The returned status is
/// [`Status::StoppedByObserver`] when the target was reached and
/// [`Status::Complete`] when the tick budget ran out first.
///
/// # Errors
///
/// Returns an error if the integrator fails on any tick.
pub fn run_until<I, Src, P>(
    integrator: &I,
    initial: I::State,
    controls: Src,
    dt: TimeStep,
    max_ticks: usize,
    mut done: P,
) -> Result<SolutionOf<I>, Error>
where
    I: TickIntegrator,
    I::State: Clone,
    I::Control: Clone,
    I::Diagnostics: Clone,
    Src: ControlSource<I::State, I::Control>,
    P: FnMut(&I::State) -> bool,
{
    solve(
        integrator,
        initial,
        controls,
        dt,
        max_ticks,
        |event: &EventOf<I>| done(&event.snapshot.state).then_some(Action::StopEarly),
    )
}

fn finish<S, C, D>(
    status: Status,
    history: Vec<Snapshot<S, C, D>>,
    ticks: usize,
) -> Solution<S, C, D> {
    if let Some(last) = history.last() {
        info!(
            ?status,
            ticks,
            elapsed = last.elapsed.get::<second>(),
            "fixed-tick run finished"
        );
    }
    Solution {
        status,
        history,
        ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use driveline_core::Tick;
    use uom::si::time::millisecond;

    use crate::Constant;

    // --- Test fixtures ---

    /// Spins a frictionless node with a torque given as the control.
    struct Spin {
        inertia: f64,
    }

    impl TickIntegrator for Spin {
        type State = f64;
        type Control = f64;
        type Diagnostics = f64;
        type Error = Infallible;

        fn tick(
            &self,
            state: &f64,
            torque: &f64,
            dt: TimeStep,
        ) -> Result<Tick<f64, f64>, Infallible> {
            let acceleration = torque / self.inertia;
            Ok(Tick {
                state: state + acceleration * dt.seconds(),
                diagnostics: acceleration,
            })
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("node seized")]
    struct Seized;

    /// Fails once the node passes a speed limit.
    struct Seizing {
        limit: f64,
    }

    impl TickIntegrator for Seizing {
        type State = f64;
        type Control = f64;
        type Diagnostics = ();
        type Error = Seized;

        fn tick(&self, state: &f64, torque: &f64, dt: TimeStep) -> Result<Tick<f64, ()>, Seized> {
            if *state > self.limit {
                return Err(Seized);
            }
            Ok(Tick {
                state: state + torque * dt.seconds(),
                diagnostics: (),
            })
        }
    }

    fn dt(ms: f64) -> TimeStep {
        TimeStep::new::<millisecond>(ms).unwrap()
    }

    // --- Tests ---

    #[test]
    fn constant_torque_spin_up() {
        let spin = Spin { inertia: 0.5 };

        let solution = solve_unobserved(&spin, 0.0, Constant(2.0), dt(100.0), 10).unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.ticks, 10);
        assert_eq!(solution.history.len(), 11); // initial + 10 ticks

        // 2 N·m / 0.5 kg·m² = 4 rad/s², for 1 s.
        let last = solution.last().unwrap();
        assert_relative_eq!(last.state, 4.0, epsilon = 1e-12);
        assert_relative_eq!(last.elapsed.get::<second>(), 1.0, epsilon = 1e-12);
        assert_eq!(last.control, Some(2.0));
        assert_eq!(last.diagnostics, Some(4.0));
    }

    #[test]
    fn initial_snapshot_has_no_tick_data() {
        let spin = Spin { inertia: 1.0 };
        let solution = solve_unobserved(&spin, 7.0, Constant(1.0), dt(10.0), 3).unwrap();

        let first = &solution.history[0];
        assert_eq!(first.tick, 0);
        assert_eq!(first.state, 7.0);
        assert_eq!(first.elapsed.get::<second>(), 0.0);
        assert!(first.control.is_none());
        assert!(first.diagnostics.is_none());
    }

    #[test]
    fn controls_are_polled_before_each_tick() {
        let spin = Spin { inertia: 1.0 };
        let mut polled = Vec::new();

        let solution = solve_unobserved(
            &spin,
            0.0,
            |tick: usize, state: &f64| {
                polled.push((tick, *state));
                if tick < 2 { 10.0 } else { 0.0 }
            },
            dt(100.0),
            4,
        )
        .unwrap();

        assert_eq!(polled.len(), 4);
        assert_eq!(polled[0], (0, 0.0));
        assert_eq!(polled[1].0, 1);
        assert_relative_eq!(polled[1].1, 1.0, epsilon = 1e-12);
        assert_relative_eq!(*solution.final_state().unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn observer_can_stop_early() {
        let spin = Spin { inertia: 1.0 };

        let observer = |event: &EventOf<Spin>| (event.tick >= 5).then_some(Action::StopEarly);

        let solution = solve(&spin, 0.0, Constant(1.0), dt(100.0), 100, observer).unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.ticks, 5);
        assert_eq!(solution.history.len(), 6); // initial + 5 ticks
    }

    #[test]
    fn zero_ticks_returns_initial() {
        let spin = Spin { inertia: 1.0 };

        let solution = solve_unobserved(&spin, 5.0, Constant(1.0), dt(100.0), 0).unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.ticks, 0);
        assert_eq!(solution.history.len(), 1);
        assert_eq!(solution.final_state(), Some(&5.0));
    }

    #[test]
    fn tick_numbers_start_at_zero() {
        let spin = Spin { inertia: 1.0 };
        let mut ticks = Vec::new();

        solve(
            &spin,
            0.0,
            Constant(1.0),
            dt(250.0),
            4,
            |event: &EventOf<Spin>| {
                ticks.push(event.tick);
                None
            },
        )
        .unwrap();

        assert_eq!(ticks, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn run_until_stops_at_target() {
        let spin = Spin { inertia: 1.0 };

        // Braking from 10 rad/s at 2 rad/s² per 0.1 s tick: 0.2 rad/s per tick.
        let solution =
            run_until(&spin, 10.0, Constant(-2.0), dt(100.0), 1000, |state| *state < 5.0).unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert!(*solution.final_state().unwrap() < 5.0);
        assert!(solution.history[solution.ticks - 1].state >= 5.0);
    }

    #[test]
    fn run_until_checks_the_initial_state() {
        let spin = Spin { inertia: 1.0 };

        let solution =
            run_until(&spin, 1.0, Constant(5.0), dt(100.0), 1000, |state| *state < 5.0).unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.ticks, 0);
    }

    #[test]
    fn run_until_reports_exhausted_budget() {
        let spin = Spin { inertia: 1.0 };

        let solution =
            run_until(&spin, 10.0, Constant(0.0), dt(100.0), 50, |state| *state < 5.0).unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.ticks, 50);
        assert_eq!(solution.final_state(), Some(&10.0));
    }

    #[test]
    fn integrator_errors_carry_the_tick() {
        let seizing = Seizing { limit: 0.25 };

        let error = solve_unobserved(&seizing, 0.0, Constant(1.0), dt(100.0), 10).unwrap_err();

        // 0.1 rad/s per tick: passes 0.25 after tick 3, so tick 4 fails.
        let Error::Integrator { tick, source } = error;
        assert_eq!(tick, 4);
        assert_eq!(source.to_string(), "node seized");
    }
}
