use driveline_core::{TickIntegrator, TimeStep};
use tracing::{debug, trace};
use uom::si::{f64::Time, time::second};

use crate::ControlSource;

/// Drives an integrator one frame at a time.
///
/// A host loop (a game engine, a GUI timer) calls [`Driver::on_frame`] once
/// per frame. The driver polls its control source and advances the
/// integrator by the frame's `dt`.
///
/// In test mode, frame callbacks are ignored so a harness can drive the
/// integrator deterministically with [`Driver::advance`], setting the
/// control explicitly through [`Driver::set_control`] or
/// [`Driver::set_initial_conditions`].
pub struct Driver<I: TickIntegrator, S> {
    integrator: I,
    controls: S,
    state: I::State,
    control: I::Control,
    test_mode: bool,
    ticks: usize,
    elapsed: Time,
}

impl<I, S> Driver<I, S>
where
    I: TickIntegrator,
    S: ControlSource<I::State, I::Control>,
{
    /// Creates a driver in frame mode, starting from `state` with `control`.
    pub fn new(integrator: I, controls: S, state: I::State, control: I::Control) -> Self {
        Self {
            integrator,
            controls,
            state,
            control,
            test_mode: false,
            ticks: 0,
            elapsed: Time::new::<second>(0.0),
        }
    }

    /// Handles a frame callback from the host loop.
    ///
    /// Polls the control source and ticks once. Returns `Ok(None)` without
    /// touching the state when test mode is enabled.
    ///
    /// # Errors
    ///
    /// Returns the integrator's error if the tick fails.
    pub fn on_frame(&mut self, dt: TimeStep) -> Result<Option<I::Diagnostics>, I::Error> {
        if self.test_mode {
            trace!(dt = dt.seconds(), "frame skipped in test mode");
            return Ok(None);
        }

        self.control = self.controls.control(self.ticks, &self.state);
        self.advance(dt).map(Some)
    }

    /// Ticks once with the current control, without polling.
    ///
    /// Works in both modes; this is the entry point for test harnesses.
    ///
    /// # Errors
    ///
    /// Returns the integrator's error if the tick fails. The state is left
    /// unchanged in that case.
    pub fn advance(&mut self, dt: TimeStep) -> Result<I::Diagnostics, I::Error> {
        let tick = self.integrator.tick(&self.state, &self.control, dt)?;
        self.state = tick.state;
        self.ticks += 1;
        self.elapsed = self.elapsed + dt;
        Ok(tick.diagnostics)
    }

    /// Enables or disables test mode.
    pub fn set_test_mode(&mut self, enabled: bool) {
        if self.test_mode != enabled {
            debug!(enabled, "test mode changed");
        }
        self.test_mode = enabled;
    }

    #[must_use]
    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    /// Forces the state and control, and restarts the tick count and clock.
    pub fn set_initial_conditions(&mut self, state: I::State, control: I::Control) {
        debug!(ticks = self.ticks, "initial conditions forced");
        self.state = state;
        self.control = control;
        self.ticks = 0;
        self.elapsed = Time::new::<second>(0.0);
    }

    /// Replaces the control used by [`Driver::advance`].
    ///
    /// In frame mode the next [`Driver::on_frame`] overwrites it again.
    pub fn set_control(&mut self, control: I::Control) {
        self.control = control;
    }

    #[must_use]
    pub fn state(&self) -> &I::State {
        &self.state
    }

    /// The control held during the most recent tick, or the one set for the next.
    #[must_use]
    pub fn control(&self) -> &I::Control {
        &self.control
    }

    /// Ticks completed since the last reset.
    #[must_use]
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Simulated time since the last reset.
    #[must_use]
    pub fn elapsed(&self) -> Time {
        self.elapsed
    }

    #[must_use]
    pub fn integrator(&self) -> &I {
        &self.integrator
    }
}
