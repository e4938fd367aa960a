//! Engine driving a wheel through a friction clutch.
//!
//! Each tick runs three steps in a fixed order:
//!
//! 1. **Engine**: throttle torque minus Coulomb friction advances the engine.
//! 2. **Clutch**: slip is taken between the *updated* engine velocity and the
//!    start-of-tick wheel velocity, and the clutch law turns it into torque.
//! 3. **Wheel**: clutch torque minus Coulomb friction advances the wheel.
//!
//! The clutch torque acts on the wheel only; the engine does not feel its
//! reaction. Reordering these steps changes the numerical results, so the
//! order is part of the model.

use std::convert::Infallible;

use driveline_core::{Fraction, Tick, TickIntegrator, TimeStep};
use tracing::trace;
use uom::si::{
    angular_velocity::radian_per_second,
    f64::{AngularVelocity, Torque},
    torque::newton_meter,
};

use crate::{Clutch, ClutchReport, CoulombFriction, Inertia, node};

/// Engine parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engine {
    pub inertia: Inertia,
    pub friction: CoulombFriction,

    /// Torque produced at full throttle.
    pub torque_rating: Torque,
}

/// Wheel parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wheel {
    pub inertia: Inertia,
    pub friction: CoulombFriction,
}

/// Parameters of a clutched drivetrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivetrainParameters {
    pub engine: Engine,
    pub wheel: Wheel,
    pub clutch: Clutch,
}

/// Angular velocities of the engine and the wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivetrainState {
    pub engine: AngularVelocity,
    pub wheel: AngularVelocity,
}

impl DrivetrainState {
    /// Engine and wheel speeds in SI units (rad/s).
    #[must_use]
    pub fn from_si(engine: f64, wheel: f64) -> Self {
        Self {
            engine: AngularVelocity::new::<radian_per_second>(engine),
            wheel: AngularVelocity::new::<radian_per_second>(wheel),
        }
    }

    /// Slip across the clutch (`ω_engine − ω_wheel`).
    #[must_use]
    pub fn slip(&self) -> AngularVelocity {
        self.engine - self.wheel
    }
}

/// Control inputs held during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrivetrainControl {
    pub throttle: Fraction,
    pub engagement: Fraction,
}

impl DrivetrainControl {
    /// Throttle closed, with the clutch fully engaged or fully released.
    #[must_use]
    pub fn coasting(clutch_engaged: bool) -> Self {
        Self {
            throttle: Fraction::ZERO,
            engagement: if clutch_engaged {
                Fraction::ONE
            } else {
                Fraction::ZERO
            },
        }
    }
}

/// Torques and clutch behavior during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivetrainDiagnostics {
    /// Torque produced by the engine from the throttle.
    pub engine_torque: Torque,

    /// Friction torque on the engine (opposes its rotation).
    pub engine_friction: Torque,

    pub clutch: ClutchReport,

    /// Friction torque on the wheel (opposes its rotation).
    pub wheel_friction: Torque,
}

/// Integrator for an engine driving a wheel through a friction clutch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClutchedDrivetrain {
    parameters: DrivetrainParameters,
}

impl ClutchedDrivetrain {
    #[must_use]
    pub fn new(parameters: DrivetrainParameters) -> Self {
        Self { parameters }
    }

    #[must_use]
    pub fn parameters(&self) -> &DrivetrainParameters {
        &self.parameters
    }
}

impl TickIntegrator for ClutchedDrivetrain {
    type State = DrivetrainState;
    type Control = DrivetrainControl;
    type Diagnostics = DrivetrainDiagnostics;
    type Error = Infallible;

    fn tick(
        &self,
        state: &DrivetrainState,
        control: &DrivetrainControl,
        dt: TimeStep,
    ) -> Result<Tick<DrivetrainState, DrivetrainDiagnostics>, Infallible> {
        let DrivetrainParameters {
            engine,
            wheel,
            clutch,
        } = &self.parameters;
        let zero = Torque::new::<newton_meter>(0.0);

        if dt.is_zero() {
            return Ok(Tick {
                state: *state,
                diagnostics: DrivetrainDiagnostics {
                    engine_torque: zero,
                    engine_friction: zero,
                    clutch: clutch.transmit(state.slip(), control.engagement),
                    wheel_friction: zero,
                },
            });
        }

        let seconds = dt.seconds();

        // Engine.
        let engine_torque = engine.torque_rating * control.throttle.get();
        let engine_friction =
            engine
                .friction
                .opposing(state.engine, engine.inertia.quantity(), dt);
        let engine_velocity = node::advance(
            state.engine.get::<radian_per_second>(),
            engine.inertia.si(),
            engine_torque.get::<newton_meter>(),
            engine_friction.get::<newton_meter>(),
            seconds,
        );
        let engine_velocity = AngularVelocity::new::<radian_per_second>(engine_velocity);

        // Clutch, using the updated engine velocity.
        let report = clutch.transmit(engine_velocity - state.wheel, control.engagement);

        // Wheel.
        let wheel_friction = wheel
            .friction
            .opposing(state.wheel, wheel.inertia.quantity(), dt);
        let wheel_velocity = node::advance(
            state.wheel.get::<radian_per_second>(),
            wheel.inertia.si(),
            report.torque.get::<newton_meter>(),
            wheel_friction.get::<newton_meter>(),
            seconds,
        );
        let wheel_velocity = AngularVelocity::new::<radian_per_second>(wheel_velocity);

        trace!(
            regime = ?report.regime,
            slip = report.slip.get::<radian_per_second>(),
            clutch_torque = report.torque.get::<newton_meter>(),
            engine = engine_velocity.get::<radian_per_second>(),
            wheel = wheel_velocity.get::<radian_per_second>(),
            "drivetrain tick"
        );

        Ok(Tick {
            state: DrivetrainState {
                engine: engine_velocity,
                wheel: wheel_velocity,
            },
            diagnostics: DrivetrainDiagnostics {
                engine_torque,
                engine_friction,
                clutch: report,
                wheel_friction,
            },
        })
    }
}

impl Default for DrivetrainParameters {
    /// A light engine (0.2 kg·m², 300 N·m) driving a 1.5 kg·m² wheel.
    fn default() -> Self {
        crate::presets::road_car()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::second;

    use crate::ClutchRegime;

    fn dt(seconds: f64) -> TimeStep {
        TimeStep::new::<second>(seconds).unwrap()
    }

    fn rad_s(velocity: AngularVelocity) -> f64 {
        velocity.get::<radian_per_second>()
    }

    fn frictionless() -> ClutchedDrivetrain {
        let defaults = DrivetrainParameters::default();
        ClutchedDrivetrain::new(DrivetrainParameters {
            engine: Engine {
                friction: CoulombFriction::none(),
                ..defaults.engine
            },
            wheel: Wheel {
                friction: CoulombFriction::none(),
                ..defaults.wheel
            },
            clutch: defaults.clutch,
        })
    }

    #[test]
    fn first_tick_matches_hand_calculation() {
        let drivetrain = ClutchedDrivetrain::new(DrivetrainParameters::default());
        let tick = drivetrain
            .tick(
                &DrivetrainState::from_si(1000.0, 1000.0),
                &DrivetrainControl::coasting(true),
                dt(0.02),
            )
            .unwrap();

        // Engine: -20 N·m / 0.2 kg·m² · 0.02 s = -2 rad/s.
        assert_relative_eq!(rad_s(tick.state.engine), 998.0, epsilon = 1e-9);

        // Slip of -2 rad/s is past the threshold: 20 · -2 = -40 N·m.
        let clutch = tick.diagnostics.clutch;
        assert_eq!(clutch.regime, ClutchRegime::Slipping);
        assert_relative_eq!(clutch.torque.get::<newton_meter>(), -40.0, epsilon = 1e-9);

        // Wheel: (-40 - 50) N·m / 1.5 kg·m² · 0.02 s = -1.2 rad/s.
        assert_relative_eq!(rad_s(tick.state.wheel), 998.8, epsilon = 1e-9);
    }

    #[test]
    fn slip_uses_updated_engine_velocity() {
        let drivetrain = frictionless();
        let control = DrivetrainControl {
            throttle: Fraction::ONE,
            engagement: Fraction::ONE,
        };

        let tick = drivetrain
            .tick(&DrivetrainState::from_si(0.0, 0.0), &control, dt(0.001))
            .unwrap();

        // 300 N·m / 0.2 kg·m² · 0.001 s = 1.5 rad/s of slip, seen this same tick.
        let clutch = tick.diagnostics.clutch;
        assert_relative_eq!(rad_s(clutch.slip), 1.5, epsilon = 1e-12);
        assert_eq!(clutch.regime, ClutchRegime::Slipping);
        assert!(rad_s(tick.state.wheel) > 0.0);
    }

    #[test]
    fn clutch_does_not_load_the_engine() {
        let drivetrain = frictionless();
        let state = DrivetrainState::from_si(500.0, 0.0);

        let engaged = drivetrain
            .tick(&state, &DrivetrainControl::coasting(true), dt(0.02))
            .unwrap();
        let released = drivetrain
            .tick(&state, &DrivetrainControl::coasting(false), dt(0.02))
            .unwrap();

        assert_eq!(engaged.state.engine, released.state.engine);
        assert!(engaged.state.wheel > released.state.wheel);
    }

    #[test]
    fn constant_without_torque_or_friction() {
        let drivetrain = frictionless();
        let initial = DrivetrainState::from_si(650.0, 650.0);

        for control in [
            DrivetrainControl::coasting(true),
            DrivetrainControl::coasting(false),
        ] {
            let mut state = initial;
            for _ in 0..1000 {
                state = drivetrain.tick(&state, &control, dt(0.02)).unwrap().state;
            }
            assert_eq!(state, initial);
        }
    }

    #[test]
    fn friction_never_reverses_either_node() {
        let drivetrain = ClutchedDrivetrain::new(DrivetrainParameters::default());
        let control = DrivetrainControl::coasting(false);

        for (engine, wheel) in [(3.0, -3.0), (-40.0, 7.5), (1000.0, 1000.0)] {
            let state = DrivetrainState::from_si(engine, wheel);
            let next = drivetrain.tick(&state, &control, dt(0.02)).unwrap().state;

            assert!(rad_s(next.engine) * engine >= 0.0);
            assert!(rad_s(next.engine).abs() < engine.abs());
            assert!(rad_s(next.wheel) * wheel >= 0.0);
            assert!(rad_s(next.wheel).abs() < wheel.abs());
        }
    }

    #[test]
    fn friction_stops_slow_nodes_exactly() {
        let drivetrain = ClutchedDrivetrain::new(DrivetrainParameters::default());
        let control = DrivetrainControl::coasting(false);

        // Engine friction stops anything below 2 rad/s in one tick, wheel
        // friction anything below 2/3 rad/s.
        for (engine, wheel) in [(0.5, 0.2), (-0.5, -0.2), (1.9, -0.6), (1e-9, 1e-9)] {
            let state = DrivetrainState::from_si(engine, wheel);
            let next = drivetrain.tick(&state, &control, dt(0.02)).unwrap().state;

            assert_eq!(rad_s(next.engine), 0.0);
            assert_eq!(rad_s(next.wheel), 0.0);
        }
    }

    #[test]
    fn throttle_spins_the_engine_up() {
        let drivetrain = ClutchedDrivetrain::new(DrivetrainParameters::default());
        let control = DrivetrainControl {
            throttle: Fraction::ONE,
            engagement: Fraction::ZERO,
        };

        let tick = drivetrain
            .tick(&DrivetrainState::from_si(0.0, 0.0), &control, dt(0.02))
            .unwrap();

        // At rest there is no friction yet: 300 N·m / 0.2 kg·m² · 0.02 s.
        assert_relative_eq!(rad_s(tick.state.engine), 30.0, epsilon = 1e-9);
        assert_eq!(rad_s(tick.state.wheel), 0.0);
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let drivetrain = ClutchedDrivetrain::new(DrivetrainParameters::default());
        let state = DrivetrainState::from_si(1000.0, 400.0);
        let control = DrivetrainControl {
            throttle: Fraction::ONE,
            engagement: Fraction::ONE,
        };

        let tick = drivetrain.tick(&state, &control, dt(0.0)).unwrap();

        assert_eq!(tick.state, state);
        assert_eq!(tick.diagnostics.engine_friction.get::<newton_meter>(), 0.0);
        assert_relative_eq!(rad_s(tick.diagnostics.clutch.slip), 600.0);
    }
}
