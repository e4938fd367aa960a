//! Motor driving a flywheel through a gear pair.
//!
//! The chain has four nodes: the motor, the input (driving) gear, the output
//! (driven) gear, and the flywheel. The gears are tracked as separate nodes so
//! their velocities can be inspected, but they carry no inertia of their own.
//!
//! Each tick propagates torque through the chain twice:
//!
//! 1. **Forward**: the generated motor torque accelerates the motor and input
//!    gear, then passes through the gear (× ratio) to accelerate the output
//!    gear and flywheel.
//! 2. **Backward**: flywheel friction, evaluated at the post-forward velocity,
//!    decelerates the flywheel and output gear, then passes back through the
//!    gear (÷ ratio) to the input gear and motor.
//!
//! Both sides accelerate against their *reflected* inertia, which includes the
//! far side's inertia scaled through the gear:
//!
//! ```text
//! I_motor_total    = I_motor    + I_flywheel / ratio²
//! I_flywheel_total = I_flywheel + I_motor    · ratio²
//! ```
//!
//! With these, a torque `τ` at the motor and `τ · ratio` at the flywheel
//! produce accelerations that differ by exactly the gear ratio, so the two
//! gear velocities stay locked together.

use std::convert::Infallible;

use driveline_core::{Tick, TickIntegrator, TimeStep};
use uom::si::{
    angular_momentum::kilogram_square_meter_per_second,
    angular_velocity::radian_per_second,
    f64::{AngularMomentum, AngularVelocity, MomentOfInertia, Power, Torque},
    moment_of_inertia::kilogram_square_meter,
    power::watt,
    torque::newton_meter,
};

use crate::{GearPair, Inertia, ViscousFriction, node};

/// Parameters of a geared flywheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlywheelParameters {
    pub motor_inertia: Inertia,
    pub flywheel_inertia: Inertia,
    pub gear: GearPair,

    /// Friction acting on the flywheel only.
    pub friction: ViscousFriction,
}

impl FlywheelParameters {
    /// Returns the reflected inertias `(motor side, flywheel side)`.
    #[must_use]
    pub fn reflected_inertias(&self) -> (MomentOfInertia, MomentOfInertia) {
        let motor_total =
            self.motor_inertia.quantity() + self.gear.reflect_to_input(self.flywheel_inertia);
        let flywheel_total =
            self.flywheel_inertia.quantity() + self.gear.reflect_to_output(self.motor_inertia);
        (motor_total, flywheel_total)
    }
}

/// Angular velocities of the four nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlywheelState {
    pub motor: AngularVelocity,
    pub input_gear: AngularVelocity,
    pub output_gear: AngularVelocity,
    pub flywheel: AngularVelocity,
}

impl FlywheelState {
    /// All nodes at rest.
    #[must_use]
    pub fn at_rest() -> Self {
        Self::from_si(0.0, 0.0)
    }

    /// Motor side and flywheel side spinning at the given speeds (rad/s).
    ///
    /// The input gear turns with the motor and the output gear with the flywheel.
    #[must_use]
    pub fn from_si(motor: f64, flywheel: f64) -> Self {
        let motor = AngularVelocity::new::<radian_per_second>(motor);
        let flywheel = AngularVelocity::new::<radian_per_second>(flywheel);
        Self {
            motor,
            input_gear: motor,
            output_gear: flywheel,
            flywheel,
        }
    }

    /// Motor spinning at `motor` with the flywheel turning at the speed the
    /// gear pair dictates.
    #[must_use]
    pub fn locked(motor: AngularVelocity, gear: &GearPair) -> Self {
        let flywheel = gear.velocity_to_output(motor);
        Self {
            motor,
            input_gear: motor,
            output_gear: flywheel,
            flywheel,
        }
    }
}

/// Control input: torque generated by the motor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlywheelControl {
    pub motor_torque: Torque,
}

impl FlywheelControl {
    /// Motor torque in SI units (N·m).
    #[must_use]
    pub fn from_si(motor_torque: f64) -> Self {
        Self {
            motor_torque: Torque::new::<newton_meter>(motor_torque),
        }
    }
}

/// Momentum and power of a single node at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeDiagnostics {
    /// Reflected inertia times angular velocity.
    pub momentum: AngularMomentum,

    /// Load torque from the backward pass times angular velocity.
    pub power: Power,
}

/// Per-node diagnostics for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlywheelDiagnostics {
    pub motor: NodeDiagnostics,
    pub input_gear: NodeDiagnostics,
    pub output_gear: NodeDiagnostics,
    pub flywheel: NodeDiagnostics,

    /// Friction torque applied to the flywheel.
    pub friction: Torque,
}

/// Integrator for a motor driving a flywheel through a gear pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearedFlywheel {
    parameters: FlywheelParameters,
}

impl GearedFlywheel {
    #[must_use]
    pub fn new(parameters: FlywheelParameters) -> Self {
        Self { parameters }
    }

    #[must_use]
    pub fn parameters(&self) -> &FlywheelParameters {
        &self.parameters
    }
}

impl TickIntegrator for GearedFlywheel {
    type State = FlywheelState;
    type Control = FlywheelControl;
    type Diagnostics = FlywheelDiagnostics;
    type Error = Infallible;

    fn tick(
        &self,
        state: &FlywheelState,
        control: &FlywheelControl,
        dt: TimeStep,
    ) -> Result<Tick<FlywheelState, FlywheelDiagnostics>, Infallible> {
        let (motor_total, flywheel_total) = self.parameters.reflected_inertias();
        let motor_total = motor_total.get::<kilogram_square_meter>();
        let flywheel_total = flywheel_total.get::<kilogram_square_meter>();

        if dt.is_zero() {
            return Ok(Tick {
                state: *state,
                diagnostics: diagnostics(state, motor_total, flywheel_total, 0.0, 0.0),
            });
        }

        let gear = &self.parameters.gear;
        let seconds = dt.seconds();

        let mut motor = state.motor.get::<radian_per_second>();
        let mut input_gear = state.input_gear.get::<radian_per_second>();
        let mut output_gear = state.output_gear.get::<radian_per_second>();
        let mut flywheel = state.flywheel.get::<radian_per_second>();

        // Forward: motor -> gears -> flywheel.
        let input_torque = control.motor_torque.get::<newton_meter>();
        let output_torque = gear
            .torque_to_output(control.motor_torque)
            .get::<newton_meter>();

        motor = node::advance(motor, motor_total, input_torque, 0.0, seconds);
        input_gear = node::advance(input_gear, motor_total, input_torque, 0.0, seconds);
        output_gear = node::advance(output_gear, flywheel_total, output_torque, 0.0, seconds);
        flywheel = node::advance(flywheel, flywheel_total, output_torque, 0.0, seconds);

        // Backward: flywheel friction -> gears -> motor.
        let friction = self.parameters.friction.opposing(
            AngularVelocity::new::<radian_per_second>(flywheel),
            MomentOfInertia::new::<kilogram_square_meter>(flywheel_total),
            dt,
        );
        let reflected_friction = gear.torque_to_input(friction).get::<newton_meter>();
        let friction = friction.get::<newton_meter>();

        let flywheel_before = flywheel;
        flywheel = node::advance(flywheel, flywheel_total, 0.0, friction, seconds);
        // The output gear is rigidly attached to the flywheel, so it takes the
        // same velocity change, including any standstill clamping.
        output_gear += flywheel - flywheel_before;
        input_gear = node::advance(input_gear, motor_total, reflected_friction, 0.0, seconds);
        motor = node::advance(motor, motor_total, reflected_friction, 0.0, seconds);

        let next = FlywheelState {
            motor: AngularVelocity::new::<radian_per_second>(motor),
            input_gear: AngularVelocity::new::<radian_per_second>(input_gear),
            output_gear: AngularVelocity::new::<radian_per_second>(output_gear),
            flywheel: AngularVelocity::new::<radian_per_second>(flywheel),
        };

        Ok(Tick {
            state: next,
            diagnostics: diagnostics(
                &next,
                motor_total,
                flywheel_total,
                reflected_friction,
                friction,
            ),
        })
    }
}

impl Default for FlywheelParameters {
    /// A small bench rig: 0.05 kg·m² motor, 0.1 kg·m² flywheel, 2:1 reduction.
    fn default() -> Self {
        crate::presets::bench_rig()
    }
}

/// Computes momentum and power for each node in SI units.
fn diagnostics(
    state: &FlywheelState,
    motor_total: f64,
    flywheel_total: f64,
    motor_side_torque: f64,
    flywheel_side_torque: f64,
) -> FlywheelDiagnostics {
    let node = |velocity: AngularVelocity, inertia: f64, torque: f64| {
        let omega = velocity.get::<radian_per_second>();
        NodeDiagnostics {
            momentum: AngularMomentum::new::<kilogram_square_meter_per_second>(inertia * omega),
            power: Power::new::<watt>(torque * omega),
        }
    };

    FlywheelDiagnostics {
        motor: node(state.motor, motor_total, motor_side_torque),
        input_gear: node(state.input_gear, motor_total, motor_side_torque),
        output_gear: node(state.output_gear, flywheel_total, flywheel_side_torque),
        flywheel: node(state.flywheel, flywheel_total, flywheel_side_torque),
        friction: Torque::new::<newton_meter>(flywheel_side_torque),
    }
}
