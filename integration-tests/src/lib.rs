//! Shared scenario setup for the driveline integration tests.

use driveline_core::TimeStep;
use driveline_models::{ClutchedDrivetrain, DrivetrainControl, DrivetrainParameters, DrivetrainState};
use driveline_solvers::{Constant, fixed_tick};
use uom::si::{angular_velocity::radian_per_second, time::millisecond};

/// Engine and wheel speed at the start of a coast-down (rad/s).
pub const START_SPEED: f64 = 1000.0;

/// Wheel speed that ends a coast-down (rad/s).
pub const TARGET_SPEED: f64 = 100.0;

/// Tick budget for a coast-down; generous for every scenario here.
pub const MAX_TICKS: usize = 10_000;

/// The fixed frame time used by the scenarios: 20 ms.
///
/// # Panics
///
/// Never, since 20 ms is a valid time step.
#[must_use]
pub fn frame_time() -> TimeStep {
    TimeStep::new::<millisecond>(20.0).expect("20 ms is a valid time step")
}

/// Returns `true` once the wheel has slowed below the target speed.
#[must_use]
pub fn wheel_below_target(state: &DrivetrainState) -> bool {
    state.wheel.get::<radian_per_second>() < TARGET_SPEED
}

/// Coasts the default drivetrain from [`START_SPEED`] until the wheel drops
/// below [`TARGET_SPEED`], with the clutch engaged or released.
///
/// # Panics
///
/// Never, since the drivetrain integrator is infallible.
#[must_use]
pub fn coast_down(clutch_engaged: bool) -> fixed_tick::SolutionOf<ClutchedDrivetrain> {
    let drivetrain = ClutchedDrivetrain::new(DrivetrainParameters::default());
    fixed_tick::run_until(
        &drivetrain,
        DrivetrainState::from_si(START_SPEED, START_SPEED),
        Constant(DrivetrainControl::coasting(clutch_engaged)),
        frame_time(),
        MAX_TICKS,
        wheel_below_target,
    )
    .expect("drivetrain ticks never fail")
}
