//! Rotational driveline models.
//!
//! Two integrators are provided, each implementing
//! [`TickIntegrator`](driveline_core::TickIntegrator):
//!
//! - [`GearedFlywheel`]: a motor driving a flywheel through a gear pair,
//!   with viscous friction on the flywheel.
//! - [`ClutchedDrivetrain`]: an engine driving a wheel through a friction
//!   clutch, with Coulomb friction on both.
//!
//! Both use explicit Euler at a fixed tick and never let friction reverse
//! a node's direction of rotation.

mod clutch;
pub mod config;
mod drivetrain;
mod flywheel;
mod friction;
mod gear;
mod inertia;
mod node;
mod pedal;
pub mod presets;

pub use clutch::{Clutch, ClutchRegime, ClutchReport};
pub use config::ConfigError;
pub use drivetrain::{
    ClutchedDrivetrain, DrivetrainControl, DrivetrainDiagnostics, DrivetrainParameters,
    DrivetrainState, Engine, Wheel,
};
pub use flywheel::{
    FlywheelControl, FlywheelDiagnostics, FlywheelParameters, FlywheelState, GearedFlywheel,
    NodeDiagnostics,
};
pub use friction::{CoulombFriction, ViscousFriction, limit_to_standstill};
pub use gear::GearPair;
pub use inertia::Inertia;
pub use pedal::Pedal;
