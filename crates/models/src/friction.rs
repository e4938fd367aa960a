//! Per-node friction laws.
//!
//! Each law returns a torque opposing the node's own angular velocity.
//! The torque is then limited so that, acting alone for one tick, it can
//! bring the node to rest but never spin it backwards:
//!
//! ```text
//! |τ_friction| ≤ |ω| · I / dt
//! ```
//!
//! A node at rest therefore feels no friction, and no law produces the
//! overshoot-and-oscillate behavior a raw constant torque would.

use driveline_core::TimeStep;
use uom::si::{
    angular_velocity::radian_per_second,
    f64::{AngularVelocity, MomentOfInertia, Torque},
    moment_of_inertia::kilogram_square_meter,
    torque::newton_meter,
};

/// Constant-magnitude (Coulomb) friction.
///
/// The torque is `-sign(ω) · torque`, limited to the standstill bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoulombFriction {
    /// Magnitude of the friction torque.
    pub torque: Torque,
}

impl CoulombFriction {
    /// Friction of the given magnitude.
    #[must_use]
    pub fn new(torque: Torque) -> Self {
        Self { torque }
    }

    /// Friction of the given magnitude in SI units (N·m).
    #[must_use]
    pub fn from_si(torque: f64) -> Self {
        Self::new(Torque::new::<newton_meter>(torque))
    }

    /// No friction at all.
    #[must_use]
    pub fn none() -> Self {
        Self::from_si(0.0)
    }

    /// Returns the friction torque acting on a node during one tick.
    #[must_use]
    pub fn opposing(
        &self,
        velocity: AngularVelocity,
        inertia: MomentOfInertia,
        dt: TimeStep,
    ) -> Torque {
        let omega = velocity.get::<radian_per_second>();
        if omega == 0.0 {
            return Torque::new::<newton_meter>(0.0);
        }
        let raw = -omega.signum() * self.torque.get::<newton_meter>().abs();
        limit_to_standstill(Torque::new::<newton_meter>(raw), velocity, inertia, dt)
    }
}

/// Velocity-proportional friction with a minimum magnitude.
///
/// The torque is `-coefficient · ω`. Below `minimum_torque` in magnitude it is
/// raised to `minimum_torque` (keeping its direction), which models the
/// breakaway friction that dominates near standstill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViscousFriction {
    /// Damping coefficient (N·m per rad/s).
    pub coefficient: f64,

    /// Smallest friction magnitude applied to a spinning node.
    pub minimum_torque: Torque,
}

impl ViscousFriction {
    /// Viscous friction in SI units: coefficient in N·m·s/rad, minimum in N·m.
    #[must_use]
    pub fn from_si(coefficient: f64, minimum_torque: f64) -> Self {
        Self {
            coefficient,
            minimum_torque: Torque::new::<newton_meter>(minimum_torque),
        }
    }

    /// No friction at all.
    #[must_use]
    pub fn none() -> Self {
        Self::from_si(0.0, 0.0)
    }

    /// Returns the friction torque acting on a node during one tick.
    #[must_use]
    pub fn opposing(
        &self,
        velocity: AngularVelocity,
        inertia: MomentOfInertia,
        dt: TimeStep,
    ) -> Torque {
        let omega = velocity.get::<radian_per_second>();
        if omega == 0.0 {
            return Torque::new::<newton_meter>(0.0);
        }

        let minimum = self.minimum_torque.get::<newton_meter>().abs();
        let raw = -self.coefficient * omega;
        let raw = if raw.abs() > minimum {
            raw
        } else {
            -omega.signum() * minimum
        };

        limit_to_standstill(Torque::new::<newton_meter>(raw), velocity, inertia, dt)
    }
}

/// Limits `torque` so that, acting alone for one tick, it cannot reverse a node.
///
/// A zero-length tick transfers no impulse, so the limit is zero.
#[must_use]
pub fn limit_to_standstill(
    torque: Torque,
    velocity: AngularVelocity,
    inertia: MomentOfInertia,
    dt: TimeStep,
) -> Torque {
    if dt.is_zero() {
        return Torque::new::<newton_meter>(0.0);
    }
    let limit = velocity.get::<radian_per_second>().abs() * inertia.get::<kilogram_square_meter>()
        / dt.seconds();
    Torque::new::<newton_meter>(clamp_magnitude(torque.get::<newton_meter>(), limit))
}

/// Clamps `value` to `[-limit, limit]`.
///
/// Unlike [`f64::clamp`] this never panics; a negative `limit` is treated by
/// magnitude.
pub(crate) fn clamp_magnitude(value: f64, limit: f64) -> f64 {
    let limit = limit.abs();
    value.max(-limit).min(limit)
}
