//! Friction clutch with a two-regime torque law.
//!
//! The clutch transmits a torque proportional to the slip across it, scaled by
//! the engagement level and bounded by the clutch's torque capacity:
//!
//! ```text
//! slip   = ω_engine − ω_wheel
//! τ      = clamp(slip · k · engagement, ±max_torque)
//! k      = static_coefficient   if |slip| < slip_threshold   (locked)
//!          dynamic_coefficient  otherwise                    (slipping)
//! ```
//!
//! The regime is chosen from the current slip alone. There is no hysteresis,
//! so a clutch can move between regimes on any tick.

use driveline_core::Fraction;
use uom::si::{
    angular_velocity::radian_per_second,
    f64::{AngularVelocity, Torque},
    torque::newton_meter,
};

use crate::friction::clamp_magnitude;

/// The friction regime a clutch operates in during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClutchRegime {
    /// Slip is below the threshold; the static coefficient applies.
    Locked,
    /// Slip is at or above the threshold; the dynamic coefficient applies.
    Slipping,
}

/// Clutch parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clutch {
    /// Torque per unit slip while locked (N·m per rad/s).
    pub static_coefficient: f64,

    /// Torque per unit slip while slipping (N·m per rad/s).
    pub dynamic_coefficient: f64,

    /// Slip magnitude at which the clutch starts slipping.
    pub slip_threshold: AngularVelocity,

    /// Largest torque magnitude the clutch can transmit.
    pub max_torque: Torque,
}

/// What the clutch did during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClutchReport {
    pub regime: ClutchRegime,

    /// Slip the torque was computed from.
    pub slip: AngularVelocity,

    /// Torque delivered to the wheel side.
    pub torque: Torque,
}

impl Clutch {
    /// Creates a clutch from SI values.
    ///
    /// Coefficients are in N·m per rad/s, the threshold in rad/s and the
    /// capacity in N·m.
    #[must_use]
    pub fn from_si(
        static_coefficient: f64,
        dynamic_coefficient: f64,
        slip_threshold: f64,
        max_torque: f64,
    ) -> Self {
        Self {
            static_coefficient,
            dynamic_coefficient,
            slip_threshold: AngularVelocity::new::<radian_per_second>(slip_threshold),
            max_torque: Torque::new::<newton_meter>(max_torque),
        }
    }

    /// Returns the regime for the given slip.
    #[must_use]
    pub fn regime(&self, slip: AngularVelocity) -> ClutchRegime {
        if slip.get::<radian_per_second>().abs() < self.slip_threshold.get::<radian_per_second>() {
            ClutchRegime::Locked
        } else {
            ClutchRegime::Slipping
        }
    }

    /// Computes the torque transmitted for the given slip and engagement.
    #[must_use]
    pub fn transmit(&self, slip: AngularVelocity, engagement: Fraction) -> ClutchReport {
        let regime = self.regime(slip);
        let coefficient = match regime {
            ClutchRegime::Locked => self.static_coefficient,
            ClutchRegime::Slipping => self.dynamic_coefficient,
        };

        let raw = slip.get::<radian_per_second>() * coefficient * engagement.get();
        let torque = clamp_magnitude(raw, self.max_torque.get::<newton_meter>());

        ClutchReport {
            regime,
            slip,
            torque: Torque::new::<newton_meter>(torque),
        }
    }
}

impl Default for Clutch {
    /// A clutch that grips firmly once locked and can carry 400 N·m.
    fn default() -> Self {
        Self::from_si(50.0, 20.0, 1.0, 400.0)
    }
}
