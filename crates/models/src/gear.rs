//! Lossless gear coupling between two rotating nodes.
//!
//! # Gear Ratio Convention
//!
//! `ratio = ω_input / ω_output`:
//! - `ratio > 1` means torque multiplication and speed reduction.
//! - Output torque = input torque × `ratio`.
//! - Output velocity = input velocity ÷ `ratio`.
//! - A negative ratio reverses the direction of rotation.

use driveline_core::constraint::{Constrained, ConstraintError, NonZero};
use uom::si::f64::{AngularVelocity, MomentOfInertia, Torque};

use crate::Inertia;

/// A fixed-ratio gear pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearPair {
    ratio: Constrained<f64, NonZero>,
}

impl GearPair {
    /// Creates a gear pair with the given ratio.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `ratio` is zero, infinite, or NaN.
    pub fn new(ratio: f64) -> Result<Self, ConstraintError> {
        if ratio.is_infinite() {
            return Err(ConstraintError::Infinite);
        }
        Ok(Self {
            ratio: NonZero::new(ratio)?,
        })
    }

    /// Creates a gear pair without validating the ratio.
    ///
    /// # Warning
    ///
    /// The caller must ensure `ratio` is finite and non-zero.
    #[must_use]
    pub const fn new_unchecked(ratio: f64) -> Self {
        Self {
            ratio: Constrained::new_unchecked(ratio),
        }
    }

    /// Returns the gear ratio.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        *self.ratio.as_ref()
    }

    /// Transforms input-side torque to the output side.
    #[must_use]
    pub fn torque_to_output(&self, torque: Torque) -> Torque {
        torque * self.ratio()
    }

    /// Transforms output-side torque back to the input side.
    #[must_use]
    pub fn torque_to_input(&self, torque: Torque) -> Torque {
        torque / self.ratio()
    }

    /// Transforms input-side angular velocity to the output side.
    #[must_use]
    pub fn velocity_to_output(&self, velocity: AngularVelocity) -> AngularVelocity {
        velocity / self.ratio()
    }

    /// Output-side inertia as seen from the input side (`I / ratio²`).
    #[must_use]
    pub fn reflect_to_input(&self, output_inertia: Inertia) -> MomentOfInertia {
        output_inertia.quantity() / (self.ratio() * self.ratio())
    }

    /// Input-side inertia as seen from the output side (`I · ratio²`).
    #[must_use]
    pub fn reflect_to_output(&self, input_inertia: Inertia) -> MomentOfInertia {
        input_inertia.quantity() * (self.ratio() * self.ratio())
    }
}
