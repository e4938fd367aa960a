use driveline_core::constraint::{Constrained, ConstraintError, StrictlyPositive};
use uom::si::{f64::MomentOfInertia, moment_of_inertia::kilogram_square_meter};

/// Moment of inertia of a rotating node, guaranteed strictly positive.
///
/// Every tick divides by inertia, so zero and negative values are rejected
/// here rather than surfacing later as NaN velocities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inertia(Constrained<MomentOfInertia, StrictlyPositive>);

impl Inertia {
    /// Constructs an [`Inertia`] if `inertia > 0`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `inertia` is not a positive finite value.
    pub fn new(inertia: MomentOfInertia) -> Result<Self, ConstraintError> {
        if inertia.is_infinite() {
            return Err(ConstraintError::Infinite);
        }
        StrictlyPositive::new(inertia).map(Self)
    }

    /// Constructs an [`Inertia`] in SI units (kg·m²).
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `value` is not a positive finite value.
    pub fn from_si(value: f64) -> Result<Self, ConstraintError> {
        Self::new(MomentOfInertia::new::<kilogram_square_meter>(value))
    }

    /// Constructs an [`Inertia`] in SI units without validation.
    ///
    /// # Warning
    ///
    /// The caller must ensure `value > 0`.
    #[must_use]
    pub fn new_unchecked(value: f64) -> Self {
        Self(Constrained::new_unchecked(
            MomentOfInertia::new::<kilogram_square_meter>(value),
        ))
    }

    /// Returns the underlying quantity.
    #[must_use]
    pub fn quantity(&self) -> MomentOfInertia {
        *self.0.as_ref()
    }

    /// Returns the inertia in SI units (kg·m²).
    #[must_use]
    pub fn si(&self) -> f64 {
        self.0.as_ref().get::<kilogram_square_meter>()
    }
}
