use std::cmp::Ordering;

use num_traits::Zero;

use crate::constraint::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly greater than zero.
///
/// Used for moments of inertia, which every integration step divides by.
///
/// # Examples
///
/// ```
/// use driveline_core::constraint::{ConstraintError, StrictlyPositive};
/// use uom::si::{f64::MomentOfInertia, moment_of_inertia::kilogram_square_meter};
///
/// let inertia = StrictlyPositive::new(MomentOfInertia::new::<kilogram_square_meter>(0.2)).unwrap();
/// assert_eq!(inertia.as_ref().get::<kilogram_square_meter>(), 0.2);
///
/// assert_eq!(StrictlyPositive::new(0.0).unwrap_err(), ConstraintError::Zero);
/// assert_eq!(StrictlyPositive::new(-1.0).unwrap_err(), ConstraintError::Negative);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs `Constrained<T, StrictlyPositive>` if `value > 0`.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::Zero`] if the value equals zero.
    /// - [`ConstraintError::Negative`] if the value is less than zero.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}
