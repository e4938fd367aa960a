use std::cmp::Ordering;

use num_traits::Zero;

use crate::constraint::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is not equal to zero.
///
/// Negative values are allowed, so a reversing gear pair is representable.
///
/// # Examples
///
/// ```
/// use driveline_core::constraint::{ConstraintError, NonZero};
///
/// assert!(NonZero::new(2.0).is_ok());
/// assert!(NonZero::new(-3.5).is_ok());
/// assert_eq!(NonZero::new(0.0).unwrap_err(), ConstraintError::Zero);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonZero;

impl NonZero {
    /// Constructs `Constrained<T, NonZero>` if `value != 0`.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::Zero`] if the value equals zero.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new<T: PartialOrd + Zero>(value: T) -> Result<Constrained<T, NonZero>, ConstraintError> {
        Constrained::<T, NonZero>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonZero {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(_) => Ok(()),
            None => Err(ConstraintError::NotANumber),
        }
    }
}
