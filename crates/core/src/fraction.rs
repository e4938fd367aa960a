use std::{cmp::Ordering, convert::TryFrom, ops::Mul};

use thiserror::Error;

/// A bounded scalar in `[0.0, 1.0]`.
///
/// Used for control levels such as throttle position and clutch engagement.
///
/// This type internally wraps an `f64` and guarantees the value is within `[0, 1]`.
/// Because of this invariant, `Fraction` implements [`Eq`] and [`Ord`] even
/// though raw `f64` does not.
///
/// # Examples
/// ```
/// use driveline_core::Fraction;
///
/// let throttle = Fraction::new(0.25).unwrap();
/// assert_eq!(throttle.get(), 0.25);
///
/// // Scale a torque rating by the throttle (either order)
/// let rating = 300.0;
/// assert_eq!(throttle * rating, 75.0);
/// assert_eq!(rating * throttle, 75.0);
///
/// assert!(Fraction::new(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Fraction(f64);

impl Fraction {
    /// The fraction `0.0`, e.g. a released pedal.
    pub const ZERO: Self = Self(0.0);

    /// The fraction `1.0`, e.g. a fully pressed pedal or engaged clutch.
    pub const ONE: Self = Self(1.0);

    /// Creates a `Fraction` if `value` is within `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::NotFinite`] if `value` is `NaN` or infinite.
    /// Returns [`FractionError::OutOfRange`] if `value` is less than `0.0`
    /// or greater than `1.0`.
    pub fn new(value: f64) -> Result<Self, FractionError> {
        if !value.is_finite() {
            return Err(FractionError::NotFinite(value));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(FractionError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Creates a `Fraction` by clamping a finite `value` into `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::NotFinite`] if `value` is `NaN` or infinite.
    pub fn saturating(value: f64) -> Result<Self, FractionError> {
        if !value.is_finite() {
            return Err(FractionError::NotFinite(value));
        }
        Ok(Self(value.clamp(0.0, 1.0)))
    }

    /// Returns the inner `f64`.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Fraction {
    type Error = FractionError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Fraction::new(value)
    }
}

impl From<Fraction> for f64 {
    fn from(f: Fraction) -> Self {
        f.0
    }
}

impl Mul<f64> for Fraction {
    type Output = f64;
    fn mul(self, rhs: f64) -> Self::Output {
        self.0 * rhs
    }
}

impl Mul<Fraction> for f64 {
    type Output = f64;
    fn mul(self, rhs: Fraction) -> Self::Output {
        self * rhs.0
    }
}

// Safe because the constructors forbid NaN and infinity.
impl Eq for Fraction {}

impl Ord for Fraction {
    /// Values are finite, so `partial_cmp` always returns `Some(_)`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Errors that can occur when constructing a [`Fraction`].
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FractionError {
    /// Input was not finite.
    #[error("value is not finite: {0}")]
    NotFinite(f64),

    /// Input was outside the allowed range.
    #[error("value {0} is outside the range [0, 1]")]
    OutOfRange(f64),
}
