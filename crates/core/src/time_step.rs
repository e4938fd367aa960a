use std::{fmt, ops::Add, ops::Deref};

use thiserror::Error;
use uom::{
    Conversion,
    si::{f64::Time, time},
};

/// A unit-safe, non-negative, finite duration for one integration tick.
///
/// `TimeStep` wraps a [`Time`] value. Unlike a general time increment it admits
/// zero: a zero-length tick is a valid request that leaves every integrator
/// state unchanged. Negative and non-finite durations are rejected here, so
/// the integrators never divide by anything that could produce NaN or infinity.
///
/// # Construction
///
/// ```
/// use driveline_core::TimeStep;
/// use uom::si::{f64::Time, time::{millisecond, second}};
///
/// let dt = TimeStep::new::<millisecond>(20.0).unwrap();
/// assert!((dt.seconds() - 0.02).abs() < 1e-12);
///
/// let dt = TimeStep::try_from(Time::new::<second>(0.0)).unwrap();
/// assert!(dt.is_zero());
///
/// assert!(TimeStep::new::<second>(-0.01).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeStep(Time);

/// Error type returned when constructing an invalid [`TimeStep`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeStepError {
    #[error("time step must not be negative, got {0} s")]
    Negative(f64),
    #[error("time step must be finite, got {0} s")]
    NotFinite(f64),
}

impl TimeStep {
    /// Constructs a `TimeStep` from a numeric value and unit.
    ///
    /// # Errors
    ///
    /// Returns a [`TimeStepError`] if the value is negative or not finite.
    pub fn new<U>(value: f64) -> Result<Self, TimeStepError>
    where
        U: time::Unit + Conversion<f64, T = f64>,
    {
        Self::from_time(Time::new::<U>(value))
    }

    /// Constructs a `TimeStep` from an existing [`Time`] value.
    ///
    /// # Errors
    ///
    /// Returns a [`TimeStepError`] if the time is negative or not finite.
    pub fn from_time(time: Time) -> Result<Self, TimeStepError> {
        let seconds = time.get::<time::second>();
        if !seconds.is_finite() {
            Err(TimeStepError::NotFinite(seconds))
        } else if seconds < 0.0 {
            Err(TimeStepError::Negative(seconds))
        } else {
            Ok(Self(time))
        }
    }

    /// Returns the duration in seconds.
    #[must_use]
    pub fn seconds(&self) -> f64 {
        self.0.get::<time::second>()
    }

    /// Returns `true` for a zero-length tick.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.seconds() == 0.0
    }

    /// Consumes the `TimeStep` and returns the underlying [`Time`] value.
    #[must_use]
    pub fn into_inner(self) -> Time {
        self.0
    }
}

impl TryFrom<Time> for TimeStep {
    type Error = TimeStepError;
    fn try_from(t: Time) -> Result<Self, Self::Error> {
        Self::from_time(t)
    }
}

impl Deref for TimeStep {
    type Target = Time;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Advances a [`Time`] by one tick.
impl Add<TimeStep> for Time {
    type Output = Time;
    fn add(self, rhs: TimeStep) -> Self::Output {
        self + rhs.0
    }
}

impl fmt::Display for TimeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} s", self.seconds())
    }
}
