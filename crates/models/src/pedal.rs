use driveline_core::{
    Fraction, TimeStep,
    constraint::{Constrained, ConstraintError, StrictlyPositive},
};

/// A key-driven pedal.
///
/// While pressed the position rises toward fully pressed at `rate` per
/// second; while released it falls back toward zero at the same rate.
/// The position is always a valid [`Fraction`].
///
/// # Example
///
/// ```
/// use driveline_core::{Fraction, TimeStep};
/// use driveline_models::Pedal;
/// use uom::si::time::second;
///
/// let mut throttle = Pedal::new(2.0).unwrap();
/// let dt = TimeStep::new::<second>(0.25).unwrap();
///
/// assert_eq!(throttle.update(true, dt).get(), 0.5);
/// assert_eq!(throttle.update(true, dt), Fraction::ONE);
/// assert_eq!(throttle.update(false, dt).get(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pedal {
    position: Fraction,
    rate: Constrained<f64, StrictlyPositive>,
}

impl Pedal {
    /// Creates a released pedal that moves at `rate` full strokes per second.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `rate` is zero, negative, or NaN.
    pub fn new(rate: f64) -> Result<Self, ConstraintError> {
        Ok(Self {
            position: Fraction::ZERO,
            rate: StrictlyPositive::new(rate)?,
        })
    }

    /// Returns the pedal moved to `position`.
    #[must_use]
    pub fn with_position(self, position: Fraction) -> Self {
        Self { position, ..self }
    }

    #[must_use]
    pub fn position(&self) -> Fraction {
        self.position
    }

    /// Moves the pedal for one tick and returns the new position.
    pub fn update(&mut self, pressed: bool, dt: TimeStep) -> Fraction {
        if dt.is_zero() {
            return self.position;
        }

        let travel = self.rate.as_ref() * dt.seconds();
        let target = if pressed {
            self.position.get() + travel
        } else {
            self.position.get() - travel
        };

        // An infinite rate moves the pedal straight to its end stop.
        self.position = Fraction::saturating(target).unwrap_or(if pressed {
            Fraction::ONE
        } else {
            Fraction::ZERO
        });
        self.position
    }
}
