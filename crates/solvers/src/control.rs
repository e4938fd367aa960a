/// Supplies the control inputs for each tick.
///
/// Integrators never read input devices themselves. A harness, a keyboard
/// handler or a scripted test provides controls through this trait instead,
/// and the driver or solver asks for them immediately before each tick.
///
/// Closures of the form `FnMut(usize, &S) -> C` are control sources, where the
/// first argument is the number of ticks completed so far.
pub trait ControlSource<S, C> {
    /// Returns the control to hold during the next tick.
    fn control(&mut self, tick: usize, state: &S) -> C;
}

/// A control source that always returns the same control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Constant<C>(pub C);

impl<S, C: Clone> ControlSource<S, C> for Constant<C> {
    fn control(&mut self, _tick: usize, _state: &S) -> C {
        self.0.clone()
    }
}

impl<S, C, F> ControlSource<S, C> for F
where
    F: FnMut(usize, &S) -> C,
{
    fn control(&mut self, tick: usize, state: &S) -> C {
        self(tick, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_ignores_state() {
        let mut source = Constant(3.5);
        assert_eq!(source.control(0, &1.0), 3.5);
        assert_eq!(source.control(99, &-1.0), 3.5);
    }

    #[test]
    fn closure_sees_tick_and_state() {
        let mut calls = 0;
        let mut source = |tick: usize, state: &f64| {
            calls += 1;
            if tick < 2 { *state } else { 0.0 }
        };

        assert_eq!(source.control(0, &4.0), 4.0);
        assert_eq!(source.control(1, &5.0), 5.0);
        assert_eq!(source.control(2, &6.0), 0.0);
        assert_eq!(calls, 3);
    }
}
