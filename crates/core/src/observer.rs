/// Receives solver events and optionally returns a control action.
///
/// Solvers call [`Observer::observe`] once per event. Returning `Some(action)`
/// asks the solver to act on it (for example, to stop early); returning `None`
/// lets the solver continue.
///
/// Closures of the form `FnMut(&E) -> Option<A>` are observers, and `()` is an
/// observer that never acts.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}
