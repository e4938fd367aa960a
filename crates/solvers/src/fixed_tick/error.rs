use std::error::Error as StdError;

/// Errors that can occur during a fixed-tick run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("integrator error at tick {tick}: {source}")]
    Integrator {
        /// The tick that failed (1 for the first tick).
        tick: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn integrator<E: StdError + Send + Sync + 'static>(tick: usize, err: E) -> Self {
        Self::Integrator {
            tick,
            source: Box::new(err),
        }
    }
}
