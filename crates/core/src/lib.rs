//! Core traits and types for fixed-timestep driveline integration.
//!
//! This crate defines the shared abstractions that the driveline models and
//! solvers build on:
//!
//! - [`TickIntegrator`]: a pure `(state, control, dt) -> state'` update
//! - [`Tick`]: the state and diagnostics produced by one tick
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`TimeStep`]: a validated, non-negative tick duration
//! - [`Fraction`]: a control level in `[0, 1]`
//! - [`constraint`]: construction-time numeric invariants

pub mod constraint;

mod fraction;
mod integrator;
mod observer;
mod time_step;

pub use fraction::{Fraction, FractionError};
pub use integrator::{Tick, TickIntegrator, TickOf};
pub use observer::Observer;
pub use time_step::{TimeStep, TimeStepError};
