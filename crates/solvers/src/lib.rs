//! Run loops for driveline integrators.
//!
//! - [`fixed_tick`] runs an integrator for a tick budget or until a target
//!   state is reached, recording every snapshot.
//! - [`Driver`] advances an integrator one host frame at a time and can be
//!   switched into a test mode where only explicit ticks advance it.
//! - [`ControlSource`] supplies the control for each tick.

mod control;
mod driver;
pub mod fixed_tick;

pub use control::{Constant, ControlSource};
pub use driver::Driver;
