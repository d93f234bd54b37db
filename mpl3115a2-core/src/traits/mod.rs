//! Capability traits the driver is generic over
//!
//! These are the seams to the host platform: a register bus and two digital
//! lines. Keep them small; the `hal` module adapts `embedded-hal` types to
//! them.

mod bus;
mod line;

pub use bus::RegisterBus;
pub use line::{DigitalLine, EdgeSource, Level, LineConfig, LineRole, Pull};
