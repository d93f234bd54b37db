//! Constants for the MPL3115A2 driver
//!
//! Numeric values live here instead of inline in the sequencing code.
//!
//! ## Organization
//!
//! - **Registers**: addresses, bit positions, identity value
//! - **Timing**: poll schedule and settle/reboot delays
//! - **Units**: conversion factors for derived units

/// Register addresses and bit masks.
pub mod registers;

/// Delays and poll budgets.
pub mod timing;

/// Unit conversion factors.
pub mod units;

pub use registers::{DEFAULT_ADDRESS, DEFAULT_BUS, WHO_AM_I};

pub use timing::{
    POLL_ITERATIONS, PRESSURE_POLL_INTERVAL_MS, TEMPERATURE_POLL_INTERVAL_MS,
    RESET_REBOOT_MS, RESET_SETTLE_MS,
};

pub use units::DEFAULT_SEA_LEVEL_PA;
