//! Timing Constants
//!
//! Delays used while sequencing the chip. The conversion-side values are
//! generous: with OS = 128 a single conversion takes up to 512 ms, and the
//! data-ready line is sampled rather than waited on.

/// Data-ready poll interval for pressure and altitude conversions (ms).
pub const PRESSURE_POLL_INTERVAL_MS: u32 = 40;

/// Data-ready poll interval for temperature conversions (ms).
pub const TEMPERATURE_POLL_INTERVAL_MS: u32 = 20;

/// Maximum number of data-ready samples before a poll is declared timed out.
///
/// Worst case wait: 400 × 40 ms = 16 s (pressure/altitude), 400 × 20 ms = 8 s
/// (temperature).
pub const POLL_ITERATIONS: u32 = 400;

/// Quiet interval before reconfiguring the chip for a conversion (ms).
pub const PRE_CONVERSION_QUIET_MS: u32 = 1_000;

/// Settle time after writing CTRL_REG1 in standby (ms).
pub const STANDBY_SETTLE_MS: u32 = 10;

/// Quiet interval after a conversion completes (ms).
pub const POST_CONVERSION_QUIET_MS: u32 = 500;

/// Settle time between entering standby and issuing a software reset (ms).
pub const RESET_SETTLE_MS: u32 = 10;

/// Time for the chip to reboot after a software reset (ms).
///
/// The I²C interface is disabled while the part reboots; any access before
/// this elapses appears to fail.
pub const RESET_REBOOT_MS: u32 = 10_000;

/// Debounce interval applied to both interrupt lines (µs).
pub const LINE_DEBOUNCE_US: u32 = 4_000;
