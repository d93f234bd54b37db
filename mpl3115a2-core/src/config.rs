//! Driver configuration
//!
//! Everything the host decides at startup: where the chip lives, which GPIOs
//! carry its interrupt outputs, how long to wait between sequencing steps, and
//! what a failed conversion should look like to the caller.

use crate::constants::registers::{DEFAULT_ADDRESS, DEFAULT_BUS};
use crate::constants::timing::*;
use crate::traits::LineConfig;
use crate::trigger::MeasurementMode;

/// What a read accessor returns when INT_SOURCE never reports data ready
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailurePolicy {
    /// Log the failure and return 0.0 (historical behavior)
    #[default]
    Zero,
    /// Return `Error::ConversionFailed`
    Error,
}

/// Data-ready polling schedule for one measurement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PollSchedule {
    /// Sleep between samples of the data-ready line (ms)
    pub interval_ms: u32,
    /// Samples before the poll is declared timed out
    pub iterations: u32,
}

impl PollSchedule {
    /// Worst-case time spent polling (ms)
    pub const fn budget_ms(&self) -> u64 {
        self.interval_ms as u64 * self.iterations as u64
    }
}

/// Sequencing delays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timing {
    /// Poll schedule for pressure and altitude conversions
    pub barometric_poll: PollSchedule,
    /// Poll schedule for temperature conversions
    pub temperature_poll: PollSchedule,
    /// Quiet time before a conversion is configured (ms)
    pub pre_conversion_ms: u32,
    /// Settle time after the standby write (ms)
    pub standby_settle_ms: u32,
    /// Quiet time after a conversion (ms)
    pub post_conversion_ms: u32,
    /// Settle time between standby and software reset (ms)
    pub reset_settle_ms: u32,
    /// Reboot time after software reset (ms)
    pub reset_reboot_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            barometric_poll: PollSchedule {
                interval_ms: PRESSURE_POLL_INTERVAL_MS,
                iterations: POLL_ITERATIONS,
            },
            temperature_poll: PollSchedule {
                interval_ms: TEMPERATURE_POLL_INTERVAL_MS,
                iterations: POLL_ITERATIONS,
            },
            pre_conversion_ms: PRE_CONVERSION_QUIET_MS,
            standby_settle_ms: STANDBY_SETTLE_MS,
            post_conversion_ms: POST_CONVERSION_QUIET_MS,
            reset_settle_ms: RESET_SETTLE_MS,
            reset_reboot_ms: RESET_REBOOT_MS,
        }
    }
}

impl Timing {
    /// Poll schedule used for `mode`
    pub const fn poll_for(&self, mode: MeasurementMode) -> PollSchedule {
        match mode {
            MeasurementMode::Altitude | MeasurementMode::Pressure => self.barometric_poll,
            MeasurementMode::Temperature => self.temperature_poll,
        }
    }

    /// No sleeps at all; for simulated hardware
    pub const fn immediate() -> Self {
        let poll = PollSchedule { interval_ms: 0, iterations: POLL_ITERATIONS };
        Self {
            barometric_poll: poll,
            temperature_poll: poll,
            pre_conversion_ms: 0,
            standby_settle_ms: 0,
            post_conversion_ms: 0,
            reset_settle_ms: 0,
            reset_reboot_ms: 0,
        }
    }
}

/// Full driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Host bus number (informational; the bus is already opened)
    pub bus: u8,
    /// 7-bit device address
    pub address: u8,
    /// INT1: threshold events
    pub int1: LineConfig,
    /// INT2: data ready
    pub int2: LineConfig,
    /// Sequencing delays
    pub timing: Timing,
    /// Behavior on conversion failure
    pub on_failure: FailurePolicy,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            bus: DEFAULT_BUS,
            address: DEFAULT_ADDRESS,
            int1: LineConfig::interrupt(18),
            int2: LineConfig::interrupt(27),
            timing: Timing::default(),
            on_failure: FailurePolicy::default(),
        }
    }
}

impl DeviceConfig {
    /// Config for a chip on `bus`/`address` with interrupt lines on the given GPIOs
    pub fn new(bus: u8, address: u8, int1_gpio: u8, int2_gpio: u8) -> Self {
        Self {
            bus,
            address,
            int1: LineConfig::interrupt(int1_gpio),
            int2: LineConfig::interrupt(int2_gpio),
            ..Self::default()
        }
    }

    /// Replace the timing
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Replace the failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_failure = policy;
        self
    }
}
