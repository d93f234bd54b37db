//! Driver for the NXP MPL3115A2 altimeter / barometer / thermometer
//!
//! Talks to the chip through small capability traits (a register bus, a
//! sampled data-ready line and an edge-reporting threshold line) so it runs
//! the same against real hardware, `embedded-hal` peripherals or a simulated
//! register file.
//!
//! Key constraints:
//! - No heap allocation; `no_std` without the `std` feature
//! - One-shot conversions only, one reading per trigger sequence
//! - INT_SOURCE is read by the device owner only, never from edge context
//!
//! ```no_run
//! use embedded_hal::{delay::DelayNs, digital::InputPin, i2c::I2c};
//! use mpl3115a2_core::hal::{HalBus, HalLine};
//! use mpl3115a2_core::{DeviceConfig, EdgeQueue, Mpl3115a2};
//!
//! static EDGES: EdgeQueue = EdgeQueue::new();
//!
//! fn altitude<I: I2c, P: InputPin, D: DelayNs>(i2c: I, int1: P, int2: P, delay: D) -> Option<f64> {
//!     let config = DeviceConfig::default();
//!     let bus = HalBus::new(i2c, config.address);
//!     let mut sensor = Mpl3115a2::initialize(
//!         config,
//!         bus,
//!         HalLine::new(int1),
//!         HalLine::new(int2),
//!         delay,
//!         &EDGES,
//!     )
//!     .ok()?;
//!
//!     sensor.read_altitude_meters().ok()
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod config;
pub mod constants;
pub mod decoder;
pub mod device;
pub mod errors;
pub mod hal;
pub mod interrupt;
pub mod registers;
#[cfg(feature = "std")]
pub mod shared;
pub mod startup;
pub mod threshold;
pub mod traits;
pub mod trigger;

// Public API
pub use config::{DeviceConfig, FailurePolicy, PollSchedule, Timing};
pub use decoder::{PhysicalValue, RawSample, Unit};
pub use device::{DeviceError, DeviceResult, Mpl3115a2};
pub use errors::{DriverResult, Error};
pub use interrupt::{Edge, EdgeQueue, ThresholdEvent};
#[cfg(feature = "std")]
pub use shared::SharedSensor;
pub use threshold::ThresholdSetting;
pub use traits::{DigitalLine, EdgeSource, Level, LineConfig, LineRole, Pull, RegisterBus};
pub use trigger::{Conversion, MeasurementMode, MeasurementTrigger, PollOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
