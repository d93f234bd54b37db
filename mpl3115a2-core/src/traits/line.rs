//! Digital line capabilities
//!
//! The chip signals through two open-drain interrupt outputs. INT2 carries
//! data-ready and is sampled by the conversion loop; INT1 carries the
//! threshold/window comparators and delivers edges. Line creation,
//! debouncing and edge detection live outside the driver.

use core::fmt::{self, Debug};

use crate::constants::timing::LINE_DEBOUNCE_US;
use crate::interrupt::EdgeQueue;

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Line reads high (inactive for the chip's active-low outputs)
    High,
    /// Line reads low
    Low,
}

/// Pull resistor setting requested for a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pull {
    /// No internal pull; the board provides one
    Off,
    /// Internal pull-up
    Up,
    /// Internal pull-down
    Down,
}

/// Which chip output a line is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineRole {
    /// INT1: threshold and window events, edge-driven
    Int1,
    /// INT2: data ready, sampled
    Int2,
}

impl fmt::Display for LineRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRole::Int1 => f.write_str("INT1"),
            LineRole::Int2 => f.write_str("INT2"),
        }
    }
}

/// Electrical configuration handed to a line when the driver attaches it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineConfig {
    /// Host GPIO number (informational; the line is already bound)
    pub gpio: u8,
    /// Pull resistor
    pub pull: Pull,
    /// Debounce interval in microseconds
    pub debounce_us: u32,
}

impl LineConfig {
    /// Configuration used for both interrupt outputs on the given GPIO
    pub const fn interrupt(gpio: u8) -> Self {
        Self {
            gpio,
            pull: Pull::Off,
            debounce_us: LINE_DEBOUNCE_US,
        }
    }
}

/// A digital input whose current level can be sampled
pub trait DigitalLine {
    /// Line error type
    type Error: Debug;

    /// Apply pull/debounce settings. Called once by the driver during
    /// initialization; a failure here makes the driver unusable.
    fn configure(&mut self, _config: &LineConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Sample the current level.
    fn level(&mut self) -> Result<Level, Self::Error>;
}

/// A digital input that can report edges
///
/// Implementations forward every level change into `sink`, typically from a
/// GPIO interrupt handler or an event thread. They must not call back into
/// the driver; the device owner drains the queue.
pub trait EdgeSource: DigitalLine {
    /// Start forwarding edges into `sink`.
    fn listen(&mut self, sink: &'static EdgeQueue) -> Result<(), Self::Error>;

    /// Called by the device owner before it drains the queue.
    ///
    /// Sources without hardware edge detection sample the line here and post
    /// any change they see. Interrupt-driven sources post on their own and
    /// keep the default.
    fn service(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
