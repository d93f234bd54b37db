//! `embedded-hal` adapters
//!
//! Wrap HAL peripherals so they satisfy the driver's capability traits:
//!
//! - `HalBus` turns any blocking `I2c` into a `RegisterBus` at a fixed address
//! - `HalLine` turns any `InputPin` into a `DigitalLine` and a polled
//!   `EdgeSource`
//!
//! ```rust
//! # use embedded_hal_mock::eh1::i2c::{Mock, Transaction};
//! use mpl3115a2_core::hal::HalBus;
//! use mpl3115a2_core::RegisterBus;
//!
//! # let i2c = Mock::new(&[Transaction::write_read(0x60, vec![0x0C], vec![0xC4])]);
//! let mut bus = HalBus::new(i2c, 0x60);
//! assert_eq!(bus.read_register(0x0C).unwrap(), 0xC4);
//! # bus.release().done();
//! ```

use embedded_hal::digital::InputPin;
use embedded_hal::i2c::I2c;
use heapless::Vec;

use crate::interrupt::EdgeQueue;
use crate::traits::{DigitalLine, EdgeSource, Level, RegisterBus};

/// Longest burst write sent as a single I²C frame
const MAX_BURST: usize = 8;

/// Register access over a blocking I²C bus
#[derive(Debug)]
pub struct HalBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> HalBus<I2C> {
    /// Bind `i2c` to the device at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address in use
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RegisterBus for HalBus<I2C> {
    type Error = I2C::Error;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[start], buf)
    }

    fn write_registers(&mut self, start: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut frame: Vec<u8, { MAX_BURST + 1 }> = Vec::new();
        if frame.push(start).is_err() || frame.extend_from_slice(data).is_err() {
            // Too long for one frame; the chip auto-increments either way
            for (offset, byte) in data.iter().enumerate() {
                self.write_register(start.wrapping_add(offset as u8), *byte)?;
            }
            return Ok(());
        }
        self.i2c.write(self.address, &frame)
    }
}

/// A HAL input pin used as an interrupt line
///
/// As an `EdgeSource` it detects edges in software: every `service()` call
/// samples the pin and posts an edge if the level changed since the previous
/// sample. The line is assumed idle (HIGH) before the first sample.
#[derive(Debug)]
pub struct HalLine<P> {
    pin: P,
    sink: Option<&'static EdgeQueue>,
    last: Level,
}

impl<P: InputPin> HalLine<P> {
    /// Wrap `pin`
    pub fn new(pin: P) -> Self {
        Self { pin, sink: None, last: Level::High }
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> DigitalLine for HalLine<P> {
    type Error = P::Error;

    fn level(&mut self) -> Result<Level, Self::Error> {
        if self.pin.is_low()? {
            Ok(Level::Low)
        } else {
            Ok(Level::High)
        }
    }
}

impl<P: InputPin> EdgeSource for HalLine<P> {
    fn listen(&mut self, sink: &'static EdgeQueue) -> Result<(), Self::Error> {
        self.sink = Some(sink);
        Ok(())
    }

    fn service(&mut self) -> Result<(), Self::Error> {
        let level = self.level()?;
        if level != self.last {
            self.last = level;
            if let Some(sink) = self.sink {
                sink.post_level(level);
            }
        }
        Ok(())
    }
}
