//! Register bus capability
//!
//! The driver never talks to an I²C peripheral directly. It needs exactly four
//! primitives at a fixed device address, and everything else (bus locking,
//! clock configuration, retries) belongs to whoever implements this trait.

use core::fmt::Debug;

/// Byte-wide register access to a single device.
pub trait RegisterBus {
    /// Transport error type
    type Error: Debug;

    /// Read one register.
    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error>;

    /// Write one register.
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;

    /// Read consecutive registers starting at `start`.
    ///
    /// The default issues one single-register read per byte, which is what
    /// the chip's auto-increment would do anyway. Transports that support a
    /// burst read should override it.
    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        for (offset, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_register(start.wrapping_add(offset as u8))?;
        }
        Ok(())
    }

    /// Write consecutive registers starting at `start`.
    fn write_registers(&mut self, start: u8, data: &[u8]) -> Result<(), Self::Error> {
        for (offset, byte) in data.iter().enumerate() {
            self.write_register(start.wrapping_add(offset as u8), *byte)?;
        }
        Ok(())
    }
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    type Error = T::Error;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        (**self).read_register(register)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        (**self).write_register(register, value)
    }

    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_registers(start, buf)
    }

    fn write_registers(&mut self, start: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_registers(start, data)
    }
}
