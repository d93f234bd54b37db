//! Identity check and software reset
//!
//! Both run before the chip is trusted for anything else. The identity check
//! gates construction of the device handle; the reset puts the part back into
//! its power-on register state.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;

use crate::config::Timing;
use crate::constants::registers::{REG_WHO_AM_I, WHO_AM_I};
use crate::errors::{DriverResult, Error};
use crate::registers::{ControlRegister, Ctrl1};
use crate::traits::RegisterBus;

/// Read WHO_AM_I
pub fn read_identity<B: RegisterBus>(bus: &mut B) -> Result<u8, B::Error> {
    bus.read_register(REG_WHO_AM_I)
}

/// Confirm the device is an MPL3115A2
///
/// Exactly one register read. A mismatch is returned as
/// `Error::IdentityMismatch` and the caller must not touch the device further.
pub fn validate_identity<B, LE>(bus: &mut B) -> DriverResult<(), B::Error, LE>
where
    B: RegisterBus,
    LE: Debug,
{
    let found = read_identity(bus).map_err(Error::<B::Error, LE>::Bus)?;
    if found == WHO_AM_I {
        drv_trace!("WHO_AM_I ok ({:#04x})", found);
        Ok(())
    } else {
        drv_error!("WHO_AM_I mismatch: found {:#04x}, expected {:#04x}", found, WHO_AM_I);
        Err(Error::IdentityMismatch { found, expected: WHO_AM_I })
    }
}

/// Enter standby, then issue a software reset and wait for the reboot
///
/// The chip disables its I²C interface as soon as RST is written, so the
/// acknowledge for that very write is frequently lost. An error from the
/// reset write is logged and swallowed; failure shows up later as a failed
/// identity check or conversion.
pub fn soft_reset<B, D>(bus: &mut B, delay: &mut D, timing: &Timing) -> Result<(), B::Error>
where
    B: RegisterBus,
    D: DelayNs,
{
    drv_trace!(">>> reset");
    let original = Ctrl1::read(bus)?;

    bus.write_register(Ctrl1::ADDRESS, original.with_active(false).bits())?;
    delay.delay_ms(timing.reset_settle_ms);

    if let Err(_e) = bus.write_register(Ctrl1::ADDRESS, original.with_reset().bits()) {
        drv_debug!("reset write not acknowledged (expected while rebooting): {:?}", _e);
    }
    delay.delay_ms(timing.reset_reboot_ms);

    drv_trace!("<<< reset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::registers::{CTRL1_RST, CTRL1_SBYB, REG_CTRL1};

    #[derive(Default)]
    struct Recorder {
        who: u8,
        ctrl1: u8,
        reads: usize,
        writes: heapless::Vec<(u8, u8), 8>,
        fail_reset_write: bool,
    }

    impl RegisterBus for Recorder {
        type Error = &'static str;

        fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
            self.reads += 1;
            match register {
                REG_WHO_AM_I => Ok(self.who),
                REG_CTRL1 => Ok(self.ctrl1),
                _ => Err("unexpected read"),
            }
        }

        fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
            if self.fail_reset_write && value & CTRL1_RST != 0 {
                return Err("nack");
            }
            self.writes.push((register, value)).map_err(|_| "log full")
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    #[test]
    fn accepts_mpl3115a2_signature() {
        let mut bus = Recorder { who: 0xC4, ..Default::default() };
        assert_eq!(validate_identity::<_, ()>(&mut bus), Ok(()));
        assert_eq!(bus.reads, 1);
    }

    #[test]
    fn rejects_other_signature_after_one_read() {
        let mut bus = Recorder { who: 0xC5, ..Default::default() };
        let err = validate_identity::<_, ()>(&mut bus).unwrap_err();
        assert_eq!(err, Error::IdentityMismatch { found: 0xC5, expected: 0xC4 });
        assert_eq!(bus.reads, 1);
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn reset_goes_through_standby_first() {
        let mut bus = Recorder { ctrl1: 0xB9, ..Default::default() };
        soft_reset(&mut bus, &mut NoDelay, &Timing::immediate()).unwrap();

        assert_eq!(bus.writes.as_slice(), &[
            (REG_CTRL1, 0xB9 & !CTRL1_SBYB),
            (REG_CTRL1, 0xB9 | CTRL1_RST),
        ]);
    }

    #[test]
    fn lost_reset_ack_is_not_an_error() {
        let mut bus = Recorder { ctrl1: 0x00, fail_reset_write: true, ..Default::default() };
        assert!(soft_reset(&mut bus, &mut NoDelay, &Timing::immediate()).is_ok());
        assert_eq!(bus.writes.len(), 1);
    }
}
