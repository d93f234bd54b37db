//! One-Shot Measurement Trigger
//!
//! ## State Machine
//!
//! Every reading, whatever its type, walks the same path:
//!
//! ```text
//!            configure()              activate()              poll() ...
//!   Idle ───────────────▶ Standby ───────────────▶ ActiveWaiting ──┬──▶ DataReady
//!        CTRL1: SBYB=0,   Configured  CTRL1: SBYB=1                └──▶ TimedOut
//!        ALT, OS=128                                                       │
//!        PT_DATA_CFG: DREM + axis                   finish(): read INT_SOURCE
//!        CTRL4: INT_EN_DRDY                          success = SRC_DRDY set
//!                                                                          │
//!                                                                          ▼
//!                                                                  Finished(Conversion)
//! ```
//!
//! INT_SOURCE clears on read, so `finish()` reads it once per trigger; later
//! calls return the stored `Conversion`.
//!
//! The three measurement modes differ only in the ALT bit, the PT_DATA_CFG
//! event bit and the poll interval, so one machine is parameterised by
//! `MeasurementMode` instead of being written three times.
//!
//! ## Two-Stage Success Test
//!
//! Sampling INT2 only decides when to stop waiting. Whether the output
//! registers are trusted is decided by SRC_DRDY in INT_SOURCE, read once after
//! the poll regardless of how it ended:
//!
//! | Poll outcome | SRC_DRDY | `Conversion::succeeded()` |
//! |--------------|----------|---------------------------|
//! | DataReady    | set      | true                      |
//! | DataReady    | clear    | false                     |
//! | TimedOut     | set      | true                      |
//! | TimedOut     | clear    | false                     |
//!
//! A timed-out poll is therefore not an error by itself.
//!
//! ## Blocking and Non-Blocking Use
//!
//! `run()` drives the whole sequence with the configured sleeps. Callers that
//! own their scheduling can call `configure()`, `activate()`, then `poll()`
//! until it stops returning `nb::Error::WouldBlock`, sleeping one poll
//! interval between calls, then `finish()`.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::config::{PollSchedule, Timing};
use crate::decoder::Unit;
use crate::errors::{DriverResult, Error};
use crate::registers::{ControlRegister, Ctrl1, Ctrl4, IntSource, Oversample, PtDataCfg, Sources};
use crate::traits::{DigitalLine, Level, RegisterBus};

/// Measurement type requested from the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeasurementMode {
    /// Altimeter mode, meters
    Altitude,
    /// Barometer mode, pascals
    Pressure,
    /// Temperature, degrees Celsius (runs in barometer mode)
    Temperature,
}

impl MeasurementMode {
    /// Unit the decoder produces for this mode
    pub const fn native_unit(self) -> Unit {
        match self {
            MeasurementMode::Altitude => Unit::Meters,
            MeasurementMode::Pressure => Unit::Pascals,
            MeasurementMode::Temperature => Unit::Celsius,
        }
    }

    /// Whether CTRL1.ALT is set for this mode
    pub const fn uses_altimeter(self) -> bool {
        matches!(self, MeasurementMode::Altitude)
    }

    /// CTRL1 with this mode's bits applied over `ctrl1`
    const fn apply_mode(self, ctrl1: Ctrl1) -> Ctrl1 {
        ctrl1
            .with_altimeter(self.uses_altimeter())
            .with_oversample(Oversample::MAX)
    }

    /// PT_DATA_CFG with this mode's event bits enabled
    const fn apply_events(self, cfg: PtDataCfg) -> PtDataCfg {
        match self {
            MeasurementMode::Altitude | MeasurementMode::Pressure => cfg.enable_pressure_events(),
            MeasurementMode::Temperature => cfg.enable_temperature_events(),
        }
    }
}

impl fmt::Display for MeasurementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MeasurementMode::Altitude => "altitude",
            MeasurementMode::Pressure => "pressure",
            MeasurementMode::Temperature => "temperature",
        })
    }
}

/// Position in the trigger sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    /// Nothing written yet
    Idle,
    /// Standby with mode, events and DRDY enable written
    StandbyConfigured,
    /// SBYB set; `samples` INT2 reads so far
    ActiveWaiting {
        /// Samples taken that read HIGH
        samples: u32,
    },
    /// INT2 read LOW
    DataReady {
        /// HIGH reads before the LOW one
        samples: u32,
    },
    /// Iteration budget spent without INT2 going LOW
    TimedOut,
    /// INT_SOURCE read; the outcome is final
    Finished(Conversion),
}

/// How the INT2 poll ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// INT2 went LOW after `samples` HIGH reads
    DataReady {
        /// HIGH reads before the LOW one
        samples: u32,
    },
    /// INT2 never went LOW
    TimedOut,
}

/// Result of one trigger sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    /// Requested measurement
    pub mode: MeasurementMode,
    /// How the poll ended
    pub poll: PollOutcome,
    /// INT_SOURCE as read after the poll
    pub source: IntSource,
}

impl Conversion {
    /// SRC_DRDY was set; the output registers hold a fresh conversion
    pub const fn succeeded(&self) -> bool {
        self.source.data_ready()
    }

    /// The poll budget ran out
    pub const fn timed_out(&self) -> bool {
        matches!(self.poll, PollOutcome::TimedOut)
    }
}

/// Parameterised one-shot trigger for a single measurement
#[derive(Debug, Clone)]
pub struct MeasurementTrigger {
    mode: MeasurementMode,
    schedule: PollSchedule,
    state: TriggerState,
}

impl MeasurementTrigger {
    /// New trigger in `Idle`
    pub const fn new(mode: MeasurementMode, schedule: PollSchedule) -> Self {
        Self {
            mode,
            schedule,
            state: TriggerState::Idle,
        }
    }

    /// Trigger using the schedule `timing` assigns to `mode`
    pub const fn for_mode(mode: MeasurementMode, timing: &Timing) -> Self {
        Self::new(mode, timing.poll_for(mode))
    }

    /// Requested measurement
    pub const fn mode(&self) -> MeasurementMode {
        self.mode
    }

    /// Poll schedule in use
    pub const fn schedule(&self) -> PollSchedule {
        self.schedule
    }

    /// Current state
    pub const fn state(&self) -> TriggerState {
        self.state
    }

    /// `Idle → StandbyConfigured`
    ///
    /// Each register is an independent read-modify-write, so bits owned by
    /// threshold configuration survive.
    pub fn configure<B, D>(&mut self, bus: &mut B, delay: &mut D, timing: &Timing) -> Result<(), B::Error>
    where
        B: RegisterBus,
        D: DelayNs,
    {
        drv_trace!(">>> configure {}", self.mode);
        delay.delay_ms(timing.pre_conversion_ms);

        let mode = self.mode;
        Ctrl1::modify(bus, |r| mode.apply_mode(r.with_active(false)))?;
        delay.delay_ms(timing.standby_settle_ms);

        PtDataCfg::modify(bus, |r| mode.apply_events(r))?;
        Ctrl4::modify(bus, |r| r.enable(Sources::DATA_READY))?;

        self.state = TriggerState::StandbyConfigured;
        drv_trace!("<<< configure {}", self.mode);
        Ok(())
    }

    /// `StandbyConfigured → ActiveWaiting`: set SBYB to start the conversion
    pub fn activate<B: RegisterBus>(&mut self, bus: &mut B) -> Result<(), B::Error> {
        let mode = self.mode;
        let ctrl1 = Ctrl1::modify(bus, |r| mode.apply_mode(r).with_active(true))?;
        drv_trace!("activate {}: CTRL1 = {:#04x}", self.mode, ctrl1.bits());

        self.state = TriggerState::ActiveWaiting { samples: 0 };
        Ok(())
    }

    /// Sample INT2 once
    ///
    /// Returns `WouldBlock` while the line is HIGH and budget remains; the
    /// caller sleeps one poll interval before calling again. Once the machine
    /// has reached a terminal state the cached outcome is returned without
    /// sampling. Before `activate()` nothing is sampled and `WouldBlock` is
    /// returned.
    pub fn poll<L: DigitalLine>(&mut self, line: &mut L) -> nb::Result<PollOutcome, L::Error> {
        match self.state {
            TriggerState::ActiveWaiting { samples } => {
                if samples >= self.schedule.iterations {
                    drv_debug!("INT2 timed out after {} samples ({})", samples, self.mode);
                    self.state = TriggerState::TimedOut;
                    return Ok(PollOutcome::TimedOut);
                }

                match line.level().map_err(nb::Error::Other)? {
                    Level::Low => {
                        self.state = TriggerState::DataReady { samples };
                        Ok(PollOutcome::DataReady { samples })
                    }
                    Level::High => {
                        drv_trace!("INT2 high, sample {}", samples);
                        self.state = TriggerState::ActiveWaiting { samples: samples + 1 };
                        Err(nb::Error::WouldBlock)
                    }
                }
            }
            TriggerState::DataReady { samples } => Ok(PollOutcome::DataReady { samples }),
            TriggerState::TimedOut => Ok(PollOutcome::TimedOut),
            TriggerState::Finished(conversion) => Ok(conversion.poll),
            TriggerState::Idle | TriggerState::StandbyConfigured => Err(nb::Error::WouldBlock),
        }
    }

    /// Read INT_SOURCE and report the conversion
    ///
    /// Runs whatever the poll outcome was; only SRC_DRDY decides success.
    /// Once finished, the stored conversion is returned and `poll` is ignored.
    pub fn finish<B: RegisterBus>(&mut self, bus: &mut B, poll: PollOutcome) -> Result<Conversion, B::Error> {
        if let TriggerState::Finished(conversion) = self.state {
            return Ok(conversion);
        }

        let source = IntSource::read(bus)?;
        let conversion = Conversion { mode: self.mode, poll, source };
        self.state = TriggerState::Finished(conversion);
        drv_trace!(
            "finish {}: INT_SOURCE = {:#04x}, succeeded = {}",
            self.mode,
            source.bits(),
            conversion.succeeded()
        );
        Ok(conversion)
    }

    /// Drive the full blocking sequence
    pub fn run<B, L, D>(
        &mut self,
        bus: &mut B,
        line: &mut L,
        delay: &mut D,
        timing: &Timing,
    ) -> DriverResult<Conversion, B::Error, L::Error>
    where
        B: RegisterBus,
        L: DigitalLine,
        D: DelayNs,
    {
        self.configure(bus, delay, timing).map_err(Error::<B::Error, L::Error>::Bus)?;
        self.activate(bus).map_err(Error::<B::Error, L::Error>::Bus)?;

        let outcome = loop {
            match self.poll(line) {
                Ok(outcome) => break outcome,
                Err(nb::Error::WouldBlock) => delay.delay_ms(self.schedule.interval_ms),
                Err(nb::Error::Other(e)) => return Err(Error::Line(e)),
            }
        };

        let conversion = self.finish(bus, outcome).map_err(Error::<B::Error, L::Error>::Bus)?;
        delay.delay_ms(timing.post_conversion_ms);
        Ok(conversion)
    }
}
