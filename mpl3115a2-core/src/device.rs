//! Device Handle
//!
//! ## Lifecycle
//!
//! ```text
//! initialize()                      reads / setters / dispatch     release()
//!   1. configure INT1, listen ──▶   &mut self serialises every ──▶ hand back
//!   2. configure INT2               bus transaction               bus, lines,
//!   3. WHO_AM_I == 0xC4                                           delay
//! ```
//!
//! A handle only exists once both lines are attached and the identity check
//! passed. Every operation takes `&mut self`, so two register sequences can
//! never interleave on one handle; wrap it in `SharedSensor` (std) to share it
//! between threads.
//!
//! ## Reads
//!
//! Each `read_*` accessor runs one full one-shot trigger sequence, then reads
//! and decodes the output registers. When INT_SOURCE does not report data
//! ready the configured `FailurePolicy` decides the result: 0.0 in the
//! requested unit (logged) or `Error::ConversionFailed`.
//!
//! ## Threshold events
//!
//! INT1 edges are queued by the edge source. `dispatch_pending()` drains the
//! queue, reads INT_SOURCE once per falling edge, re-measures the axis that
//! fired and hands a `ThresholdEvent` to the caller.
//!
//! ```rust,ignore
//! static EDGES: EdgeQueue = EdgeQueue::new();
//!
//! let mut sensor = Mpl3115a2::initialize(config, bus, int1, int2, delay, &EDGES)?;
//! sensor.set_pressure_target(300)?;
//! let feet = sensor.read_altitude_feet()?;
//!
//! sensor.dispatch_pending(|event| println!("{event:?}"))?;
//! ```

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use heapless::String;

use crate::config::{DeviceConfig, FailurePolicy};
use crate::constants::registers::{REG_OUT_P_MSB, REG_OUT_T_MSB};
use crate::decoder::{self, PhysicalValue, RawSample, Unit};
use crate::errors::{DriverResult, Error};
use crate::interrupt::{classify, Dispatch, Edge, EdgeQueue, ThresholdEvent};
use crate::registers::{ControlRegister, Ctrl1, IntSource, Sources};
use crate::startup;
use crate::threshold::ThresholdSetting;
use crate::traits::{DigitalLine, EdgeSource, LineRole, RegisterBus};
use crate::trigger::{Conversion, MeasurementMode, MeasurementTrigger};

/// Error of a device built on bus `B` and lines `L`
pub type DeviceError<B, L> = Error<<B as RegisterBus>::Error, <L as DigitalLine>::Error>;

/// Result of a device operation
pub type DeviceResult<T, B, L> =
    DriverResult<T, <B as RegisterBus>::Error, <L as DigitalLine>::Error>;

/// Longest `describe()` string
pub const DESCRIPTION_LEN: usize = 64;

/// An initialized MPL3115A2
///
/// `L1` carries threshold events (INT1), `L2` carries data ready (INT2). Both
/// lines report the same error type.
pub struct Mpl3115a2<B, L1, L2, D>
where
    B: RegisterBus,
    L1: EdgeSource,
    L2: DigitalLine<Error = L1::Error>,
    D: DelayNs,
{
    config: DeviceConfig,
    bus: B,
    int1: L1,
    int2: L2,
    delay: D,
    edges: &'static EdgeQueue,
    drops_seen: u32,
}

impl<B, L1, L2, D> Mpl3115a2<B, L1, L2, D>
where
    B: RegisterBus,
    L1: EdgeSource,
    L2: DigitalLine<Error = L1::Error>,
    D: DelayNs,
{
    /// Attach both interrupt lines, then verify the chip identity
    ///
    /// Fails with `LineAttach` (status 200 / 201) or `IdentityMismatch`
    /// (status 300). Nothing is written to the chip.
    pub fn initialize(
        config: DeviceConfig,
        mut bus: B,
        mut int1: L1,
        mut int2: L2,
        delay: D,
        edges: &'static EdgeQueue,
    ) -> DeviceResult<Self, B, L1> {
        drv_debug!(
            "initializing MPL3115A2 on bus {} address {:#04x}",
            config.bus,
            config.address
        );

        int1.configure(&config.int1)
            .and_then(|()| int1.listen(edges))
            .map_err(|cause| attach_failed::<B::Error, _>(LineRole::Int1, cause))?;

        int2.configure(&config.int2)
            .map_err(|cause| attach_failed::<B::Error, _>(LineRole::Int2, cause))?;

        startup::validate_identity::<B, L1::Error>(&mut bus)?;

        drv_debug!("MPL3115A2 ready");
        Ok(Self { config, bus, int1, int2, delay, edges, drops_seen: edges.dropped() })
    }

    /// Configuration the handle was built with
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Queue INT1 edges are posted to
    pub fn edges(&self) -> &'static EdgeQueue {
        self.edges
    }

    /// Bus and address summary, e.g. `MPL3115A2 bus 1 address 0x60`
    pub fn describe(&self) -> String<DESCRIPTION_LEN> {
        let mut out = String::new();
        // Fits comfortably; a truncated summary is still useful
        let _ = write!(
            out,
            "MPL3115A2 bus {} address {:#04x}",
            self.config.bus, self.config.address
        );
        out
    }

    /// Software reset; see `startup::soft_reset`
    ///
    /// Threshold programming is lost.
    pub fn reset(&mut self) -> DeviceResult<(), B, L1> {
        startup::soft_reset(&mut self.bus, &mut self.delay, &self.config.timing).map_err(Error::Bus)
    }

    /// Run one blocking trigger sequence for `mode`
    pub fn convert(&mut self, mode: MeasurementMode) -> DeviceResult<Conversion, B, L1> {
        let timing = self.config.timing;
        let mut trigger = MeasurementTrigger::for_mode(mode, &timing);
        trigger.run(&mut self.bus, &mut self.int2, &mut self.delay, &timing)
    }

    /// Configure and activate a conversion without waiting for it
    ///
    /// The pre-conversion quiet time and standby settle still block. Drive the
    /// returned trigger with `poll_conversion()`.
    pub fn start_conversion(&mut self, mode: MeasurementMode) -> DeviceResult<MeasurementTrigger, B, L1> {
        let timing = self.config.timing;
        let mut trigger = MeasurementTrigger::for_mode(mode, &timing);
        trigger.configure(&mut self.bus, &mut self.delay, &timing).map_err(DeviceError::<B, L1>::Bus)?;
        trigger.activate(&mut self.bus).map_err(DeviceError::<B, L1>::Bus)?;
        Ok(trigger)
    }

    /// Sample INT2 once for a conversion started with `start_conversion()`
    ///
    /// Returns `WouldBlock` until the line goes LOW or the schedule runs out;
    /// call again after one poll interval. INT_SOURCE is read once per
    /// trigger; polling a finished trigger returns the same `Conversion`.
    pub fn poll_conversion(
        &mut self,
        trigger: &mut MeasurementTrigger,
    ) -> nb::Result<Conversion, DeviceError<B, L1>> {
        let outcome = trigger.poll(&mut self.int2).map_err(|e| e.map(DeviceError::<B, L1>::Line))?;
        trigger
            .finish(&mut self.bus, outcome)
            .map_err(|e| nb::Error::Other(Error::Bus(e)))
    }

    /// Output registers for `mode`
    pub fn read_raw(&mut self, mode: MeasurementMode) -> DeviceResult<RawSample, B, L1> {
        match mode {
            MeasurementMode::Altitude | MeasurementMode::Pressure => {
                let mut buf = [0u8; 3];
                self.bus.read_registers(REG_OUT_P_MSB, &mut buf).map_err(DeviceError::<B, L1>::Bus)?;
                Ok(RawSample::Barometric(buf))
            }
            MeasurementMode::Temperature => {
                let mut buf = [0u8; 2];
                self.bus.read_registers(REG_OUT_T_MSB, &mut buf).map_err(DeviceError::<B, L1>::Bus)?;
                Ok(RawSample::Thermal(buf))
            }
        }
    }

    /// Convert and decode, `None` if INT_SOURCE did not report data ready
    pub fn measure(&mut self, mode: MeasurementMode) -> DeviceResult<Option<PhysicalValue>, B, L1> {
        let conversion = self.convert(mode)?;
        if !conversion.succeeded() {
            return Ok(None);
        }
        let raw = self.read_raw(mode)?;
        Ok(decoder::decode(mode, raw))
    }

    /// Convert and decode, applying the failure policy
    pub fn read(&mut self, mode: MeasurementMode) -> DeviceResult<PhysicalValue, B, L1> {
        self.read_as(mode, mode.native_unit())
    }

    /// Convert, decode and express the reading in `unit`
    ///
    /// Under `FailurePolicy::Zero` a failed conversion is 0.0 in `unit`, not
    /// the conversion of 0.0 from the native unit.
    fn read_as(&mut self, mode: MeasurementMode, unit: Unit) -> DeviceResult<PhysicalValue, B, L1> {
        let native = match self.measure(mode)? {
            Some(value) => value,
            None => {
                return match self.config.on_failure {
                    FailurePolicy::Zero => {
                        drv_error!("{} conversion failed, reporting 0.0", mode);
                        Ok(PhysicalValue { value: 0.0, unit })
                    }
                    FailurePolicy::Error => Err(Error::ConversionFailed { mode }),
                };
            }
        };
        let value = native.convert(unit).unwrap_or(native.value);
        Ok(PhysicalValue { value, unit })
    }

    fn read_in(&mut self, mode: MeasurementMode, unit: Unit) -> DeviceResult<f64, B, L1> {
        self.read_as(mode, unit).map(|v| v.value)
    }

    /// Altitude in meters
    pub fn read_altitude_meters(&mut self) -> DeviceResult<f64, B, L1> {
        self.read_in(MeasurementMode::Altitude, Unit::Meters)
    }

    /// Altitude in feet
    pub fn read_altitude_feet(&mut self) -> DeviceResult<f64, B, L1> {
        self.read_in(MeasurementMode::Altitude, Unit::Feet)
    }

    /// Temperature in degrees Celsius
    pub fn read_temperature_celsius(&mut self) -> DeviceResult<f64, B, L1> {
        self.read_in(MeasurementMode::Temperature, Unit::Celsius)
    }

    /// Temperature in degrees Fahrenheit
    pub fn read_temperature_fahrenheit(&mut self) -> DeviceResult<f64, B, L1> {
        self.read_in(MeasurementMode::Temperature, Unit::Fahrenheit)
    }

    /// Pressure in pascals
    pub fn read_pressure_pascals(&mut self) -> DeviceResult<f64, B, L1> {
        self.read_in(MeasurementMode::Pressure, Unit::Pascals)
    }

    /// Pressure in millibars
    pub fn read_pressure_millibars(&mut self) -> DeviceResult<f64, B, L1> {
        self.read_in(MeasurementMode::Pressure, Unit::Millibars)
    }

    /// Write a threshold, window or correction value
    pub fn apply_threshold(&mut self, setting: ThresholdSetting) -> DeviceResult<(), B, L1> {
        setting.apply(&mut self.bus).map_err(Error::Bus)
    }

    /// Barometric target: pascals in barometer mode, meters in altimeter mode
    pub fn set_pressure_target(&mut self, value: u16) -> DeviceResult<(), B, L1> {
        self.apply_threshold(ThresholdSetting::PressureTarget(value))
    }

    /// Barometric window around the target
    pub fn set_pressure_window(&mut self, value: u16) -> DeviceResult<(), B, L1> {
        self.apply_threshold(ThresholdSetting::PressureWindow(value))
    }

    /// Temperature target, °C
    pub fn set_temperature_target(&mut self, value: i8) -> DeviceResult<(), B, L1> {
        self.apply_threshold(ThresholdSetting::TemperatureTarget(value))
    }

    /// Temperature window, °C
    pub fn set_temperature_window(&mut self, value: i8) -> DeviceResult<(), B, L1> {
        self.apply_threshold(ThresholdSetting::TemperatureWindow(value))
    }

    /// Sea-level reference for altitude calculation, Pa
    ///
    /// Values above 131 070 Pa saturate at the register maximum.
    pub fn set_local_pressure_correction(&mut self, pascals: u32) -> DeviceResult<(), B, L1> {
        self.apply_threshold(ThresholdSetting::LocalPressureCorrection(pascals))
    }

    /// React to one INT1 edge
    ///
    /// Rising edges are ignored. A falling edge reads INT_SOURCE once and, if
    /// a comparator fired, takes a fresh reading on that axis. The barometric
    /// axis is reported as altitude when CTRL1.ALT is set, pressure otherwise.
    pub fn handle_edge(&mut self, edge: Edge) -> DeviceResult<Option<ThresholdEvent>, B, L1> {
        if edge == Edge::Rising {
            drv_trace!("INT1 released");
            return Ok(None);
        }

        let source = IntSource::read(&mut self.bus).map_err(DeviceError::<B, L1>::Bus)?;
        let ctrl1 = if source.sources().intersects(Sources::PRESSURE_AXIS) {
            Ctrl1::read(&mut self.bus).map_err(DeviceError::<B, L1>::Bus)?
        } else {
            Ctrl1::default()
        };

        let event = match classify(source, ctrl1) {
            Dispatch::Measure(MeasurementMode::Altitude) => {
                ThresholdEvent::AltitudeExceeded { meters: self.read_altitude_meters()? }
            }
            Dispatch::Measure(MeasurementMode::Pressure) => {
                ThresholdEvent::PressureExceeded { millibars: self.read_pressure_millibars()? }
            }
            Dispatch::Measure(MeasurementMode::Temperature) => {
                ThresholdEvent::TemperatureExceeded { fahrenheit: self.read_temperature_fahrenheit()? }
            }
            Dispatch::Unrecognized(_fired) => {
                drv_warn!("INT1 asserted with unrecognized source {:#04x}", _fired.bits());
                return Ok(None);
            }
        };

        drv_debug!("threshold event: {:?}", event);
        Ok(Some(event))
    }

    /// Drain queued INT1 edges, calling `on_event` for every threshold event
    ///
    /// Returns the number of events delivered. Stops at the first error: the
    /// edge being handled when it occurred is consumed, later edges stay
    /// queued.
    pub fn dispatch_pending<F>(&mut self, mut on_event: F) -> DeviceResult<usize, B, L1>
    where
        F: FnMut(ThresholdEvent),
    {
        self.int1.service().map_err(DeviceError::<B, L1>::Line)?;

        let mut delivered = 0;
        while let Some(edge) = self.edges.take() {
            if let Some(event) = self.handle_edge(edge)? {
                on_event(event);
                delivered += 1;
            }
        }

        let dropped = self.edges.dropped();
        if dropped != self.drops_seen {
            drv_warn!("{} INT1 edges dropped (queue full)", dropped.wrapping_sub(self.drops_seen));
            self.drops_seen = dropped;
        }
        Ok(delivered)
    }

    /// Tear down the handle and hand back its capabilities
    pub fn release(self) -> (B, L1, L2, D) {
        (self.bus, self.int1, self.int2, self.delay)
    }
}

fn attach_failed<BE: core::fmt::Debug, LE: core::fmt::Debug>(line: LineRole, cause: LE) -> Error<BE, LE> {
    drv_error!("failed to attach {} line: {:?}", line, cause);
    Error::LineAttach { line, cause }
}
