//! `embedded-hal` adapter tests against `embedded-hal-mock`

use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

use mpl3115a2_core::constants::registers::*;
use mpl3115a2_core::hal::{HalBus, HalLine};
use mpl3115a2_core::{
    DeviceConfig, DigitalLine, Edge, EdgeQueue, EdgeSource, Error, Level, Mpl3115a2, RegisterBus,
    ThresholdSetting, Timing,
};

const ADDR: u8 = DEFAULT_ADDRESS;

struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[test]
fn single_register_read_and_write() {
    let expectations = [
        I2cTransaction::write_read(ADDR, vec![REG_WHO_AM_I], vec![WHO_AM_I]),
        I2cTransaction::write(ADDR, vec![REG_CTRL1, 0xB8]),
    ];
    let mut bus = HalBus::new(I2cMock::new(&expectations), ADDR);

    assert_eq!(bus.read_register(REG_WHO_AM_I), Ok(WHO_AM_I));
    bus.write_register(REG_CTRL1, 0xB8).unwrap();

    bus.release().done();
}

#[test]
fn output_registers_read_as_one_burst() {
    let expectations = [I2cTransaction::write_read(ADDR, vec![REG_OUT_P_MSB], vec![0x62, 0xEA, 0x30])];
    let mut bus = HalBus::new(I2cMock::new(&expectations), ADDR);

    let mut buf = [0u8; 3];
    bus.read_registers(REG_OUT_P_MSB, &mut buf).unwrap();
    assert_eq!(buf, [0x62, 0xEA, 0x30]);

    bus.release().done();
}

#[test]
fn threshold_value_written_as_one_frame() {
    let expectations = [
        I2cTransaction::write(ADDR, vec![REG_P_TGT_MSB, 0x01, 0x2C]),
        I2cTransaction::write_read(ADDR, vec![REG_PT_DATA_CFG], vec![0x00]),
        I2cTransaction::write(ADDR, vec![REG_PT_DATA_CFG, PT_DATA_CFG_DREM | PT_DATA_CFG_PDEFE]),
        I2cTransaction::write_read(ADDR, vec![REG_CTRL4], vec![INT_DRDY]),
        I2cTransaction::write(ADDR, vec![REG_CTRL4, INT_DRDY | INT_PW | INT_PTH]),
        I2cTransaction::write_read(ADDR, vec![REG_CTRL5], vec![0x00]),
        I2cTransaction::write(ADDR, vec![REG_CTRL5, INT_PW | INT_PTH]),
    ];
    let mut bus = HalBus::new(I2cMock::new(&expectations), ADDR);

    ThresholdSetting::PressureTarget(300).apply(&mut bus).unwrap();

    bus.release().done();
}

#[test]
fn bus_errors_pass_through() {
    let expectations = [I2cTransaction::write_read(ADDR, vec![REG_WHO_AM_I], vec![0x00]).with_error(ErrorKind::Other)];
    let mut bus = HalBus::new(I2cMock::new(&expectations), ADDR);

    assert_eq!(bus.read_register(REG_WHO_AM_I), Err(ErrorKind::Other));

    bus.release().done();
}

#[test]
fn line_level_follows_pin() {
    let expectations = [
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::Low),
    ];
    let mut line = HalLine::new(PinMock::new(&expectations));

    assert_eq!(line.level().unwrap(), Level::High);
    assert_eq!(line.level().unwrap(), Level::Low);

    line.release().done();
}

#[test]
fn polled_line_posts_only_changes() {
    static EDGES: EdgeQueue = EdgeQueue::new();
    let expectations = [
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::Low),
        PinTransaction::get(PinState::Low),
        PinTransaction::get(PinState::High),
    ];
    let mut line = HalLine::new(PinMock::new(&expectations));
    line.listen(&EDGES).unwrap();

    for _ in 0..4 {
        line.service().unwrap();
    }

    assert_eq!(EDGES.take(), Some(Edge::Falling));
    assert_eq!(EDGES.take(), Some(Edge::Rising));
    assert_eq!(EDGES.take(), None);

    line.release().done();
}

#[test]
fn device_over_hal_adapters() {
    static EDGES: EdgeQueue = EdgeQueue::new();
    let i2c = I2cMock::new(&[
        // identity
        I2cTransaction::write_read(ADDR, vec![REG_WHO_AM_I], vec![WHO_AM_I]),
        // configure: CTRL1 standby + mode, PT_DATA_CFG, CTRL4
        I2cTransaction::write_read(ADDR, vec![REG_CTRL1], vec![0x00]),
        I2cTransaction::write(ADDR, vec![REG_CTRL1, CTRL1_OS_MASK]),
        I2cTransaction::write_read(ADDR, vec![REG_PT_DATA_CFG], vec![0x00]),
        I2cTransaction::write(ADDR, vec![REG_PT_DATA_CFG, PT_DATA_CFG_DREM | PT_DATA_CFG_TDEFE]),
        I2cTransaction::write_read(ADDR, vec![REG_CTRL4], vec![0x00]),
        I2cTransaction::write(ADDR, vec![REG_CTRL4, INT_DRDY]),
        // activate
        I2cTransaction::write_read(ADDR, vec![REG_CTRL1], vec![CTRL1_OS_MASK]),
        I2cTransaction::write(ADDR, vec![REG_CTRL1, CTRL1_OS_MASK | CTRL1_SBYB]),
        // finish + output
        I2cTransaction::write_read(ADDR, vec![REG_INT_SOURCE], vec![INT_DRDY]),
        I2cTransaction::write_read(ADDR, vec![REG_OUT_T_MSB], vec![0x16, 0x80]),
    ]);
    // INT1 is never sampled; INT2 reads HIGH once then LOW
    let int1 = PinMock::new(&[]);
    let int2 = PinMock::new(&[PinTransaction::get(PinState::High), PinTransaction::get(PinState::Low)]);

    let config = DeviceConfig::default().with_timing(Timing::immediate());
    let mut sensor = Mpl3115a2::initialize(
        config,
        HalBus::new(i2c, ADDR),
        HalLine::new(int1),
        HalLine::new(int2),
        NoDelay,
        &EDGES,
    )
    .unwrap();

    assert_eq!(sensor.read_temperature_celsius().unwrap(), 22.5);

    let (bus, int1, int2, _) = sensor.release();
    bus.release().done();
    int1.release().done();
    int2.release().done();
}

#[test]
fn identity_mismatch_over_hal() {
    static EDGES: EdgeQueue = EdgeQueue::new();
    let i2c = I2cMock::new(&[I2cTransaction::write_read(ADDR, vec![REG_WHO_AM_I], vec![0xC5])]);
    let (int1, int2) = (PinMock::new(&[]), PinMock::new(&[]));
    // Mocks share their expectations with clones; keep handles to finish them
    let mut probes = (i2c.clone(), int1.clone(), int2.clone());

    let result = Mpl3115a2::initialize(
        DeviceConfig::default(),
        HalBus::new(i2c, ADDR),
        HalLine::new(int1),
        HalLine::new(int2),
        NoDelay,
        &EDGES,
    );

    match result {
        Err(err @ Error::IdentityMismatch { .. }) => assert_eq!(err.status_code(), Some(300)),
        Err(other) => panic!("unexpected error {other:?}"),
        Ok(_) => panic!("mismatched identity accepted"),
    }
    probes.0.done();
    probes.1.done();
    probes.2.done();
}
