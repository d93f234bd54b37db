//! Simulated MPL3115A2 register file
//!
//! Models just enough of the chip for the driver's sequences:
//! - WHO_AM_I is configurable
//! - INT_SOURCE clears when read
//! - Setting SBYB completes a conversion instantly when `converts` is on:
//!   SRC_DRDY is latched and the output registers are loaded for the mode
//!   selected by CTRL1.ALT
//! - Writing RST returns every register to zero
//!
//! State lives behind an `Arc<Mutex<_>>`, so a clone handed to the driver and
//! one kept by the test see the same registers.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, ThreadId};

use mpl3115a2_core::constants::registers::*;
use mpl3115a2_core::RegisterBus;

/// Error returned by a bus with `fail_bus` set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

/// One register write as the chip saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    /// Thread that issued it
    pub thread: ThreadId,
    /// Register address
    pub register: u8,
    /// Value written
    pub value: u8,
}

#[derive(Debug)]
pub struct ChipState {
    pub regs: [u8; 0x30],
    pub converts: bool,
    pub fail_bus: bool,
    pub altimeter_out: [u8; 3],
    pub barometer_out: [u8; 3],
    pub thermal_out: [u8; 2],
    pub reads: Vec<u8>,
    pub writes: Vec<Write>,
}

/// Cloneable bus onto one simulated chip
#[derive(Debug, Clone)]
pub struct SimulatedChip {
    state: Arc<Mutex<ChipState>>,
}

impl SimulatedChip {
    /// Genuine MPL3115A2 that converts on activation
    pub fn new() -> Self {
        let mut regs = [0u8; 0x30];
        regs[REG_WHO_AM_I as usize] = WHO_AM_I;
        Self {
            state: Arc::new(Mutex::new(ChipState {
                regs,
                converts: true,
                fail_bus: false,
                altimeter_out: [0; 3],
                barometer_out: [0; 3],
                thermal_out: [0; 2],
                reads: Vec::new(),
                writes: Vec::new(),
            })),
        }
    }

    /// A different part at the same address
    pub fn with_identity(identity: u8) -> Self {
        let chip = Self::new();
        chip.set(REG_WHO_AM_I, identity);
        chip
    }

    pub fn state(&self) -> MutexGuard<'_, ChipState> {
        self.state.lock().unwrap()
    }

    pub fn load_outputs(&self, altimeter: [u8; 3], barometer: [u8; 3], thermal: [u8; 2]) {
        let mut state = self.state();
        state.altimeter_out = altimeter;
        state.barometer_out = barometer;
        state.thermal_out = thermal;
    }

    pub fn set_converts(&self, converts: bool) {
        self.state().converts = converts;
    }

    pub fn set_fail_bus(&self, fail: bool) {
        self.state().fail_bus = fail;
    }

    /// Poke a register without logging a write
    pub fn set(&self, register: u8, value: u8) {
        self.state().regs[register as usize] = value;
    }

    /// Peek a register without side effects
    pub fn get(&self, register: u8) -> u8 {
        self.state().regs[register as usize]
    }

    pub fn writes(&self) -> Vec<Write> {
        self.state().writes.clone()
    }

    /// (register, value) of every write, in order
    pub fn write_pairs(&self) -> Vec<(u8, u8)> {
        self.state().writes.iter().map(|w| (w.register, w.value)).collect()
    }

    pub fn reads(&self) -> Vec<u8> {
        self.state().reads.clone()
    }

    pub fn clear_log(&self) {
        let mut state = self.state();
        state.reads.clear();
        state.writes.clear();
    }
}

impl ChipState {
    fn complete_conversion(&mut self) {
        let ctrl1 = self.regs[REG_CTRL1 as usize];
        let barometric = if ctrl1 & CTRL1_ALT != 0 { self.altimeter_out } else { self.barometer_out };
        self.regs[REG_OUT_P_MSB as usize..=REG_OUT_P_LSB as usize].copy_from_slice(&barometric);
        self.regs[REG_OUT_T_MSB as usize..=REG_OUT_T_LSB as usize].copy_from_slice(&self.thermal_out);
        self.regs[REG_INT_SOURCE as usize] |= INT_DRDY;
    }

    fn power_on(&mut self) {
        let identity = self.regs[REG_WHO_AM_I as usize];
        self.regs = [0; 0x30];
        self.regs[REG_WHO_AM_I as usize] = identity;
    }
}

impl RegisterBus for SimulatedChip {
    type Error = BusFault;

    fn read_register(&mut self, register: u8) -> Result<u8, BusFault> {
        let mut state = self.state();
        if state.fail_bus {
            return Err(BusFault);
        }
        state.reads.push(register);
        let value = state.regs[register as usize];
        if register == REG_INT_SOURCE {
            state.regs[register as usize] = 0;
        }
        Ok(value)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), BusFault> {
        let mut state = self.state();
        if state.fail_bus {
            return Err(BusFault);
        }
        state.writes.push(Write { thread: thread::current().id(), register, value });

        if register == REG_CTRL1 && value & CTRL1_RST != 0 {
            state.power_on();
            return Ok(());
        }

        let was_active = state.regs[REG_CTRL1 as usize] & CTRL1_SBYB != 0;
        state.regs[register as usize] = value;
        if register == REG_CTRL1 && value & CTRL1_SBYB != 0 && !was_active && state.converts {
            state.complete_conversion();
        }
        Ok(())
    }
}
