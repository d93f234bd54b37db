//! Scripted digital lines and a delay that only keeps count

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use mpl3115a2_core::{DigitalLine, EdgeQueue, EdgeSource, Level, LineConfig};

/// Error reported by a scripted line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFault(pub &'static str);

/// Line whose levels come from a script
///
/// When the script runs out, every further sample returns `fallback`.
#[derive(Debug)]
pub struct ScriptedLine {
    pub script: VecDeque<Level>,
    pub fallback: Level,
    pub samples: u32,
    pub configured: Option<LineConfig>,
    pub sink: Option<&'static EdgeQueue>,
    pub fail_configure: bool,
    pub fail_listen: bool,
}

impl ScriptedLine {
    pub fn constant(level: Level) -> Self {
        Self {
            script: VecDeque::new(),
            fallback: level,
            samples: 0,
            configured: None,
            sink: None,
            fail_configure: false,
            fail_listen: false,
        }
    }

    /// Released open-drain output
    pub fn idle() -> Self {
        Self::constant(Level::High)
    }

    /// INT2 already asserted
    pub fn data_ready() -> Self {
        Self::constant(Level::Low)
    }

    /// INT2 that never asserts
    pub fn stuck_high() -> Self {
        Self::constant(Level::High)
    }

    /// `high_for` HIGH samples, then LOW
    pub fn asserts_after(high_for: usize) -> Self {
        let mut line = Self::constant(Level::Low);
        line.script.extend(std::iter::repeat(Level::High).take(high_for));
        line
    }

    pub fn failing_configure() -> Self {
        Self { fail_configure: true, ..Self::idle() }
    }

    pub fn failing_listen() -> Self {
        Self { fail_listen: true, ..Self::idle() }
    }
}

impl DigitalLine for ScriptedLine {
    type Error = LineFault;

    fn configure(&mut self, config: &LineConfig) -> Result<(), LineFault> {
        if self.fail_configure {
            return Err(LineFault("gpio busy"));
        }
        self.configured = Some(*config);
        Ok(())
    }

    fn level(&mut self) -> Result<Level, LineFault> {
        self.samples += 1;
        Ok(self.script.pop_front().unwrap_or(self.fallback))
    }
}

impl EdgeSource for ScriptedLine {
    fn listen(&mut self, sink: &'static EdgeQueue) -> Result<(), LineFault> {
        if self.fail_listen {
            return Err(LineFault("no edge support"));
        }
        self.sink = Some(sink);
        Ok(())
    }
}

/// Delay that returns immediately and records what was asked for
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
    pub calls: u32,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += u64::from(ms) * 1_000_000;
        self.calls += 1;
    }
}
