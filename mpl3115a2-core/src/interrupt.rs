//! INT1 Event Delivery and Dispatch
//!
//! ## Why a Queue?
//!
//! INT_SOURCE flags clear when read. If an edge callback read it directly
//! while a foreground conversion was polling, each could consume the other's
//! flag. Instead, edges are posted into an `EdgeQueue` and the device owner
//! drains it between conversions:
//!
//! ```text
//! GPIO ISR / event thread          Device owner
//!        │                              │
//!   post(Edge::Falling) ──▶ EdgeQueue ──▶ dispatch_pending()
//!        │                              ├── read INT_SOURCE
//!   never touches the bus               ├── classify()
//!                                       └── run conversion, emit event
//! ```
//!
//! The queue is a fixed-capacity MPMC ring from `heapless`, safe to post to
//! from interrupt context. When it is full the edge is counted and dropped;
//! the next dispatch still sees every flag the chip has latched.
//!
//! ## Classification
//!
//! | INT_SOURCE              | CTRL1.ALT | Reported                 |
//! |-------------------------|-----------|--------------------------|
//! | PW or PTH               | 1         | altitude, meters         |
//! | PW or PTH               | 0         | pressure, millibars      |
//! | TW or TTH (no PW/PTH)   | any       | temperature, Fahrenheit  |
//! | anything else           | any       | logged, nothing reported |

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use heapless::mpmc::Q8;

use crate::registers::{Ctrl1, IntSource, Sources};
use crate::traits::Level;
use crate::trigger::MeasurementMode;

/// A level change on INT1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Line went LOW: the chip asserted an interrupt
    Falling,
    /// Line went HIGH: interrupt released
    Rising,
}

impl From<Level> for Edge {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => Edge::Falling,
            Level::High => Edge::Rising,
        }
    }
}

/// Lock-free mailbox between the edge source and the device owner
pub struct EdgeQueue {
    edges: Q8<Edge>,
    dropped: AtomicU32,
}

impl EdgeQueue {
    /// Empty queue; usable in a `static`
    pub const fn new() -> Self {
        Self {
            edges: Q8::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Post an edge. Returns false if the queue was full and the edge dropped.
    pub fn post(&self, edge: Edge) -> bool {
        if self.edges.enqueue(edge).is_ok() {
            true
        } else {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            false
        }
    }

    /// Post the edge implied by a newly sampled level
    pub fn post_level(&self, level: Level) -> bool {
        self.post(Edge::from(level))
    }

    /// Oldest pending edge
    pub fn take(&self) -> Option<Edge> {
        self.edges.dequeue()
    }

    /// Edges lost because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for EdgeQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeQueue")
            .field("dropped", &self.dropped())
            .finish_non_exhaustive()
    }
}

impl Default for EdgeQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A comparator interrupt, with the reading taken in response
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdEvent {
    /// Barometric comparator fired in barometer mode
    PressureExceeded {
        /// Fresh pressure reading
        millibars: f64,
    },
    /// Barometric comparator fired in altimeter mode
    AltitudeExceeded {
        /// Fresh altitude reading
        meters: f64,
    },
    /// Temperature comparator fired
    TemperatureExceeded {
        /// Fresh temperature reading
        fahrenheit: f64,
    },
}

/// What an INT1 assertion calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Re-measure in `mode` and report
    Measure(MeasurementMode),
    /// No comparator flag set
    Unrecognized(Sources),
}

/// Decide how to respond to an INT_SOURCE value
///
/// The barometric axis wins if both axes fired; the temperature flag stays
/// latched and is reported on the next edge.
pub fn classify(source: IntSource, ctrl1: Ctrl1) -> Dispatch {
    let fired = source.sources();
    if fired.intersects(Sources::PRESSURE_AXIS) {
        if ctrl1.is_altimeter() {
            Dispatch::Measure(MeasurementMode::Altitude)
        } else {
            Dispatch::Measure(MeasurementMode::Pressure)
        }
    } else if fired.intersects(Sources::TEMPERATURE_AXIS) {
        Dispatch::Measure(MeasurementMode::Temperature)
    } else {
        Dispatch::Unrecognized(fired)
    }
}
