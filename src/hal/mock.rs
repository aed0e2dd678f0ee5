//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware traits, enabling
//! development and testing on desktop without the physical card.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockDrive`] | [`MotorDrive`] | Records drive commands in an [`EventLog`] |
//! | [`MockSwitch`] | [`SwitchOutput`] | Tracks on/off history |
//! | [`MockExpander`] | [`PortExpander`] | Simulated 16-line quasi-bidirectional port |
//! | [`MockProbe`] | [`TemperatureProbe`] | Configurable reading or failure |
//! | [`MockDelay`] | [`Delay`] | Records settle sleeps instead of blocking |
//!
//! # Ordered command verification
//!
//! The safety property of the card is about *ordering*: stop, then settle,
//! then the new polarity. [`MockDrive`] and [`MockDelay`] can share one
//! [`EventLog`] so a test sees the exact interleaving:
//!
//! ```rust
//! use machine_card::{Direction, TwoWayMotor};
//! use machine_card::hal::{EventLog, MockDelay, MockDrive, MotorEvent};
//!
//! let log = EventLog::new();
//! let mut motor = TwoWayMotor::new(
//!     MockDrive::with_log(log.clone()),
//!     MockDelay::with_log(log.clone()),
//! );
//!
//! motor.set_direction(Direction::Forward).unwrap();
//! motor.set_direction(Direction::Reverse).unwrap();
//!
//! assert_eq!(
//!     log.take(),
//!     vec![
//!         MotorEvent::Forward(1.0),
//!         MotorEvent::Stop,
//!         MotorEvent::Settle(10),
//!         MotorEvent::Backward(1.0),
//!     ]
//! );
//! ```

use crate::card::CardParts;
use crate::motor::DEFAULT_SETTLE_MS;
use crate::traits::{Delay, MotorDrive, PortExpander, Switch, SwitchOutput, TemperatureProbe};

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

// ============================================================================
// Event Log
// ============================================================================

/// A single hardware action recorded by the mock drivers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotorEvent {
    /// Forward polarity energized at the given speed.
    Forward(f32),
    /// Reverse polarity energized at the given speed.
    Backward(f32),
    /// Both polarities de-energized.
    Stop,
    /// Settle sleep of the given number of milliseconds.
    Settle(u32),
}

/// Shared, ordered record of mock hardware actions.
///
/// Cheaply cloneable; clones share the same underlying log, so a
/// [`MockDrive`] and a [`MockDelay`] handed clones of one log interleave
/// their events in call order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<MotorEvent>>>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one event.
    pub fn push(&self, event: MotorEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Drains and returns all recorded events.
    pub fn take(&self) -> Vec<MotorEvent> {
        core::mem::take(&mut *self.events.borrow_mut())
    }

    /// Returns a snapshot of the recorded events without draining.
    pub fn events(&self) -> Vec<MotorEvent> {
        self.events.borrow().clone()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Mock two-way motor drive.
///
/// Records every command in its [`EventLog`] and tracks the activity state
/// the way a PWM pin pair would: energized at non-zero speed means active.
///
/// # Example
///
/// ```rust
/// use machine_card::hal::{MockDrive, MotorEvent};
/// use machine_card::traits::MotorDrive;
///
/// let mut drive = MockDrive::new();
/// drive.backward(0.25).unwrap();
///
/// assert!(drive.is_active());
/// assert_eq!(drive.log().take(), vec![MotorEvent::Backward(0.25)]);
/// ```
#[derive(Debug, Default)]
pub struct MockDrive {
    log: EventLog,
    /// True while energized at non-zero speed. Writable so tests can
    /// simulate a drive left spinning.
    pub active: bool,
    /// Speed of the last drive command.
    pub speed: f32,
}

impl MockDrive {
    /// Creates a mock drive with its own private log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock drive recording into a shared log.
    pub fn with_log(log: EventLog) -> Self {
        Self {
            log,
            active: false,
            speed: 0.0,
        }
    }

    /// Returns a handle to this drive's log.
    pub fn log(&self) -> EventLog {
        self.log.clone()
    }
}

impl MotorDrive for MockDrive {
    type Error = ();

    fn forward(&mut self, speed: f32) -> Result<(), ()> {
        self.log.push(MotorEvent::Forward(speed));
        self.speed = speed;
        self.active = speed > 0.0;
        Ok(())
    }

    fn backward(&mut self, speed: f32) -> Result<(), ()> {
        self.log.push(MotorEvent::Backward(speed));
        self.speed = speed;
        self.active = speed > 0.0;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ()> {
        self.log.push(MotorEvent::Stop);
        self.speed = 0.0;
        self.active = false;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Mock settle delay.
///
/// Records each requested sleep instead of blocking, so tests run instantly
/// and can still assert that (and for how long) the settle step happened.
#[derive(Clone, Debug, Default)]
pub struct MockDelay {
    log: Option<EventLog>,
    /// Total milliseconds slept across all calls.
    pub slept_ms: u64,
}

impl MockDelay {
    /// Creates a delay that only accumulates [`slept_ms`](Self::slept_ms).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a delay recording [`MotorEvent::Settle`] into a shared log.
    pub fn with_log(log: EventLog) -> Self {
        Self {
            log: Some(log),
            slept_ms: 0,
        }
    }
}

impl Delay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.slept_ms += u64::from(ms);
        if let Some(log) = &self.log {
            log.push(MotorEvent::Settle(ms));
        }
    }
}

/// Mock on/off output.
///
/// Tracks the current state and the full command history.
///
/// # Example
///
/// ```rust
/// use machine_card::Switch;
/// use machine_card::hal::MockSwitch;
/// use machine_card::traits::SwitchOutput;
///
/// let mut out = MockSwitch::new();
/// out.on().unwrap();
/// out.off().unwrap();
///
/// assert!(!out.is_on());
/// assert_eq!(out.history, vec![Switch::On, Switch::Off]);
/// ```
#[derive(Debug, Default)]
pub struct MockSwitch {
    /// Current state.
    pub state: bool,
    /// Every commanded state, in order.
    pub history: Vec<Switch>,
}

impl MockSwitch {
    /// Creates a mock output in the off state.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SwitchOutput for MockSwitch {
    type Error = ();

    fn on(&mut self) -> Result<(), ()> {
        self.state = true;
        self.history.push(Switch::On);
        Ok(())
    }

    fn off(&mut self) -> Result<(), ()> {
        self.state = false;
        self.history.push(Switch::Off);
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.state
    }
}

/// Mock 16-line port expander.
///
/// Models the PCF8575's quasi-bidirectional lines: a line written low reads
/// low; a line written high (released) reads whatever the simulated
/// external world drives it to, defaulting to high via the pull-ups.
///
/// # Example
///
/// ```rust
/// use machine_card::hal::MockExpander;
/// use machine_card::traits::PortExpander;
///
/// let mut chip = MockExpander::new();
///
/// // Boot state: everything reads high.
/// assert!(chip.read_line(3).unwrap());
///
/// // A line written low reads low regardless of the external level.
/// chip.write_line(3, false).unwrap();
/// assert!(!chip.read_line(3).unwrap());
///
/// // Released again, the external level shows through.
/// chip.external[3] = false;
/// chip.write_line(3, true).unwrap();
/// assert!(!chip.read_line(3).unwrap());
/// ```
#[derive(Debug)]
pub struct MockExpander {
    /// Level the external world drives each released line to.
    pub external: [bool; 16],
    /// Shadow of the last written word (true = released / input mode).
    pub written: [bool; 16],
    /// Every write as `(line, level)`, in order.
    pub writes: Vec<(u8, bool)>,
    /// Every read, by line index, in order.
    pub reads: Vec<u8>,
}

impl MockExpander {
    /// Creates a mock chip in its power-on state (all lines released high).
    pub fn new() -> Self {
        Self {
            external: [true; 16],
            written: [true; 16],
            writes: Vec::new(),
            reads: Vec::new(),
        }
    }
}

impl Default for MockExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PortExpander for MockExpander {
    type Error = ();

    fn write_line(&mut self, line: u8, level: bool) -> Result<(), ()> {
        self.written[usize::from(line)] = level;
        self.writes.push((line, level));
        Ok(())
    }

    fn read_line(&mut self, line: u8) -> Result<bool, ()> {
        self.reads.push(line);
        let i = usize::from(line);
        Ok(self.written[i] && self.external[i])
    }
}

/// Mock temperature probe.
///
/// Returns the configured reading, or fails when none is set - which is how
/// tests simulate an absent or misbehaving sensor.
///
/// # Example
///
/// ```rust
/// use machine_card::hal::MockProbe;
/// use machine_card::traits::TemperatureProbe;
///
/// let mut probe = MockProbe::at(21.5);
/// assert_eq!(probe.read_celsius(), Ok(21.5));
///
/// let mut absent = MockProbe::new();
/// assert!(absent.read_celsius().is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockProbe {
    /// The reading to return; `None` makes every read fail.
    pub celsius: Option<f32>,
    /// Number of reads performed.
    pub reads: usize,
}

impl MockProbe {
    /// Creates a probe with no sensor attached (every read fails).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a probe that reads the given temperature.
    pub fn at(celsius: f32) -> Self {
        Self {
            celsius: Some(celsius),
            reads: 0,
        }
    }
}

impl TemperatureProbe for MockProbe {
    type Error = ();

    fn read_celsius(&mut self) -> Result<f32, ()> {
        self.reads += 1;
        self.celsius.ok_or(())
    }
}

// ============================================================================
// Full card assembly
// ============================================================================

/// Builds a complete set of [`CardParts`] backed by mocks.
///
/// Every two-way drive records into its own private log, reachable through
/// the motor's drive handle. The probe has no sensor attached, so
/// `temperature()` returns `None` until one is configured.
///
/// # Example
///
/// ```rust
/// use machine_card::{MachineCard, Switch};
/// use machine_card::hal::mock_parts;
///
/// let mut card = MachineCard::new(mock_parts());
/// card.motor().set(2, Switch::On).unwrap();
/// ```
pub fn mock_parts() -> CardParts<MockDrive, MockSwitch, MockExpander, MockProbe, MockDelay> {
    CardParts {
        power: core::array::from_fn(|_| MockSwitch::new()),
        motor_outputs: core::array::from_fn(|_| MockSwitch::new()),
        twoway_drives: core::array::from_fn(|_| MockDrive::new()),
        expanders: core::array::from_fn(|_| MockExpander::new()),
        probe: MockProbe::new(),
        delay: MockDelay::new(),
        settle_ms: DEFAULT_SETTLE_MS,
    }
}

// ============================================================================
// Tests
// ============================================================================
