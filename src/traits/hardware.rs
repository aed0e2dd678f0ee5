//! Hardware abstraction traits for the machine control card's leaf drivers.
//!
//! This module defines the interfaces between the card's logical layer and
//! the actual hardware, so the same code runs against the Raspberry Pi
//! backend and the desktop mocks.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`MotorDrive`] | H-bridge style forward/backward/stop with a speed fraction |
//! | [`SwitchOutput`] | Single-pin on/off output (relay, unidirectional motor) |
//! | [`PortExpander`] | 16 digital lines behind one I2C port-expander chip |
//! | [`TemperatureProbe`] | Blocking, fallible Celsius read |
//! | [`Delay`] | Blocking millisecond sleep (used for the settle step) |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations from
//! [`crate::hal::mock`]. For real hardware, use the implementations from
//! `hal::rpi` (requires the `rpi` feature).
//!
//! # Example
//!
//! ```rust
//! use machine_card::traits::MotorDrive;
//! use machine_card::hal::MockDrive;
//!
//! let mut drive = MockDrive::new();
//! drive.forward(0.5).unwrap();
//! assert!(drive.is_active());
//!
//! drive.stop().unwrap();
//! assert!(!drive.is_active());
//! ```

/// Direction of a two-way motor output.
///
/// The card drives each two-way motor through an H-bridge style driver, so
/// [`Forward`](Self::Forward) and [`Reverse`](Self::Reverse) are the two
/// energized polarities. [`Brake`](Self::Brake) is dynamic braking
/// (reverse-drive at zero speed), distinct from [`Off`](Self::Off) which
/// lets the motor coast.
///
/// Motor-facing aliases are provided for readable call sites:
/// [`LEFT`](Self::LEFT)/[`UP`](Self::UP) for forward and
/// [`RIGHT`](Self::RIGHT)/[`DOWN`](Self::DOWN) for reverse.
///
/// # Default
///
/// Defaults to [`Off`](Self::Off) for safety.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// No drive; the motor coasts.
    #[default]
    Off,
    /// Energized forward (positive polarity).
    Forward,
    /// Energized reverse (negative polarity).
    Reverse,
    /// Hard stop: reverse-drive at zero speed (dynamic braking).
    Brake,
}

impl Direction {
    /// Alias for [`Forward`](Self::Forward) on horizontally mounted motors.
    pub const LEFT: Self = Self::Forward;
    /// Alias for [`Forward`](Self::Forward) on vertically mounted motors.
    pub const UP: Self = Self::Forward;
    /// Alias for [`Reverse`](Self::Reverse) on horizontally mounted motors.
    pub const RIGHT: Self = Self::Reverse;
    /// Alias for [`Reverse`](Self::Reverse) on vertically mounted motors.
    pub const DOWN: Self = Self::Reverse;

    /// Returns the numeric wire value used by the existing harness.
    ///
    /// # Examples
    ///
    /// ```
    /// use machine_card::Direction;
    ///
    /// assert_eq!(Direction::Off.code(), 0);
    /// assert_eq!(Direction::LEFT.code(), 1);
    /// assert_eq!(Direction::DOWN.code(), 2);
    /// assert_eq!(Direction::Brake.code(), 3);
    /// ```
    #[inline]
    pub const fn code(&self) -> u8 {
        match self {
            Direction::Off => 0,
            Direction::Forward => 1,
            Direction::Reverse => 2,
            Direction::Brake => 3,
        }
    }

    /// Parses the numeric wire value back into a direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use machine_card::Direction;
    ///
    /// assert_eq!(Direction::from_code(0), Some(Direction::Off));
    /// assert_eq!(Direction::from_code(3), Some(Direction::Brake));
    /// assert_eq!(Direction::from_code(4), None);
    /// ```
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Direction::Off),
            1 => Some(Direction::Forward),
            2 => Some(Direction::Reverse),
            3 => Some(Direction::Brake),
            _ => None,
        }
    }

    /// Returns the direction as a lowercase string.
    ///
    /// Useful for JSON serialization and display purposes.
    ///
    /// # Examples
    ///
    /// ```
    /// use machine_card::Direction;
    ///
    /// assert_eq!(Direction::Off.as_str(), "off");
    /// assert_eq!(Direction::Forward.as_str(), "forward");
    /// assert_eq!(Direction::Reverse.as_str(), "reverse");
    /// assert_eq!(Direction::Brake.as_str(), "brake");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::Off => "off",
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
            Direction::Brake => "brake",
        }
    }

    /// Parse a direction from text input.
    ///
    /// Supports multiple text formats for flexibility:
    /// - Canonical names: `"off"`, `"forward"`, `"reverse"`, `"brake"`
    /// - Motor aliases: `"left"`, `"up"`, `"right"`, `"down"`
    /// - Numeric wire values: `"0"` through `"3"`
    ///
    /// Input is trimmed and case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use machine_card::Direction;
    ///
    /// assert_eq!(Direction::from_text("forward"), Some(Direction::Forward));
    /// assert_eq!(Direction::from_text("up"), Some(Direction::Forward));
    /// assert_eq!(Direction::from_text("DOWN"), Some(Direction::Reverse));
    /// assert_eq!(Direction::from_text(" 3 "), Some(Direction::Brake));
    /// assert_eq!(Direction::from_text("sideways"), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        let mut buf = heapless::String::<16>::new();
        for c in s.trim().chars() {
            if buf.push(c.to_ascii_lowercase()).is_err() {
                return None;
            }
        }
        match buf.as_str() {
            "off" | "0" => Some(Direction::Off),
            "forward" | "left" | "up" | "1" => Some(Direction::Forward),
            "reverse" | "right" | "down" | "2" => Some(Direction::Reverse),
            "brake" | "3" => Some(Direction::Brake),
            _ => None,
        }
    }
}

/// On/off value for the power and simple-motor outputs.
///
/// # Default
///
/// Defaults to [`Off`](Self::Off) for safety.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Switch {
    /// Output de-energized.
    #[default]
    Off,
    /// Output energized.
    On,
}

impl Switch {
    /// Returns the numeric wire value (`0` off, `1` on).
    #[inline]
    pub const fn code(&self) -> u8 {
        match self {
            Switch::Off => 0,
            Switch::On => 1,
        }
    }

    /// Parses the numeric wire value back into a switch state.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Switch::Off),
            1 => Some(Switch::On),
            _ => None,
        }
    }

    /// Returns true for [`On`](Self::On).
    #[inline]
    pub const fn is_on(&self) -> bool {
        matches!(self, Switch::On)
    }

    /// Returns the state as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Switch::Off => "off",
            Switch::On => "on",
        }
    }

    /// Parse a switch state from text input.
    ///
    /// Accepts `"on"`/`"off"` and the numeric wire values `"1"`/`"0"`,
    /// trimmed and case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use machine_card::Switch;
    ///
    /// assert_eq!(Switch::from_text("on"), Some(Switch::On));
    /// assert_eq!(Switch::from_text(" OFF "), Some(Switch::Off));
    /// assert_eq!(Switch::from_text("1"), Some(Switch::On));
    /// assert_eq!(Switch::from_text("maybe"), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        let mut buf = heapless::String::<8>::new();
        for c in s.trim().chars() {
            if buf.push(c.to_ascii_lowercase()).is_err() {
                return None;
            }
        }
        match buf.as_str() {
            "off" | "0" => Some(Switch::Off),
            "on" | "1" => Some(Switch::On),
            _ => None,
        }
    }
}

impl From<bool> for Switch {
    fn from(on: bool) -> Self {
        if on {
            Switch::On
        } else {
            Switch::Off
        }
    }
}

/// Two-way motor drive trait - abstracts an H-bridge style driver on a pin
/// pair.
///
/// Speed is a fraction of full drive in `0.0..=1.0`; the implementation maps
/// it to PWM duty. `forward` and `backward` may be re-issued while already
/// driving the same polarity (used for on-the-fly speed changes). Never
/// commanding the opposite polarity without a stop in between is the
/// caller's job; [`TwoWayMotor`](crate::TwoWayMotor) enforces the
/// stop-and-settle rule on top of this trait.
pub trait MotorDrive {
    /// Error type for drive operations.
    type Error;

    /// Energize the forward polarity at `speed` (0.0 to 1.0).
    fn forward(&mut self, speed: f32) -> Result<(), Self::Error>;

    /// Energize the reverse polarity at `speed` (0.0 to 1.0).
    ///
    /// `backward(0.0)` is the dynamic-brake command.
    fn backward(&mut self, speed: f32) -> Result<(), Self::Error>;

    /// De-energize both polarities (coast).
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Returns true while either polarity is energized at non-zero speed.
    fn is_active(&self) -> bool;
}

/// Single-pin on/off output trait.
///
/// Covers both the mains-power relay outputs and the unidirectional motor
/// outputs; neither has a direction or speed concept.
pub trait SwitchOutput {
    /// Error type for output operations.
    type Error;

    /// Energize the output.
    fn on(&mut self) -> Result<(), Self::Error>;

    /// De-energize the output.
    fn off(&mut self) -> Result<(), Self::Error>;

    /// Returns the last commanded state.
    fn is_on(&self) -> bool;

    /// Convenience method to apply a [`Switch`] value.
    fn set(&mut self, state: Switch) -> Result<(), Self::Error> {
        match state {
            Switch::On => self.on(),
            Switch::Off => self.off(),
        }
    }
}

/// Port-expander trait - 16 digital lines behind one I2C chip.
///
/// Lines are quasi-bidirectional in the PCF8575 sense: a line written high
/// acts as an input with a weak pull-up, so "configure as input" and "write
/// high" are the same operation. `line` is the chip-local index `0..=15`;
/// callers are expected to validate it.
pub trait PortExpander {
    /// Error type for bus operations.
    type Error;

    /// Drive one line high or low.
    fn write_line(&mut self, line: u8, level: bool) -> Result<(), Self::Error>;

    /// Read the current level of one line without reconfiguring it.
    fn read_line(&mut self, line: u8) -> Result<bool, Self::Error>;
}

/// Temperature probe trait - one blocking, fallible Celsius read per call.
///
/// The read fails when no sensor is present or the bus misbehaves; the
/// [`Thermometer`](crate::Thermometer) wrapper collapses those failures into
/// an absent reading.
pub trait TemperatureProbe {
    /// Error type for sensor operations.
    type Error;

    /// Perform one blocking temperature read, in degrees Celsius.
    fn read_celsius(&mut self) -> Result<f32, Self::Error>;
}

/// Blocking millisecond delay trait.
///
/// The only suspension in the whole card is the settle step between opposite
/// motor polarities, which goes through this trait so tests can observe it.
pub trait Delay {
    /// Block the calling thread for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
