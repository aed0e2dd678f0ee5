//! Card configuration: the physical wiring table as data.
//!
//! [`CardConfig`] describes how the card is wired to the host's pins and
//! buses. The `Default` implementation is the reference card layout and is
//! what the existing harness expects; override individual entries with the
//! `with_*` builders only for modified boards.
//!
//! # Example
//!
//! ```rust
//! use machine_card::config::CardConfig;
//!
//! // The reference card
//! let config = CardConfig::default();
//! assert_eq!(config.power_pins, [27, 17]);
//!
//! // A board with a slower motor driver and a pinned sensor
//! let config = CardConfig::default()
//!     .with_settle_ms(25)
//!     .with_w1_device("28-0316a4d1c3ff");
//! ```

use heapless::String as HString;

use crate::facility::{MOTOR_CHANNELS, POWER_CHANNELS, TWOWAY_CHANNELS};
use crate::motor::DEFAULT_SETTLE_MS;

/// Maximum length of a 1-Wire device id (e.g. `28-0316a4d1c3ff`).
pub const MAX_DEVICE_ID: usize = 32;

/// Type alias for 1-Wire device id strings.
pub type DeviceId = HString<MAX_DEVICE_ID>;

/// Create a [`DeviceId`] from a `&str`, truncating if too long.
pub fn device_id(s: &str) -> DeviceId {
    let mut id = DeviceId::new();
    for c in s.chars().take(MAX_DEVICE_ID) {
        if id.push(c).is_err() {
            break;
        }
    }
    id
}

/// Complete wiring description of one machine control card.
///
/// Pin numbers are BCM GPIO numbers. Two-way motors use a pin pair
/// (forward, reverse). Power and simple-motor pins are 1-based on the
/// facade side but stored here densely, so `power_pins[0]` is power
/// channel 1.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardConfig {
    /// Relay output pins, power channels 1..=2.
    pub power_pins: [u8; POWER_CHANNELS],
    /// Unidirectional motor output pins, motor channels 1..=3.
    pub motor_pins: [u8; MOTOR_CHANNELS],
    /// Two-way motor (forward, reverse) pin pairs, channels 1..=7.
    pub twoway_pins: [(u8, u8); TWOWAY_CHANNELS],
    /// I2C bus number carrying the port expanders.
    pub i2c_bus: u8,
    /// Bus addresses of expander chips A and B.
    pub expander_addresses: [u8; 2],
    /// Pin a specific 1-Wire sensor id instead of auto-discovery.
    pub w1_device: Option<DeviceId>,
    /// Settle delay between opposite motor polarities, milliseconds.
    pub settle_ms: u32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            power_pins: [27, 17],
            motor_pins: [13, 12, 6],
            twoway_pins: [
                (11, 8),
                (25, 10),
                (16, 26),
                (23, 24),
                (19, 18),
                (9, 7),
                (22, 5),
            ],
            i2c_bus: 1,
            expander_addresses: [0x20, 0x21],
            w1_device: None,
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

impl CardConfig {
    /// Set the relay output pins.
    pub fn with_power_pins(mut self, pins: [u8; POWER_CHANNELS]) -> Self {
        self.power_pins = pins;
        self
    }

    /// Set the unidirectional motor output pins.
    pub fn with_motor_pins(mut self, pins: [u8; MOTOR_CHANNELS]) -> Self {
        self.motor_pins = pins;
        self
    }

    /// Set the two-way motor pin pairs.
    pub fn with_twoway_pins(mut self, pins: [(u8, u8); TWOWAY_CHANNELS]) -> Self {
        self.twoway_pins = pins;
        self
    }

    /// Set the I2C bus number.
    pub fn with_i2c_bus(mut self, bus: u8) -> Self {
        self.i2c_bus = bus;
        self
    }

    /// Set the expander chip addresses.
    pub fn with_expander_addresses(mut self, addresses: [u8; 2]) -> Self {
        self.expander_addresses = addresses;
        self
    }

    /// Pin a specific 1-Wire sensor instead of using the first one found.
    pub fn with_w1_device(mut self, id: &str) -> Self {
        self.w1_device = Some(device_id(id));
        self
    }

    /// Set the motor polarity settle delay.
    pub fn with_settle_ms(mut self, settle_ms: u32) -> Self {
        self.settle_ms = settle_ms;
        self
    }
}
