//! # machine-card
//!
//! Hardware layer for a machine control card: seven bidirectional DC motors,
//! three on/off motor outputs, two relay outputs, 32 expander-backed I/O
//! lines, and one temperature sensor behind a single typed API.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for motor drives, switch outputs, port
//!   expanders, and temperature probes
//! - **Polarity safety**: Reversing a two-way motor always stops it and lets
//!   the driver settle before the opposite polarity is energized
//! - **Desktop testing**: Event-logging mocks run the full card logic without
//!   hardware
//! - **Raspberry Pi backend**: GPIO, I2C, and 1-Wire implementations behind
//!   the `rpi` feature
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware abstractions for the leaf drivers
//! - `motor` - The two-way motor state machine (stop-and-settle rule)
//! - `facility` - Channel-validated views over each output group
//! - `card` - The [`MachineCard`] facade that ties everything together
//! - `hal` - Concrete implementations (mock for testing, rpi for hardware)
//!
//! ## Example
//!
//! ```rust
//! use machine_card::{Direction, MachineCard, Switch};
//! use machine_card::hal::mock_parts;
//!
//! let mut card = MachineCard::new(mock_parts());
//!
//! // Mains power on, lift motor up at 80%
//! card.power().set(1, Switch::On).unwrap();
//! card.two_way_motor().set_speed(4, 0.8).unwrap();
//! card.two_way_motor().set(4, Direction::UP).unwrap();
//!
//! // Reversing goes through stop-and-settle automatically
//! card.two_way_motor().set(4, Direction::DOWN).unwrap();
//! assert_eq!(card.two_way_motor().direction(4).unwrap(), Direction::DOWN);
//!
//! // No sensor wired up in the mocks
//! assert_eq!(card.temperature(), None);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Card facade over all five facilities.
pub mod card;
/// Wiring configuration for a physical card.
pub mod config;
/// Error types shared across the card.
pub mod error;
/// Channel-validated facility views (power, motors, I/O lines).
pub mod facility;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Two-way motor state machine with the stop-and-settle polarity rule.
pub mod motor;
/// Temperature sensing helpers (payload parsing, absent-sensor handling).
pub mod temperature;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use card::{CardParts, MachineCard};
pub use config::CardConfig;
pub use error::{CardError, Facility};
pub use facility::{
    EXPANDER_LINES, IO_LINES, MOTOR_CHANNELS, POWER_CHANNELS, TWOWAY_CHANNELS,
};
pub use motor::{TwoWayMotor, DEFAULT_SETTLE_MS};
pub use temperature::Thermometer;
pub use traits::{
    Delay, Direction, MotorDrive, PortExpander, Switch, SwitchOutput, TemperatureProbe,
};
