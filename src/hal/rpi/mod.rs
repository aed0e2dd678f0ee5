//! Raspberry Pi backend for the machine control card.
//!
//! Implements the hardware traits with `rppal`: software-PWM GPIO pin pairs
//! for the two-way motors, plain output pins for the relays and
//! unidirectional motors, the I2C peripheral for the port expanders, and
//! the kernel's 1-Wire sysfs interface for the temperature sensor.
//!
//! Requires the `rpi` feature and a Raspberry Pi with I2C and 1-Wire
//! support enabled (`raspi-config` → Interface Options).
//!
//! # Example
//!
//! ```rust,ignore
//! use machine_card::{config::CardConfig, Direction, Switch};
//! use machine_card::hal::rpi;
//!
//! let mut card = rpi::open(&CardConfig::default())?;
//! card.power().set(1, Switch::On)?;
//! card.two_way_motor().set(4, Direction::UP)?;
//! if let Some(celsius) = card.temperature() {
//!     println!("card temperature: {celsius:.1}°C");
//! }
//! ```

mod motor;
mod switch;
mod w1;

pub use motor::PinMotor;
pub use switch::PinSwitch;
pub use w1::{W1Error, W1Probe};

use rppal::gpio::Gpio;
use rppal::i2c::I2c;
use thiserror::Error;

use crate::card::{CardParts, MachineCard};
use crate::config::CardConfig;
use crate::hal::pcf8575::Pcf8575;
use crate::hal::SleepDelay;

/// A fully wired card on the Raspberry Pi backend.
pub type RpiCard = MachineCard<PinMotor, PinSwitch, Pcf8575<I2c>, W1Probe, SleepDelay>;

/// Errors opening the Raspberry Pi peripherals.
#[derive(Debug, Error)]
pub enum RpiError {
    /// GPIO peripheral unavailable or pin already in use.
    #[error(transparent)]
    Gpio(#[from] rppal::gpio::Error),

    /// I2C bus unavailable.
    #[error(transparent)]
    I2c(#[from] rppal::i2c::Error),
}

/// Opens every peripheral described by `config` and assembles the card.
///
/// All outputs start de-energized. Fails if the GPIO or I2C peripheral
/// cannot be claimed; the 1-Wire sensor is not probed here, so a missing
/// sensor only shows up as `temperature()` returning `None`.
///
/// # Errors
///
/// Returns [`RpiError`] when a pin or bus cannot be opened.
pub fn open(config: &CardConfig) -> Result<RpiCard, RpiError> {
    let gpio = Gpio::new()?;

    let power = [
        PinSwitch::new(&gpio, config.power_pins[0])?,
        PinSwitch::new(&gpio, config.power_pins[1])?,
    ];

    let motor_outputs = [
        PinSwitch::new(&gpio, config.motor_pins[0])?,
        PinSwitch::new(&gpio, config.motor_pins[1])?,
        PinSwitch::new(&gpio, config.motor_pins[2])?,
    ];

    let twoway_drives = [
        PinMotor::new(&gpio, config.twoway_pins[0])?,
        PinMotor::new(&gpio, config.twoway_pins[1])?,
        PinMotor::new(&gpio, config.twoway_pins[2])?,
        PinMotor::new(&gpio, config.twoway_pins[3])?,
        PinMotor::new(&gpio, config.twoway_pins[4])?,
        PinMotor::new(&gpio, config.twoway_pins[5])?,
        PinMotor::new(&gpio, config.twoway_pins[6])?,
    ];

    let expanders = [
        Pcf8575::new(I2c::with_bus(config.i2c_bus)?, config.expander_addresses[0]),
        Pcf8575::new(I2c::with_bus(config.i2c_bus)?, config.expander_addresses[1]),
    ];

    let probe = W1Probe::new(config.w1_device.as_deref());

    Ok(MachineCard::new(CardParts {
        power,
        motor_outputs,
        twoway_drives,
        expanders,
        probe,
        delay: SleepDelay,
        settle_ms: config.settle_ms,
    }))
}
