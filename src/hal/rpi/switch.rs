//! On/off output on a single GPIO pin.

use core::convert::Infallible;

use rppal::gpio::{Gpio, OutputPin};

use crate::traits::SwitchOutput;

/// Relay or unidirectional-motor output on one BCM GPIO pin.
///
/// The pin starts low, so a freshly opened output is de-energized.
#[derive(Debug)]
pub struct PinSwitch {
    pin: OutputPin,
}

impl PinSwitch {
    /// Claims one BCM pin as a de-energized output.
    ///
    /// # Errors
    ///
    /// Fails if the pin is already exported or the GPIO peripheral is
    /// unavailable.
    pub fn new(gpio: &Gpio, pin: u8) -> Result<Self, rppal::gpio::Error> {
        Ok(Self {
            pin: gpio.get(pin)?.into_output_low(),
        })
    }
}

impl SwitchOutput for PinSwitch {
    // Level writes on a claimed pin cannot fail.
    type Error = Infallible;

    fn on(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high();
        Ok(())
    }

    fn off(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low();
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.pin.is_set_high()
    }
}
