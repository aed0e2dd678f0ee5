//! Two-way motor drive on a GPIO pin pair with software PWM.

use rppal::gpio::{Gpio, OutputPin};

use crate::traits::MotorDrive;

/// Software-PWM frequency for the motor drive pins, in hertz.
const PWM_FREQUENCY_HZ: f64 = 100.0;

/// H-bridge style motor drive over a (forward, reverse) GPIO pin pair.
///
/// Speed maps to software-PWM duty cycle on the energized pin while the
/// opposite pin is held low. Both pins start low, so a freshly opened motor
/// coasts.
#[derive(Debug)]
pub struct PinMotor {
    forward: OutputPin,
    reverse: OutputPin,
    active: bool,
}

impl PinMotor {
    /// Claims the `(forward, reverse)` BCM pin pair for one motor.
    ///
    /// # Errors
    ///
    /// Fails if either pin is already exported or the GPIO peripheral is
    /// unavailable.
    pub fn new(gpio: &Gpio, pins: (u8, u8)) -> Result<Self, rppal::gpio::Error> {
        Ok(Self {
            forward: gpio.get(pins.0)?.into_output_low(),
            reverse: gpio.get(pins.1)?.into_output_low(),
            active: false,
        })
    }
}

impl MotorDrive for PinMotor {
    type Error = rppal::gpio::Error;

    fn forward(&mut self, speed: f32) -> Result<(), Self::Error> {
        self.reverse.clear_pwm()?;
        self.reverse.set_low();
        self.forward
            .set_pwm_frequency(PWM_FREQUENCY_HZ, f64::from(speed))?;
        self.active = speed > 0.0;
        Ok(())
    }

    fn backward(&mut self, speed: f32) -> Result<(), Self::Error> {
        self.forward.clear_pwm()?;
        self.forward.set_low();
        self.reverse
            .set_pwm_frequency(PWM_FREQUENCY_HZ, f64::from(speed))?;
        self.active = speed > 0.0;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.forward.clear_pwm()?;
        self.reverse.clear_pwm()?;
        self.forward.set_low();
        self.reverse.set_low();
        self.active = false;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
