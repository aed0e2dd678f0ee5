//! The machine control card context object.
//!
//! [`MachineCard`] owns every driver handle on the card - an explicit
//! context constructed once at startup and passed to callers, instead of a
//! process-wide singleton. Dropping the card releases the underlying
//! handles.
//!
//! # Example
//!
//! ```rust
//! use machine_card::{Direction, MachineCard, Switch};
//! use machine_card::hal::mock_parts;
//!
//! let mut card = MachineCard::new(mock_parts());
//!
//! // Relay channel 1 on, then off.
//! card.power().set(1, Switch::On).unwrap();
//! card.power().set(1, Switch::Off).unwrap();
//!
//! // Two-way motor 4 up at 80% speed.
//! card.two_way_motor().set_speed(4, 0.8).unwrap();
//! card.two_way_motor().set(4, Direction::UP).unwrap();
//!
//! // No sensor attached in the mock parts.
//! assert_eq!(card.temperature(), None);
//! ```
//!
//! # Thread Safety
//!
//! All operations take `&mut self` and block until the hardware call
//! returns; there is no internal synchronization. Wrap the card in a mutex
//! if it must be shared across threads.

use crate::facility::{
    MotorOutputs, PortLines, PowerOutputs, TwoWayMotors, MOTOR_CHANNELS, POWER_CHANNELS,
    TWOWAY_CHANNELS,
};
use crate::motor::TwoWayMotor;
use crate::temperature::Thermometer;
use crate::traits::{Delay, MotorDrive, PortExpander, SwitchOutput, TemperatureProbe};

/// The driver handles making up one card, ready for [`MachineCard::new`].
///
/// For desktop use, [`crate::hal::mock_parts`] builds a full set backed by
/// mocks; on hardware, `hal::rpi::open` (feature `rpi`) builds one from a
/// [`CardConfig`](crate::config::CardConfig).
pub struct CardParts<M, S, X, T, D> {
    /// Relay drivers for power channels 1..=2.
    pub power: [S; POWER_CHANNELS],
    /// Pin drivers for motor output channels 1..=3.
    pub motor_outputs: [S; MOTOR_CHANNELS],
    /// H-bridge drives for two-way motor channels 1..=7.
    pub twoway_drives: [M; TWOWAY_CHANNELS],
    /// Port expander chips A and B.
    pub expanders: [X; 2],
    /// The 1-Wire temperature probe.
    pub probe: T,
    /// Settle-delay source, cloned into each two-way motor.
    pub delay: D,
    /// Settle delay between opposite motor polarities, milliseconds.
    pub settle_ms: u32,
}

/// Logical view of one machine control card.
///
/// Exposes the four channel-indexed facades plus the temperature accessor.
/// Each facade borrows the card mutably, so hold one facade at a time.
///
/// # Type Parameters
///
/// - `M`: two-way motor drive ([`MotorDrive`])
/// - `S`: relay / motor output pin ([`SwitchOutput`])
/// - `X`: port expander chip ([`PortExpander`])
/// - `T`: temperature probe ([`TemperatureProbe`])
/// - `D`: settle-delay source ([`Delay`])
pub struct MachineCard<M, S, X, T, D>
where
    M: MotorDrive,
    S: SwitchOutput,
    X: PortExpander,
    T: TemperatureProbe,
    D: Delay,
{
    power: [S; POWER_CHANNELS],
    motor_outputs: [S; MOTOR_CHANNELS],
    twoway: [TwoWayMotor<M, D>; TWOWAY_CHANNELS],
    expanders: [X; 2],
    thermometer: Thermometer<T>,
}

impl<M, S, X, T, D> MachineCard<M, S, X, T, D>
where
    M: MotorDrive,
    S: SwitchOutput,
    X: PortExpander,
    T: TemperatureProbe,
    D: Delay + Clone,
{
    /// Assembles a card from its driver handles.
    ///
    /// Each two-way motor starts [`Off`](crate::Direction::Off) at full
    /// speed with the configured settle delay.
    pub fn new(parts: CardParts<M, S, X, T, D>) -> Self {
        let CardParts {
            power,
            motor_outputs,
            twoway_drives,
            expanders,
            probe,
            delay,
            settle_ms,
        } = parts;

        let twoway = twoway_drives
            .map(|drive| TwoWayMotor::new(drive, delay.clone()).with_settle_ms(settle_ms));

        Self {
            power,
            motor_outputs,
            twoway,
            expanders,
            thermometer: Thermometer::new(probe),
        }
    }
}

impl<M, S, X, T, D> MachineCard<M, S, X, T, D>
where
    M: MotorDrive,
    S: SwitchOutput,
    X: PortExpander,
    T: TemperatureProbe,
    D: Delay,
{
    /// The mains-power relay outputs, channels 1..=2.
    pub fn power(&mut self) -> PowerOutputs<'_, S> {
        PowerOutputs::new(&mut self.power)
    }

    /// The unidirectional motor outputs, channels 1..=3.
    pub fn motor(&mut self) -> MotorOutputs<'_, S> {
        MotorOutputs::new(&mut self.motor_outputs)
    }

    /// The two-way motor outputs, channels 1..=7.
    pub fn two_way_motor(&mut self) -> TwoWayMotors<'_, M, D> {
        TwoWayMotors::new(&mut self.twoway)
    }

    /// The generic I/O lines, channels 0..=31.
    ///
    /// Covers both the input and the output role of each line; see
    /// [`PortLines`] for the read-reconfigures-as-input hazard.
    pub fn io(&mut self) -> PortLines<'_, X> {
        PortLines::new(&mut self.expanders)
    }

    /// Reads the card temperature in degrees Celsius.
    ///
    /// One blocking sensor query per call, no caching; `None` when the
    /// sensor is absent or the read fails.
    pub fn temperature(&mut self) -> Option<f32> {
        self.thermometer.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{mock_parts, MockProbe, MotorEvent};
    use crate::traits::{Direction, Switch};

    #[test]
    fn facades_reach_their_hardware() {
        let mut card = MachineCard::new(mock_parts());

        card.power().set(2, Switch::On).unwrap();
        assert_eq!(card.power().get(2), Ok(Switch::On));

        card.motor().set(1, Switch::On).unwrap();
        assert_eq!(card.motor().get(1), Ok(Switch::On));

        card.two_way_motor().set(5, Direction::DOWN).unwrap();
        assert_eq!(card.two_way_motor().direction(5), Ok(Direction::Reverse));

        card.io().set(3, Switch::Off).unwrap();
        assert!(card.io().get(0).unwrap());
    }

    #[test]
    fn motors_start_off_at_full_speed() {
        let mut card = MachineCard::new(mock_parts());
        for channel in 1..=7 {
            assert_eq!(card.two_way_motor().direction(channel), Ok(Direction::Off));
            assert_eq!(card.two_way_motor().speed(channel), Ok(1.0));
        }
    }

    #[test]
    fn temperature_without_sensor_is_none() {
        let mut card = MachineCard::new(mock_parts());
        assert_eq!(card.temperature(), None);
    }

    #[test]
    fn temperature_reads_probe() {
        let mut parts = mock_parts();
        parts.probe = MockProbe::at(23.5);
        let mut card = MachineCard::new(parts);

        assert_eq!(card.temperature(), Some(23.5));
        assert_eq!(card.temperature(), Some(23.5));
    }

    #[test]
    fn settle_ms_reaches_every_motor() {
        let mut parts = mock_parts();
        parts.settle_ms = 42;
        let mut card = MachineCard::new(parts);

        let mut motors = card.two_way_motor();
        motors.set(1, Direction::Forward).unwrap();
        motors.set(1, Direction::Reverse).unwrap();

        let motor = motors.motor(1).unwrap();
        assert_eq!(motor.delay().slept_ms, 42);
        assert_eq!(
            motor.drive().log().take(),
            vec![
                MotorEvent::Forward(1.0),
                MotorEvent::Stop,
                MotorEvent::Backward(1.0),
            ]
        );
    }
}
