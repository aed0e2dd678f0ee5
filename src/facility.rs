//! Channel-indexed facades over the card's facility classes.
//!
//! Each facade is a bounds-checked view borrowed from
//! [`MachineCard`](crate::MachineCard), translating a logical channel number
//! into a call against the right driver handle. Channel numbering follows
//! the card's silkscreen: power, motor and two-way motor channels are
//! 1-based; generic I/O lines are 0-based.
//!
//! | Facade | Channels | Hardware |
//! |--------|----------|----------|
//! | [`PowerOutputs`] | 1..=2 | mains relay pins |
//! | [`MotorOutputs`] | 1..=3 | unidirectional motor pins |
//! | [`TwoWayMotors`] | 1..=7 | H-bridge pin pairs via [`TwoWayMotor`] |
//! | [`PortLines`] | 0..=31 | two 16-line port expanders |
//!
//! An out-of-range channel is a rejected call
//! ([`CardError::ChannelOutOfRange`]), never a panic.

use crate::error::{CardError, Facility};
use crate::motor::TwoWayMotor;
use crate::traits::{Delay, Direction, MotorDrive, PortExpander, Switch, SwitchOutput};

/// Number of mains-power relay channels.
pub const POWER_CHANNELS: usize = 2;

/// Number of unidirectional motor channels.
pub const MOTOR_CHANNELS: usize = 3;

/// Number of two-way motor channels.
pub const TWOWAY_CHANNELS: usize = 7;

/// Lines per port-expander chip.
pub const EXPANDER_LINES: usize = 16;

/// Total generic I/O lines across both expander chips.
pub const IO_LINES: usize = 2 * EXPANDER_LINES;

/// Validates `channel` against `first..first + count` and returns the
/// zero-based slot.
fn check_channel<E>(
    facility: Facility,
    channel: usize,
    first: usize,
    count: usize,
) -> Result<usize, CardError<E>> {
    if channel < first || channel >= first + count {
        return Err(CardError::ChannelOutOfRange { facility, channel });
    }
    Ok(channel - first)
}

// ============================================================================
// Power
// ============================================================================

/// Indexed view over the mains-power relay outputs, channels 1..=2.
///
/// These switch 230V loads; `set` maps directly onto the relay driver with
/// no intermediate state.
#[derive(Debug)]
pub struct PowerOutputs<'a, S: SwitchOutput> {
    channels: &'a mut [S; POWER_CHANNELS],
}

impl<'a, S: SwitchOutput> PowerOutputs<'a, S> {
    pub(crate) fn new(channels: &'a mut [S; POWER_CHANNELS]) -> Self {
        Self { channels }
    }

    /// Switches one power channel.
    pub fn set(&mut self, channel: usize, state: Switch) -> Result<(), CardError<S::Error>> {
        let slot = check_channel(Facility::Power, channel, 1, POWER_CHANNELS)?;
        self.channels[slot].set(state)?;
        Ok(())
    }

    /// Returns the last commanded state of one power channel.
    pub fn get(&self, channel: usize) -> Result<Switch, CardError<S::Error>> {
        let slot = check_channel(Facility::Power, channel, 1, POWER_CHANNELS)?;
        Ok(Switch::from(self.channels[slot].is_on()))
    }

    /// Number of power channels.
    pub fn len(&self) -> usize {
        POWER_CHANNELS
    }

    /// Always false; the channel count is fixed.
    pub fn is_empty(&self) -> bool {
        false
    }
}

// ============================================================================
// Simple motors
// ============================================================================

/// Indexed view over the unidirectional motor outputs, channels 1..=3.
///
/// Plain on/off; these outputs have no direction or speed concept.
#[derive(Debug)]
pub struct MotorOutputs<'a, S: SwitchOutput> {
    channels: &'a mut [S; MOTOR_CHANNELS],
}

impl<'a, S: SwitchOutput> MotorOutputs<'a, S> {
    pub(crate) fn new(channels: &'a mut [S; MOTOR_CHANNELS]) -> Self {
        Self { channels }
    }

    /// Switches one motor output.
    pub fn set(&mut self, channel: usize, state: Switch) -> Result<(), CardError<S::Error>> {
        let slot = check_channel(Facility::Motor, channel, 1, MOTOR_CHANNELS)?;
        self.channels[slot].set(state)?;
        Ok(())
    }

    /// Returns the last commanded state of one motor output.
    pub fn get(&self, channel: usize) -> Result<Switch, CardError<S::Error>> {
        let slot = check_channel(Facility::Motor, channel, 1, MOTOR_CHANNELS)?;
        Ok(Switch::from(self.channels[slot].is_on()))
    }

    /// Number of motor output channels.
    pub fn len(&self) -> usize {
        MOTOR_CHANNELS
    }

    /// Always false; the channel count is fixed.
    pub fn is_empty(&self) -> bool {
        false
    }
}

// ============================================================================
// Two-way motors
// ============================================================================

/// Indexed view over the bidirectional motor outputs, channels 1..=7.
///
/// Direction changes dispatch into each channel's [`TwoWayMotor`], which
/// enforces the stop-and-settle rule; [`motor`](Self::motor) hands out the
/// controller itself for callers that want to hold onto one channel.
#[derive(Debug)]
pub struct TwoWayMotors<'a, M: MotorDrive, D: Delay> {
    channels: &'a mut [TwoWayMotor<M, D>; TWOWAY_CHANNELS],
}

impl<'a, M: MotorDrive, D: Delay> TwoWayMotors<'a, M, D> {
    pub(crate) fn new(channels: &'a mut [TwoWayMotor<M, D>; TWOWAY_CHANNELS]) -> Self {
        Self { channels }
    }

    /// Commands a direction transition on one channel.
    pub fn set(&mut self, channel: usize, direction: Direction) -> Result<(), CardError<M::Error>> {
        let slot = check_channel(Facility::TwoWayMotor, channel, 1, TWOWAY_CHANNELS)?;
        self.channels[slot].set_direction(direction)
    }

    /// Changes the speed of one channel, re-commanding the current
    /// direction at the new speed.
    pub fn set_speed(&mut self, channel: usize, speed: f32) -> Result<(), CardError<M::Error>> {
        let slot = check_channel(Facility::TwoWayMotor, channel, 1, TWOWAY_CHANNELS)?;
        self.channels[slot].set_speed(speed)
    }

    /// Returns the last requested direction of one channel.
    pub fn direction(&self, channel: usize) -> Result<Direction, CardError<M::Error>> {
        let slot = check_channel(Facility::TwoWayMotor, channel, 1, TWOWAY_CHANNELS)?;
        Ok(self.channels[slot].direction())
    }

    /// Returns the speed fraction of one channel.
    pub fn speed(&self, channel: usize) -> Result<f32, CardError<M::Error>> {
        let slot = check_channel(Facility::TwoWayMotor, channel, 1, TWOWAY_CHANNELS)?;
        Ok(self.channels[slot].speed())
    }

    /// Borrows the controller for one channel.
    pub fn motor(
        &mut self,
        channel: usize,
    ) -> Result<&mut TwoWayMotor<M, D>, CardError<M::Error>> {
        let slot = check_channel(Facility::TwoWayMotor, channel, 1, TWOWAY_CHANNELS)?;
        Ok(&mut self.channels[slot])
    }

    /// Number of two-way motor channels.
    pub fn len(&self) -> usize {
        TWOWAY_CHANNELS
    }

    /// Always false; the channel count is fixed.
    pub fn is_empty(&self) -> bool {
        false
    }
}

// ============================================================================
// Generic I/O
// ============================================================================

/// Indexed view over the 32 generic I/O lines, channels 0..=31.
///
/// Lines 0..=15 live on expander chip A, lines 16..=31 on chip B with the
/// index offset by 16. All lines power up as inputs (released high with a
/// weak pull-up), so an unconnected input reads high.
///
/// # Hazard
///
/// Reading a line first re-releases it high - the expander's "input mode" -
/// before sampling. Reading a line that a previous call configured as a low
/// output therefore silently reconfigures it as an input. This matches the
/// original card's behavior and the existing harness depends on it, but it
/// means a read is *not* side-effect free: do not poll a line you are also
/// driving.
///
/// Additionally, per the card manual: driving a line low while an external
/// voltage is applied to it can damage the interface card.
#[derive(Debug)]
pub struct PortLines<'a, X: PortExpander> {
    chips: &'a mut [X; 2],
}

impl<'a, X: PortExpander> PortLines<'a, X> {
    pub(crate) fn new(chips: &'a mut [X; 2]) -> Self {
        Self { chips }
    }

    /// Splits a logical line index into (chip, chip-local line).
    fn locate(&mut self, line: usize) -> Result<(&mut X, u8), CardError<X::Error>> {
        let slot = check_channel(Facility::Io, line, 0, IO_LINES)?;
        let chip = slot / EXPANDER_LINES;
        let local = (slot % EXPANDER_LINES) as u8;
        Ok((&mut self.chips[chip], local))
    }

    /// Drives one line as an output.
    pub fn set(&mut self, line: usize, state: Switch) -> Result<(), CardError<X::Error>> {
        let (chip, local) = self.locate(line)?;
        chip.write_line(local, state.is_on())?;
        Ok(())
    }

    /// Reads one line, reconfiguring it as an input first (see the type
    /// docs for why that matters).
    pub fn get(&mut self, line: usize) -> Result<bool, CardError<X::Error>> {
        let (chip, local) = self.locate(line)?;
        chip.write_line(local, true)?;
        Ok(chip.read_line(local)?)
    }

    /// Number of I/O lines.
    pub fn len(&self) -> usize {
        IO_LINES
    }

    /// Always false; the line count is fixed.
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockDelay, MockDrive, MockExpander, MockSwitch};

    // =========================================================================
    // Channel validation
    // =========================================================================

    #[test]
    fn check_channel_one_based() {
        assert_eq!(
            check_channel::<()>(Facility::Power, 1, 1, POWER_CHANNELS),
            Ok(0)
        );
        assert_eq!(
            check_channel::<()>(Facility::Power, 2, 1, POWER_CHANNELS),
            Ok(1)
        );
        assert_eq!(
            check_channel::<()>(Facility::Power, 0, 1, POWER_CHANNELS),
            Err(CardError::ChannelOutOfRange {
                facility: Facility::Power,
                channel: 0,
            })
        );
        assert_eq!(
            check_channel::<()>(Facility::Power, 3, 1, POWER_CHANNELS),
            Err(CardError::ChannelOutOfRange {
                facility: Facility::Power,
                channel: 3,
            })
        );
    }

    #[test]
    fn check_channel_zero_based() {
        assert_eq!(check_channel::<()>(Facility::Io, 0, 0, IO_LINES), Ok(0));
        assert_eq!(check_channel::<()>(Facility::Io, 31, 0, IO_LINES), Ok(31));
        assert!(check_channel::<()>(Facility::Io, 32, 0, IO_LINES).is_err());
    }

    // =========================================================================
    // PowerOutputs
    // =========================================================================

    #[test]
    fn power_set_and_get() {
        let mut relays = [MockSwitch::new(), MockSwitch::new()];
        let mut power = PowerOutputs::new(&mut relays);

        power.set(1, Switch::On).unwrap();
        assert_eq!(power.get(1), Ok(Switch::On));
        assert_eq!(power.get(2), Ok(Switch::Off));

        power.set(1, Switch::Off).unwrap();
        assert_eq!(power.get(1), Ok(Switch::Off));
    }

    #[test]
    fn power_rejects_out_of_range() {
        let mut relays = [MockSwitch::new(), MockSwitch::new()];
        let mut power = PowerOutputs::new(&mut relays);

        assert!(matches!(
            power.set(0, Switch::On),
            Err(CardError::ChannelOutOfRange {
                facility: Facility::Power,
                channel: 0,
            })
        ));
        assert!(power.set(3, Switch::On).is_err());
        assert!(power.get(3).is_err());
    }

    // =========================================================================
    // MotorOutputs
    // =========================================================================

    #[test]
    fn motor_outputs_toggle() {
        let mut pins = [MockSwitch::new(), MockSwitch::new(), MockSwitch::new()];
        let mut motors = MotorOutputs::new(&mut pins);

        motors.set(3, Switch::On).unwrap();
        assert_eq!(motors.get(3), Ok(Switch::On));
        assert_eq!(pins[2].history, vec![Switch::On]);
    }

    #[test]
    fn motor_outputs_reject_out_of_range() {
        let mut pins = [MockSwitch::new(), MockSwitch::new(), MockSwitch::new()];
        let mut motors = MotorOutputs::new(&mut pins);

        assert!(motors.set(0, Switch::On).is_err());
        assert!(motors.set(4, Switch::On).is_err());
    }

    // =========================================================================
    // TwoWayMotors
    // =========================================================================

    fn seven_motors() -> [TwoWayMotor<MockDrive, MockDelay>; TWOWAY_CHANNELS] {
        core::array::from_fn(|_| TwoWayMotor::new(MockDrive::new(), MockDelay::new()))
    }

    #[test]
    fn twoway_dispatches_to_channel() {
        let mut channels = seven_motors();
        let mut motors = TwoWayMotors::new(&mut channels);

        motors.set(4, Direction::UP).unwrap();
        assert_eq!(motors.direction(4), Ok(Direction::Forward));
        assert_eq!(motors.direction(1), Ok(Direction::Off));
    }

    #[test]
    fn twoway_speed_path() {
        let mut channels = seven_motors();
        let mut motors = TwoWayMotors::new(&mut channels);

        motors.set_speed(2, 0.4).unwrap();
        assert_eq!(motors.speed(2), Ok(0.4));
        assert_eq!(
            motors.set_speed(2, 0.0),
            Err(CardError::SpeedOutOfRange(0.0))
        );
    }

    #[test]
    fn twoway_motor_accessor() {
        let mut channels = seven_motors();
        let mut motors = TwoWayMotors::new(&mut channels);

        let m = motors.motor(7).unwrap();
        m.set_direction(Direction::Brake).unwrap();
        assert_eq!(motors.direction(7), Ok(Direction::Brake));
    }

    #[test]
    fn twoway_rejects_out_of_range() {
        let mut channels = seven_motors();
        let mut motors = TwoWayMotors::new(&mut channels);

        assert!(motors.set(0, Direction::Forward).is_err());
        assert!(motors.set(8, Direction::Forward).is_err());
        assert!(motors.motor(8).is_err());
    }

    // =========================================================================
    // PortLines
    // =========================================================================

    #[test]
    fn io_splits_chips_at_sixteen() {
        let mut chips = [MockExpander::new(), MockExpander::new()];
        let mut io = PortLines::new(&mut chips);

        io.set(15, Switch::Off).unwrap();
        io.set(16, Switch::Off).unwrap();

        assert_eq!(chips[0].writes, vec![(15, false)]);
        assert_eq!(chips[1].writes, vec![(0, false)]);
    }

    #[test]
    fn io_read_reinitializes_as_input() {
        let mut chips = [MockExpander::new(), MockExpander::new()];
        let mut io = PortLines::new(&mut chips);

        // Drive chip B line 0 low, then read it back through the facade.
        io.set(16, Switch::Off).unwrap();
        let level = io.get(16).unwrap();

        // The read released the line high first, so it reads the external
        // pull-up level, not the low we wrote.
        assert!(level);
        assert_eq!(chips[1].writes, vec![(0, false), (0, true)]);
        assert_eq!(chips[1].reads, vec![0]);
    }

    #[test]
    fn io_read_sees_external_level() {
        let mut chips = [MockExpander::new(), MockExpander::new()];
        chips[1].external[4] = false;
        let mut io = PortLines::new(&mut chips);

        assert!(!io.get(20).unwrap());
        assert!(io.get(21).unwrap());
    }

    #[test]
    fn io_rejects_out_of_range() {
        let mut chips = [MockExpander::new(), MockExpander::new()];
        let mut io = PortLines::new(&mut chips);

        assert!(matches!(
            io.set(32, Switch::On),
            Err(CardError::ChannelOutOfRange {
                facility: Facility::Io,
                channel: 32,
            })
        ));
        assert!(io.get(32).is_err());
    }
}
