//! Two-way motor controller: the direction state machine.
//!
//! This module provides [`TwoWayMotor`], the one piece of real logic on the
//! card. It owns a motor drive handle and tracks the commanded direction and
//! speed, enforcing the single safety rule of the system: the drive is never
//! commanded from one energized polarity straight into the opposite one.
//! Any polarity change goes through a stop and a fixed settle delay so the
//! H-bridge is never asked to hold both sides at once.
//!
//! # Transition table
//!
//! | from \ to | Off   | Forward          | Reverse          | Brake         |
//! |-----------|-------|------------------|------------------|---------------|
//! | Off       | -     | forward(s)       | backward(s)      | backward(0)   |
//! | Forward   | stop  | forward(s)       | stop, settle, backward(s) | backward(0) |
//! | Reverse   | stop  | stop, settle, forward(s) | backward(s) | backward(0) |
//! | Brake     | stop  | stop, settle, forward(s) | stop, settle, backward(s) | backward(0) |
//!
//! Brake counts as an energized state, so leaving it for a drive command
//! also takes the stop-and-settle path. Re-issuing the current polarity
//! drives again at the stored speed with no stop step; that is how speed
//! changes take effect while spinning. After every call the stored
//! direction reflects the last requested value, even when no hardware
//! action was taken.
//!
//! # Example
//!
//! ```rust
//! use machine_card::{Direction, TwoWayMotor};
//! use machine_card::hal::{MockDelay, MockDrive};
//!
//! let mut motor = TwoWayMotor::new(MockDrive::new(), MockDelay::new());
//! motor.set_speed(0.8).unwrap();
//! motor.set_direction(Direction::UP).unwrap();
//! assert_eq!(motor.direction(), Direction::Forward);
//!
//! // Reversing goes through stop + settle before the new polarity.
//! motor.set_direction(Direction::DOWN).unwrap();
//! assert_eq!(motor.direction(), Direction::Reverse);
//! ```

use crate::error::CardError;
use crate::traits::{Delay, Direction, MotorDrive};

/// Settle delay between de-energizing one polarity and energizing the
/// opposite one, in milliseconds.
pub const DEFAULT_SETTLE_MS: u32 = 10;

/// Controller for one bidirectional motor output.
///
/// Holds the drive handle, the commanded direction, and the speed fraction.
/// State is mutated only through [`set_direction`](Self::set_direction) and
/// [`set_speed`](Self::set_speed); no other component touches it.
///
/// # Type Parameters
///
/// - `M`: the motor drive ([`MotorDrive`] trait)
/// - `D`: the settle-delay source ([`Delay`] trait)
///
/// # Thread Safety
///
/// Not thread-safe; concurrent `set_direction`/`set_speed` calls on the
/// same motor would race. Wrap each motor (or the whole card) in a mutex if
/// it must be shared across threads.
#[derive(Debug)]
pub struct TwoWayMotor<M: MotorDrive, D: Delay> {
    drive: M,
    delay: D,
    direction: Direction,
    speed: f32,
    settle_ms: u32,
}

impl<M: MotorDrive, D: Delay> TwoWayMotor<M, D> {
    /// Creates a controller around a drive handle.
    ///
    /// Starts at [`Direction::Off`] with full speed and the default settle
    /// delay of [`DEFAULT_SETTLE_MS`] milliseconds.
    pub fn new(drive: M, delay: D) -> Self {
        Self {
            drive,
            delay,
            direction: Direction::Off,
            speed: 1.0,
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }

    /// Overrides the settle delay.
    pub fn with_settle_ms(mut self, settle_ms: u32) -> Self {
        self.settle_ms = settle_ms;
        self
    }

    /// Commands a direction transition.
    ///
    /// Applies the transition table from the module docs. The stored
    /// direction is updated to `target` unconditionally, including for
    /// transitions with no hardware action (Off while already Off).
    ///
    /// # Errors
    ///
    /// Propagates any fault from the underlying drive.
    pub fn set_direction(&mut self, target: Direction) -> Result<(), CardError<M::Error>> {
        match target {
            Direction::Off => {
                if self.direction != Direction::Off {
                    self.drive.stop()?;
                }
            }
            Direction::Forward | Direction::Reverse => {
                if self.direction != target {
                    // Leaving any energized state (including a drive still
                    // reporting active after an Off command) requires the
                    // stop-and-settle step before the new polarity.
                    if self.direction != Direction::Off || self.drive.is_active() {
                        self.drive.stop()?;
                        self.delay.delay_ms(self.settle_ms);
                    }
                }
                match target {
                    Direction::Forward => self.drive.forward(self.speed)?,
                    _ => self.drive.backward(self.speed)?,
                }
            }
            Direction::Brake => {
                // Dynamic braking: reverse-drive at zero speed. Re-issued
                // even when already braking.
                self.drive.backward(0.0)?;
            }
        }

        self.direction = target;
        Ok(())
    }

    /// Changes the speed fraction and re-applies the current direction.
    ///
    /// The re-command happens immediately at the new speed with no stop
    /// step, which is safe because no polarity change is involved.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::SpeedOutOfRange`] unless `0.0 < speed <= 1.0`;
    /// the stored speed is left untouched in that case. Drive faults from
    /// the re-command propagate.
    pub fn set_speed(&mut self, speed: f32) -> Result<(), CardError<M::Error>> {
        if !(speed > 0.0 && speed <= 1.0) {
            return Err(CardError::SpeedOutOfRange(speed));
        }
        self.speed = speed;
        self.set_direction(self.direction)
    }

    /// Returns the last requested direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the current speed fraction.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Returns a reference to the underlying drive handle.
    pub fn drive(&self) -> &M {
        &self.drive
    }

    /// Returns a reference to the settle-delay source.
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Releases the drive handle.
    pub fn into_drive(self) -> M {
        self.drive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{EventLog, MockDelay, MockDrive, MotorEvent};

    fn motor_with_log() -> (TwoWayMotor<MockDrive, MockDelay>, EventLog) {
        let log = EventLog::new();
        let motor = TwoWayMotor::new(
            MockDrive::with_log(log.clone()),
            MockDelay::with_log(log.clone()),
        );
        (motor, log)
    }

    #[test]
    fn starts_off_at_full_speed() {
        let (motor, _) = motor_with_log();
        assert_eq!(motor.direction(), Direction::Off);
        assert_eq!(motor.speed(), 1.0);
    }

    #[test]
    fn off_to_forward_drives_directly() {
        let (mut motor, log) = motor_with_log();
        motor.set_direction(Direction::Forward).unwrap();

        assert_eq!(log.take(), vec![MotorEvent::Forward(1.0)]);
        assert_eq!(motor.direction(), Direction::Forward);
    }

    #[test]
    fn off_to_off_is_a_noop() {
        let (mut motor, log) = motor_with_log();
        motor.set_direction(Direction::Off).unwrap();

        assert!(log.take().is_empty());
        assert_eq!(motor.direction(), Direction::Off);
    }

    #[test]
    fn forward_to_off_stops_without_settle() {
        let (mut motor, log) = motor_with_log();
        motor.set_direction(Direction::Forward).unwrap();
        log.take();

        motor.set_direction(Direction::Off).unwrap();
        assert_eq!(log.take(), vec![MotorEvent::Stop]);
        assert_eq!(motor.direction(), Direction::Off);
    }

    #[test]
    fn polarity_reversal_interposes_stop_and_settle() {
        let (mut motor, log) = motor_with_log();
        motor.set_speed(0.6).unwrap();
        motor.set_direction(Direction::Forward).unwrap();
        log.take();

        motor.set_direction(Direction::Reverse).unwrap();
        assert_eq!(
            log.take(),
            vec![
                MotorEvent::Stop,
                MotorEvent::Settle(DEFAULT_SETTLE_MS),
                MotorEvent::Backward(0.6),
            ]
        );
    }

    #[test]
    fn reverse_to_forward_also_settles() {
        let (mut motor, log) = motor_with_log();
        motor.set_direction(Direction::Reverse).unwrap();
        log.take();

        motor.set_direction(Direction::Forward).unwrap();
        assert_eq!(
            log.take(),
            vec![
                MotorEvent::Stop,
                MotorEvent::Settle(DEFAULT_SETTLE_MS),
                MotorEvent::Forward(1.0),
            ]
        );
    }

    #[test]
    fn same_polarity_reissue_skips_stop() {
        let (mut motor, log) = motor_with_log();
        motor.set_direction(Direction::Forward).unwrap();
        log.take();

        motor.set_direction(Direction::Forward).unwrap();
        assert_eq!(log.take(), vec![MotorEvent::Forward(1.0)]);
    }

    #[test]
    fn off_with_active_drive_still_settles() {
        // A drive left spinning (e.g. after a brake command at speed)
        // must be stopped and settled before re-energizing.
        let log = EventLog::new();
        let mut drive = MockDrive::with_log(log.clone());
        drive.active = true;
        let mut motor = TwoWayMotor::new(drive, MockDelay::with_log(log.clone()));

        motor.set_direction(Direction::Forward).unwrap();
        assert_eq!(
            log.take(),
            vec![
                MotorEvent::Stop,
                MotorEvent::Settle(DEFAULT_SETTLE_MS),
                MotorEvent::Forward(1.0),
            ]
        );
    }

    #[test]
    fn brake_is_zero_speed_backward() {
        let (mut motor, log) = motor_with_log();
        motor.set_direction(Direction::Forward).unwrap();
        log.take();

        motor.set_direction(Direction::Brake).unwrap();
        assert_eq!(log.take(), vec![MotorEvent::Backward(0.0)]);
        assert_eq!(motor.direction(), Direction::Brake);
    }

    #[test]
    fn brake_reissues_when_already_braking() {
        let (mut motor, log) = motor_with_log();
        motor.set_direction(Direction::Brake).unwrap();
        log.take();

        motor.set_direction(Direction::Brake).unwrap();
        assert_eq!(log.take(), vec![MotorEvent::Backward(0.0)]);
    }

    #[test]
    fn leaving_brake_for_drive_settles() {
        let (mut motor, log) = motor_with_log();
        motor.set_direction(Direction::Brake).unwrap();
        log.take();

        motor.set_direction(Direction::Reverse).unwrap();
        assert_eq!(
            log.take(),
            vec![
                MotorEvent::Stop,
                MotorEvent::Settle(DEFAULT_SETTLE_MS),
                MotorEvent::Backward(1.0),
            ]
        );
    }

    #[test]
    fn set_speed_keeps_direction() {
        let (mut motor, _) = motor_with_log();
        motor.set_direction(Direction::Forward).unwrap();

        motor.set_speed(0.3).unwrap();
        assert_eq!(motor.direction(), Direction::Forward);
        assert_eq!(motor.speed(), 0.3);
    }

    #[test]
    fn set_speed_recommands_without_stop() {
        let (mut motor, log) = motor_with_log();
        motor.set_direction(Direction::Reverse).unwrap();
        log.take();

        motor.set_speed(0.5).unwrap();
        assert_eq!(log.take(), vec![MotorEvent::Backward(0.5)]);
    }

    #[test]
    fn set_speed_while_off_touches_no_hardware() {
        let (mut motor, log) = motor_with_log();
        motor.set_speed(0.4).unwrap();

        assert!(log.take().is_empty());
        assert_eq!(motor.speed(), 0.4);
    }

    #[test]
    fn set_speed_rejects_out_of_range() {
        let (mut motor, log) = motor_with_log();

        assert_eq!(motor.set_speed(0.0), Err(CardError::SpeedOutOfRange(0.0)));
        assert_eq!(motor.set_speed(-0.2), Err(CardError::SpeedOutOfRange(-0.2)));
        assert_eq!(motor.set_speed(1.1), Err(CardError::SpeedOutOfRange(1.1)));

        // Stored speed and hardware untouched on rejection.
        assert_eq!(motor.speed(), 1.0);
        assert!(log.take().is_empty());
    }

    #[test]
    fn set_speed_accepts_boundary_one() {
        let (mut motor, _) = motor_with_log();
        motor.set_speed(1.0).unwrap();
        assert_eq!(motor.speed(), 1.0);
    }

    #[test]
    fn custom_settle_delay() {
        let log = EventLog::new();
        let mut motor = TwoWayMotor::new(
            MockDrive::with_log(log.clone()),
            MockDelay::with_log(log.clone()),
        )
        .with_settle_ms(25);

        motor.set_direction(Direction::Forward).unwrap();
        log.take();
        motor.set_direction(Direction::Reverse).unwrap();

        assert_eq!(
            log.take(),
            vec![
                MotorEvent::Stop,
                MotorEvent::Settle(25),
                MotorEvent::Backward(1.0),
            ]
        );
    }

    #[test]
    fn direction_reflects_last_request_even_for_noops() {
        let (mut motor, _) = motor_with_log();
        motor.set_direction(Direction::Off).unwrap();
        assert_eq!(motor.direction(), Direction::Off);

        motor.set_direction(Direction::Brake).unwrap();
        motor.set_direction(Direction::Brake).unwrap();
        assert_eq!(motor.direction(), Direction::Brake);
    }
}
