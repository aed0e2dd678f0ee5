//! Error types for card operations.
//!
//! Contract violations (bad channel index, bad speed) are rejected calls,
//! never assertions, so a misbehaving caller gets an error instead of a
//! panic. Driver faults pass through untranslated in [`CardError::Driver`];
//! nothing in this layer retries or recovers.

use thiserror::Error;

/// The four channel-indexed facility classes on the card.
///
/// Used in [`CardError::ChannelOutOfRange`] to name which facade rejected
/// the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Facility {
    /// Mains-power relay outputs, channels 1..=2.
    Power,
    /// Unidirectional motor outputs, channels 1..=3.
    Motor,
    /// Bidirectional motor outputs, channels 1..=7.
    TwoWayMotor,
    /// Generic I/O lines on the port expanders, channels 0..=31.
    Io,
}

impl Facility {
    /// Returns the facility name as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Facility::Power => "power",
            Facility::Motor => "motor",
            Facility::TwoWayMotor => "two-way motor",
            Facility::Io => "i/o",
        }
    }
}

impl core::fmt::Display for Facility {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by card and motor operations.
///
/// Generic over the driver error type `E` so each facade carries exactly the
/// fault type of the hardware behind it.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum CardError<E> {
    /// Logical channel index outside the facility's fixed range.
    #[error("channel {channel} out of range for the {facility} facility")]
    ChannelOutOfRange {
        /// Facility whose facade rejected the index.
        facility: Facility,
        /// The offending channel index.
        channel: usize,
    },

    /// Motor speed outside the valid range `(0, 1]`.
    #[error("speed {0} outside the valid range (0, 1]")]
    SpeedOutOfRange(f32),

    /// Fault reported by the underlying hardware driver.
    #[error("driver fault: {0:?}")]
    Driver(E),
}

impl<E> From<E> for CardError<E> {
    fn from(err: E) -> Self {
        CardError::Driver(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facility_names() {
        assert_eq!(Facility::Power.as_str(), "power");
        assert_eq!(Facility::Motor.as_str(), "motor");
        assert_eq!(Facility::TwoWayMotor.as_str(), "two-way motor");
        assert_eq!(Facility::Io.as_str(), "i/o");
    }

    #[test]
    fn driver_fault_wraps_via_from() {
        fn fails() -> Result<(), CardError<&'static str>> {
            Err("bus gone")?
        }
        assert_eq!(fails(), Err(CardError::Driver("bus gone")));
    }

    #[test]
    fn display_messages() {
        let err: CardError<()> = CardError::ChannelOutOfRange {
            facility: Facility::Power,
            channel: 3,
        };
        assert_eq!(
            format!("{err}"),
            "channel 3 out of range for the power facility"
        );

        let err: CardError<()> = CardError::SpeedOutOfRange(1.5);
        assert_eq!(format!("{err}"), "speed 1.5 outside the valid range (0, 1]");
    }
}
