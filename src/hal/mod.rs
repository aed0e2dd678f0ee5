//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits defined in
//! [`crate::traits`].
//!
//! # Available Implementations
//!
//! - `mock`: test implementations for desktop development
//! - `pcf8575`: PCF8575 port expander driver, generic over any I2C bus
//! - `rpi`: Raspberry Pi carrier board backend (requires the `rpi` feature)

pub mod mock;
pub mod pcf8575;

#[cfg(feature = "rpi")]
pub mod rpi;

pub use mock::*;
pub use pcf8575::{Pcf8575, PORT_A_ADDRESS, PORT_B_ADDRESS};

#[cfg(feature = "rpi")]
pub use rpi::{open, PinMotor, PinSwitch, RpiCard, RpiError, W1Probe};

/// Settle delay backed by `std::thread::sleep`.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepDelay;

#[cfg(feature = "std")]
impl crate::traits::Delay for SleepDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
