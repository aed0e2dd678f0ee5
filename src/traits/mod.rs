//! Trait definitions for the card's hardware abstraction.
//!
//! This module defines the abstractions that allow machine-card to run on
//! the Raspberry Pi carrier board and on desktop mocks with the same logic.
//!
//! # Hardware Abstraction
//!
//! The key hardware traits are:
//!
//! - [`MotorDrive`]: H-bridge style two-way motor drive
//! - [`SwitchOutput`]: single-pin relay / unidirectional motor output
//! - [`PortExpander`]: 16-line I2C port expander
//! - [`TemperatureProbe`]: blocking 1-Wire temperature read
//! - [`Delay`]: blocking millisecond sleep for the settle step

pub mod hardware;

pub use hardware::*;
