//! PCF8575 16-bit I2C port expander driver.
//!
//! The PCF8575 has no direction registers: its 16 lines are
//! quasi-bidirectional. Writing a line high releases it to a weak pull-up,
//! which is both "output high" and "input mode"; writing it low sinks the
//! line hard. A read returns the actual pin levels, so a line written low
//! always reads low.
//!
//! The bus protocol is two bytes per transfer, P07..P00 first then
//! P17..P10. The driver keeps a shadow of the last written word so
//! single-line writes do not disturb the other fifteen lines; the shadow
//! starts at all-ones to match the chip's power-on state.
//!
//! Generic over [`embedded_hal::i2c::I2c`], so it works with any bus
//! implementation including `rppal`'s on the Raspberry Pi.

use embedded_hal::i2c::I2c;

use crate::traits::PortExpander;

/// Factory-default bus address of the first expander chip (A0..A2 low).
pub const PORT_A_ADDRESS: u8 = 0x20;

/// Bus address of the second expander chip (A0 high).
pub const PORT_B_ADDRESS: u8 = 0x21;

/// PCF8575 driver over any I2C bus.
///
/// # Example
///
/// ```rust,ignore
/// use machine_card::hal::pcf8575::{Pcf8575, PORT_A_ADDRESS};
/// use machine_card::traits::PortExpander;
///
/// let mut chip = Pcf8575::new(i2c, PORT_A_ADDRESS);
/// chip.write_line(4, false)?;       // sink line 4
/// let level = chip.read_line(5)?;   // read line 5
/// ```
pub struct Pcf8575<I2C> {
    i2c: I2C,
    address: u8,
    // Last written word; the chip powers up with all lines released high.
    shadow: u16,
}

impl<I2C: I2c> Pcf8575<I2C> {
    /// Creates a driver for the chip at `address` on the given bus.
    ///
    /// Assumes the chip is in its power-on state (all lines high). No bus
    /// traffic happens until the first write or read.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            shadow: 0xFFFF,
        }
    }

    /// Returns the chip's bus address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Returns the last written output word.
    pub fn shadow(&self) -> u16 {
        self.shadow
    }

    /// Writes all 16 lines at once.
    pub fn write_word(&mut self, word: u16) -> Result<(), I2C::Error> {
        self.shadow = word;
        self.i2c.write(self.address, &word.to_le_bytes())
    }

    /// Reads all 16 pin levels at once.
    pub fn read_word(&mut self) -> Result<u16, I2C::Error> {
        let mut buf = [0u8; 2];
        self.i2c.read(self.address, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Releases the underlying bus handle.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> PortExpander for Pcf8575<I2C> {
    type Error = I2C::Error;

    fn write_line(&mut self, line: u8, level: bool) -> Result<(), Self::Error> {
        let mask = 1u16 << (line & 0x0f);
        let word = if level {
            self.shadow | mask
        } else {
            self.shadow & !mask
        };
        self.write_word(word)
    }

    fn read_line(&mut self, line: u8) -> Result<bool, Self::Error> {
        let word = self.read_word()?;
        Ok(word & (1u16 << (line & 0x0f)) != 0)
    }
}
