//! DS18B20 temperature sensor through the kernel 1-Wire sysfs interface.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::temperature::parse_w1_payload;
use crate::traits::TemperatureProbe;

/// Root of the kernel's 1-Wire device tree.
const W1_DEVICES_DIR: &str = "/sys/bus/w1/devices";

/// Family-code prefix of DS18B20 sensors.
const DS18B20_PREFIX: &str = "28-";

/// Errors reading the 1-Wire temperature sensor.
#[derive(Debug, Error)]
pub enum W1Error {
    /// No DS18B20 device present on the bus.
    #[error("no 1-wire temperature sensor found under {W1_DEVICES_DIR}")]
    NoSensor,

    /// The sensor payload failed its CRC or did not parse.
    #[error("unreadable 1-wire sensor payload")]
    BadPayload,

    /// Sysfs read failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// DS18B20 probe backed by the `w1_therm` kernel driver.
///
/// With no pinned id the probe scans for the first `28-*` device on every
/// read, so a sensor hot-plugged after boot is picked up without reopening
/// the card.
#[derive(Debug)]
pub struct W1Probe {
    device: Option<PathBuf>,
}

impl W1Probe {
    /// Creates a probe, optionally pinned to a specific device id
    /// (e.g. `28-0316a4d1c3ff`).
    pub fn new(device: Option<&str>) -> Self {
        Self {
            device: device.map(|id| PathBuf::from(W1_DEVICES_DIR).join(id)),
        }
    }

    fn device_dir(&self) -> Result<PathBuf, W1Error> {
        if let Some(pinned) = &self.device {
            return Ok(pinned.clone());
        }
        for entry in fs::read_dir(W1_DEVICES_DIR)? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().starts_with(DS18B20_PREFIX) {
                return Ok(entry.path());
            }
        }
        Err(W1Error::NoSensor)
    }
}

impl TemperatureProbe for W1Probe {
    type Error = W1Error;

    fn read_celsius(&mut self) -> Result<f32, Self::Error> {
        let payload = fs::read_to_string(self.device_dir()?.join("w1_slave"))?;
        parse_w1_payload(&payload).ok_or(W1Error::BadPayload)
    }
}
