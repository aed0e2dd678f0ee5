//! Temperature access: fault-collapsing wrapper and DS18B20 payload parsing.
//!
//! The card carries a single DS18B20 on the 1-Wire bus. Callers only ever
//! want "the temperature, or nothing": [`Thermometer`] performs one blocking
//! probe read per call and collapses every failure mode - sensor absent,
//! bus error, bad CRC - into `None`. This trades diagnosability for a
//! simple call-site contract; nothing is cached and nothing is retried.
//!
//! [`parse_w1_payload`] decodes the kernel's `w1_slave` sysfs format and
//! lives here (rather than in the `rpi` backend) so it can be tested
//! without hardware.

use crate::traits::TemperatureProbe;

/// Decodes a DS18B20 `w1_slave` sysfs payload into degrees Celsius.
///
/// The payload is two lines of raw scratchpad bytes; the first ends in
/// `YES` when the CRC checked out, the second carries the reading in
/// milli-degrees after `t=`:
///
/// ```text
/// 72 01 4b 46 7f ff 0e 10 57 : crc=57 YES
/// 72 01 4b 46 7f ff 0e 10 57 t=23125
/// ```
///
/// Returns `None` for a failed CRC or any malformed payload.
///
/// # Examples
///
/// ```
/// use machine_card::temperature::parse_w1_payload;
///
/// let payload = "72 01 4b 46 7f ff 0e 10 57 : crc=57 YES\n\
///                72 01 4b 46 7f ff 0e 10 57 t=23125\n";
/// assert_eq!(parse_w1_payload(payload), Some(23.125));
/// ```
pub fn parse_w1_payload(payload: &str) -> Option<f32> {
    let mut lines = payload.lines();

    let crc_line = lines.next()?;
    if !crc_line.trim_end().ends_with("YES") {
        return None;
    }

    let data_line = lines.next()?;
    let (_, milli) = data_line.rsplit_once("t=")?;
    let milli: i32 = milli.trim().parse().ok()?;
    Some(milli as f32 / 1000.0)
}

/// Stateless temperature accessor.
///
/// Wraps a [`TemperatureProbe`] and turns its fallible reads into an
/// optional value. Every call re-queries the sensor.
///
/// # Example
///
/// ```rust
/// use machine_card::Thermometer;
/// use machine_card::hal::MockProbe;
///
/// let mut thermo = Thermometer::new(MockProbe::at(21.5));
/// assert_eq!(thermo.read(), Some(21.5));
///
/// // A failing probe never surfaces an error, just no reading.
/// let mut absent = Thermometer::new(MockProbe::new());
/// assert_eq!(absent.read(), None);
/// ```
#[derive(Debug)]
pub struct Thermometer<T: TemperatureProbe> {
    probe: T,
}

impl<T: TemperatureProbe> Thermometer<T> {
    /// Wraps a probe.
    pub fn new(probe: T) -> Self {
        Self { probe }
    }

    /// Performs one blocking read; `None` on any probe failure.
    pub fn read(&mut self) -> Option<f32> {
        self.probe.read_celsius().ok()
    }

    /// Returns a reference to the underlying probe.
    pub fn probe(&self) -> &T {
        &self.probe
    }

    /// Releases the probe handle.
    pub fn into_probe(self) -> T {
        self.probe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockProbe;

    const GOOD: &str = "72 01 4b 46 7f ff 0e 10 57 : crc=57 YES\n\
                        72 01 4b 46 7f ff 0e 10 57 t=23125\n";

    #[test]
    fn parses_valid_payload() {
        assert_eq!(parse_w1_payload(GOOD), Some(23.125));
    }

    #[test]
    fn parses_negative_reading() {
        let payload = "e8 ff 4b 46 7f ff 0c 10 9b : crc=9b YES\n\
                       e8 ff 4b 46 7f ff 0c 10 9b t=-1500\n";
        assert_eq!(parse_w1_payload(payload), Some(-1.5));
    }

    #[test]
    fn rejects_failed_crc() {
        let payload = "72 01 4b 46 7f ff 0e 10 57 : crc=57 NO\n\
                       72 01 4b 46 7f ff 0e 10 57 t=23125\n";
        assert_eq!(parse_w1_payload(payload), None);
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert_eq!(parse_w1_payload(""), None);
        assert_eq!(parse_w1_payload("garbage"), None);
        assert_eq!(
            parse_w1_payload("72 01 : crc=57 YES\nno reading here\n"),
            None
        );
        assert_eq!(
            parse_w1_payload("72 01 : crc=57 YES\n72 01 t=notanumber\n"),
            None
        );
    }

    #[test]
    fn thermometer_reads_through() {
        let mut thermo = Thermometer::new(MockProbe::at(18.0));
        assert_eq!(thermo.read(), Some(18.0));
        assert_eq!(thermo.probe().reads, 1);
    }

    #[test]
    fn thermometer_requeries_every_call() {
        let mut thermo = Thermometer::new(MockProbe::at(18.0));
        thermo.read();
        thermo.read();
        assert_eq!(thermo.probe().reads, 2);
    }

    #[test]
    fn thermometer_collapses_failure_to_none() {
        let mut thermo = Thermometer::new(MockProbe::new());
        assert_eq!(thermo.read(), None);
    }
}
