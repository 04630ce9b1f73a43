use core::fmt::Write;
use heapless::String;

const TIME_KEY: &str = "{\"time\":";
const SENSOR_KEY: &str = ",\"sensor_a0\":";
const CLOSE: &str = "}";

/// Widest decimal rendering of the two fields (`u64::MAX`, `u16::MAX`)
const TIME_DIGITS_MAX: usize = 20;
const SENSOR_DIGITS_MAX: usize = 5;

/// Capacity of the serialized record, derived from the record layout so the
/// largest possible record always fits.
pub const PAYLOAD_CAPACITY: usize =
    TIME_KEY.len() + TIME_DIGITS_MAX + SENSOR_KEY.len() + SENSOR_DIGITS_MAX + CLOSE.len();

pub type Payload = String<PAYLOAD_CAPACITY>;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Overflow,
}

/// One telemetry sample, published as `{"time":..,"sensor_a0":..}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Telemetry {
    // Milliseconds since boot
    pub time: u64,
    // Raw ADC reading
    pub sensor_a0: u16,
}

impl Telemetry {
    pub fn new(time: u64, sensor_a0: u16) -> Self {
        Self { time, sensor_a0 }
    }

    pub fn to_json(&self) -> Result<Payload, Error> {
        let mut payload = Payload::new();
        write!(
            payload,
            "{}{}{}{}{}",
            TIME_KEY, self.time, SENSOR_KEY, self.sensor_a0, CLOSE
        )
        .map_err(|_| Error::Overflow)?;
        Ok(payload)
    }
}
