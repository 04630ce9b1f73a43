use esp_hal::{
    analog::adc::{Adc, AdcConfig, AdcPin, Attenuation},
    peripherals::{ADC1, GPIO36},
    Blocking,
};

use iot_telemetry::AnalogInput;

/// Conversion is polled at most this many times before giving up
const MAX_POLLS: u32 = 10_000;

#[derive(Debug)]
pub enum Error {
    ConversionTimeout,
}

/// Light sensor on GPIO36 (ADC1 channel 0), 12-bit readings in 0..=4095.
pub struct LightSensor {
    adc: Adc<'static, ADC1<'static>, Blocking>,
    pin: AdcPin<GPIO36<'static>, ADC1<'static>>,
}

impl LightSensor {
    pub fn new(adc1: ADC1<'static>, gpio36: GPIO36<'static>) -> Self {
        let mut config = AdcConfig::new();
        // 11 dB attenuation covers the full 0-3.3 V input range
        let pin = config.enable_pin(gpio36, Attenuation::_11dB);
        let adc = Adc::new(adc1, config);

        Self { adc, pin }
    }
}

impl AnalogInput for LightSensor {
    type Error = Error;

    fn read(&mut self) -> Result<u16, Self::Error> {
        // The first poll starts a conversion, later polls return once it completed.
        for _ in 0..MAX_POLLS {
            if let Ok(value) = self.adc.read_oneshot(&mut self.pin) {
                return Ok(value);
            }
        }
        Err(Error::ConversionTimeout)
    }
}
