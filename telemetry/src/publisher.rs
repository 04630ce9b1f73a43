use log::{debug, error, info};

use crate::broker::Session;
use crate::clock::Uptime;
use crate::constants::PUBLISH_TOPIC;
use crate::sensor::AnalogInput;
use crate::telemetry::{self, Telemetry};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    NotConnected,
    Sensor,
    Serialize(telemetry::Error),
    Publish,
}

/// Samples the analog input and publishes one telemetry record per call.
#[derive(Debug, Clone, Copy)]
pub struct Publisher {
    topic: &'static str,
}

impl Default for Publisher {
    fn default() -> Self {
        Self::new(PUBLISH_TOPIC)
    }
}

impl Publisher {
    pub fn new(topic: &'static str) -> Self {
        Self { topic }
    }

    pub fn topic(&self) -> &'static str {
        self.topic
    }

    pub async fn publish<S, A, C>(
        &self,
        session: &mut S,
        sensor: &mut A,
        clock: &C,
    ) -> Result<Telemetry, Error>
    where
        S: Session,
        A: AnalogInput,
        C: Uptime,
    {
        if !session.is_connected() {
            return Err(Error::NotConnected);
        }

        let time = clock.now_ms();
        let sensor_a0 = sensor.read().map_err(|e| {
            error!("ADC read failed: {:?}", e);
            Error::Sensor
        })?;
        info!("{}", sensor_a0);

        let record = Telemetry::new(time, sensor_a0);
        let payload = record.to_json().map_err(Error::Serialize)?;
        debug!("Publishing {} to {}", payload, self.topic);

        session
            .publish(self.topic, payload.as_bytes())
            .await
            .map_err(|e| {
                error!("Failed to publish to {}: {:?}", self.topic, e);
                Error::Publish
            })?;

        Ok(record)
    }
}
