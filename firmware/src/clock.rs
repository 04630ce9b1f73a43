use embassy_time::Instant;

use iot_telemetry::Uptime;

/// Milliseconds since boot from the embassy time driver.
#[derive(Debug, Default, Clone, Copy)]
pub struct BootClock;

impl Uptime for BootClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
