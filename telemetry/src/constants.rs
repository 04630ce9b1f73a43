/// Topic the telemetry records are published to
pub const PUBLISH_TOPIC: &str = "esp32/pub";
/// Topic subscribed to for inbound messages
pub const SUBSCRIBE_TOPIC: &str = "esp32/sub";

/// Default MQTT over TLS port
pub const MQTT_PORT: u16 = 8883;
/// Default interval between two publish cycles
pub const PUBLISH_INTERVAL_MS: u32 = 2000;

/// Delay between two Wi-Fi association status polls
pub const WIFI_POLL_INTERVAL_MS: u32 = 500;
/// Number of status polls before giving up on the association (60 seconds)
pub const WIFI_MAX_POLLS: u32 = 120;

/// Delay between two broker connection attempts
pub const MQTT_RETRY_DELAY_MS: u32 = 100;
/// Number of broker connection attempts before reporting a timeout
pub const MQTT_MAX_ATTEMPTS: u32 = 10;
