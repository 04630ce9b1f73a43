/// Size of the heap in DRAM (mbedTLS allocates its session state here)
pub const HEAP_SIZE: usize = 72 * 1024;

/// Size of the TCP socket receive buffer for encrypted data
pub const RX_BUFFER_SIZE: usize = 4096;
/// Size of the TCP socket transmit buffer for encrypted data
pub const TX_BUFFER_SIZE: usize = 4096;

/// Maximum size of a null-terminated PEM blob handed to mbedTLS
pub const TLS_BUFFER_MAX: usize = 4096;
/// Maximum size of the null-terminated hostname used for SNI
pub const HOSTNAME_MAX: usize = 128;

/// Size of the MQTT client receive buffer for application data
pub const MQTT_RX_BUFFER_SIZE: usize = 1024;
/// Size of the MQTT client transmit buffer for application data
pub const MQTT_TX_BUFFER_SIZE: usize = 1024;
/// Maximum number of MQTT v5 properties per packet
pub const MQTT_MAX_PROPERTIES: usize = 5;
/// MQTT keep-alive announced to the broker
pub const MQTT_KEEP_ALIVE_SECS: u16 = 60;

/// How long one cooperative service call waits for an inbound publication
pub const MQTT_SERVICE_WINDOW_MS: u64 = 100;
/// Timeout on socket reads and writes
pub const SOCKET_TIMEOUT_SECS: u64 = 30;

/// Delay before re-associating after the access point dropped us
pub const WIFI_RECONNECT_DELAY_MS: u64 = 5000;
/// Upper bound on one association attempt
pub const WIFI_CONNECT_TIMEOUT_SECS: u64 = 30;
