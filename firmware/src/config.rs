pub use iot_telemetry::Config;

// config values are generated at compile time from cfg.toml
include!(concat!(env!("OUT_DIR"), "/config.rs"));
