#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

//! Connect-then-publish core of the ESP32 AWS IoT sensor node.
//!
//! The hardware facing pieces (Wi-Fi, TLS, MQTT, ADC, clock) are reached through
//! the traits in [`network`], [`broker`], [`sensor`] and [`clock`], so the
//! control flow in [`station`] can run against the ESP32 drivers or against
//! simulated ones.

pub mod broker;
pub mod clock;
pub mod config;
pub mod connector;
pub mod constants;
pub mod inbound;
pub mod network;
pub mod publisher;
pub mod retry;
pub mod sensor;
pub mod station;
pub mod telemetry;

pub use broker::{Broker, MessageHandler, Session};
pub use clock::Uptime;
pub use config::{Config, Credentials, Endpoint};
pub use network::Network;
pub use sensor::AnalogInput;
pub use station::Station;
pub use telemetry::Telemetry;
