use crate::constants::{MQTT_PORT, PUBLISH_INTERVAL_MS};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Missing(&'static str),
    MalformedPem(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    // Wi-Fi SSID to connect to
    pub ssid: &'static str,

    // Wi-Fi pre-shared key (password), empty for open networks
    pub password: &'static str,

    // MQTT broker hostname (AWS IoT endpoint)
    pub endpoint: &'static str,

    // MQTT port (8883 for TLS)
    pub port: u16,

    // MQTT client identifier, also used as DHCP hostname
    pub client_id: &'static str,

    // Root CA certificate (PEM)
    pub ca_cert: &'static str,

    // Device certificate (PEM)
    pub device_cert: &'static str,

    // Device private key (PEM)
    pub private_key: &'static str,

    // Interval between two telemetry publications
    pub publish_interval_ms: u32,
}

/// The three PEM artifacts installed into the secure transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    pub ca_cert: &'a str,
    pub device_cert: &'a str,
    pub private_key: &'a str,
}

/// Where and as whom the broker session is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub host: &'a str,
    pub port: u16,
    pub client_id: &'a str,
}

impl Config {
    pub const fn new(
        ssid: &'static str,
        password: &'static str,
        endpoint: &'static str,
        client_id: &'static str,
        ca_cert: &'static str,
        device_cert: &'static str,
        private_key: &'static str,
    ) -> Self {
        Self {
            ssid,
            password,
            endpoint,
            port: MQTT_PORT,
            client_id,
            ca_cert,
            device_cert,
            private_key,
            publish_interval_ms: PUBLISH_INTERVAL_MS,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let required = [
            ("ssid", self.ssid),
            ("endpoint", self.endpoint),
            ("client_id", self.client_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Missing(name));
            }
        }

        if self.port == 0 {
            return Err(Error::Missing("port"));
        }
        if self.publish_interval_ms == 0 {
            return Err(Error::Missing("publish_interval_ms"));
        }

        check_pem("ca_cert", self.ca_cert)?;
        check_pem("device_cert", self.device_cert)?;
        check_pem("private_key", self.private_key)?;

        Ok(())
    }

    pub fn credentials(&self) -> Credentials<'static> {
        Credentials {
            ca_cert: self.ca_cert,
            device_cert: self.device_cert,
            private_key: self.private_key,
        }
    }

    pub fn endpoint(&self) -> Endpoint<'static> {
        Endpoint {
            host: self.endpoint,
            port: self.port,
            client_id: self.client_id,
        }
    }
}

// A PEM blob must carry a BEGIN armour line followed by a matching END line.
fn check_pem(name: &'static str, pem: &str) -> Result<(), Error> {
    if pem.trim().is_empty() {
        return Err(Error::Missing(name));
    }

    let begin = pem.find("-----BEGIN ").ok_or(Error::MalformedPem(name))?;
    let end = pem[begin..]
        .find("-----END ")
        .ok_or(Error::MalformedPem(name))?;

    let body = &pem[begin..begin + end];
    match body.find('\n') {
        Some(line_end) if !body[line_end..].trim().is_empty() => Ok(()),
        _ => Err(Error::MalformedPem(name)),
    }
}
