use core::fmt::Debug;

use embedded_hal_async::delay::DelayNs;
use log::{error, info, warn};

use crate::broker::{Broker, Session};
use crate::config::{Credentials, Endpoint};
use crate::constants::{
    MQTT_MAX_ATTEMPTS, MQTT_RETRY_DELAY_MS, SUBSCRIBE_TOPIC, WIFI_MAX_POLLS, WIFI_POLL_INTERVAL_MS,
};
use crate::network::Network;
use crate::retry::RetryPolicy;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    WifiStartFailed,
    WifiTimeout,
    CredentialsRejected,
    BrokerTimeout,
    SubscribeFailed,
}

/// Brings the device from power-on to a publish-ready session.
#[derive(Debug, Clone, Copy)]
pub struct Connector {
    wifi: RetryPolicy,
    broker: RetryPolicy,
}

impl Default for Connector {
    fn default() -> Self {
        Self::new(
            RetryPolicy::new(WIFI_MAX_POLLS, WIFI_POLL_INTERVAL_MS),
            RetryPolicy::new(MQTT_MAX_ATTEMPTS, MQTT_RETRY_DELAY_MS),
        )
    }
}

impl Connector {
    pub fn new(wifi: RetryPolicy, broker: RetryPolicy) -> Self {
        Self { wifi, broker }
    }

    /// Start station-mode association and poll until the interface reports
    /// connected, or the Wi-Fi retry budget runs out.
    pub async fn associate<N, D>(&self, network: &mut N, delay: &mut D) -> Result<(), Error>
    where
        N: Network,
        D: DelayNs,
    {
        info!("Connecting to Wi-Fi");
        network.begin().await.map_err(|e| {
            error!("Failed to start Wi-Fi: {:?}", e);
            Error::WifiStartFailed
        })?;

        for attempt in self.wifi.attempts() {
            if network.is_connected() {
                info!("Wi-Fi connected");
                return Ok(());
            }
            if self.wifi.is_last(attempt) {
                break;
            }
            info!(
                "Waiting for Wi-Fi association ({}/{})",
                attempt,
                self.wifi.limit()
            );
            delay.delay_ms(self.wifi.delay_ms).await;
        }

        error!("Wi-Fi not associated after {} ms", self.wifi.budget_ms());
        Err(Error::WifiTimeout)
    }

    pub fn install<B: Broker>(
        &self,
        broker: &mut B,
        credentials: &Credentials<'_>,
    ) -> Result<(), Error> {
        broker.install(credentials).map_err(|e| {
            error!("TLS credentials rejected: {:?}", e);
            Error::CredentialsRejected
        })
    }

    /// Start waiting for a broker session. Feed each failed `Broker::open`
    /// into [`BrokerWait::failed`].
    pub fn broker_wait(&self, endpoint: &Endpoint<'_>) -> BrokerWait {
        info!(
            "Connecting to AWS IoT {}:{} as {}",
            endpoint.host, endpoint.port, endpoint.client_id
        );
        BrokerWait {
            policy: self.broker,
            attempt: 0,
        }
    }

    /// Subscribe the freshly opened session to the inbound topic.
    pub async fn subscribe<S, N>(&self, session: &mut S, network: &N) -> Result<(), Error>
    where
        S: Session,
        N: Network,
    {
        if !session.is_connected() {
            warn!("AWS IoT timeout");
            return Err(Error::BrokerTimeout);
        }

        session.subscribe(SUBSCRIBE_TOPIC).await.map_err(|e| {
            error!("Failed to subscribe to {}: {:?}", SUBSCRIBE_TOPIC, e);
            Error::SubscribeFailed
        })?;

        info!("AWS IoT connected");
        if let Some(ip) = network.local_ip() {
            info!("IP address: {}", ip);
        }

        Ok(())
    }
}

/// Attempt counter for the broker connection phase.
#[derive(Debug)]
pub struct BrokerWait {
    policy: RetryPolicy,
    attempt: u32,
}

impl BrokerWait {
    /// Record a failed attempt. Sleeps before the next attempt, or reports the
    /// timeout once the budget is spent.
    pub async fn failed<E, D>(&mut self, error: &E, delay: &mut D) -> Result<(), Error>
    where
        E: Debug,
        D: DelayNs,
    {
        self.attempt += 1;

        if self.policy.is_last(self.attempt) {
            warn!(
                "AWS IoT timeout after {} attempts, last error: {:?}",
                self.attempt, error
            );
            return Err(Error::BrokerTimeout);
        }

        info!(
            "Broker attempt {}/{} failed: {:?}",
            self.attempt,
            self.policy.limit(),
            error
        );
        delay.delay_ms(self.policy.delay_ms).await;
        Ok(())
    }

    pub fn attempts(&self) -> u32 {
        self.attempt
    }
}
