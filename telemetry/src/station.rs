use core::convert::Infallible;

use embedded_hal_async::delay::DelayNs;
use log::{error, warn};

use crate::broker::{Broker, MessageHandler, Session};
use crate::clock::Uptime;
use crate::config::Config;
use crate::connector::{self, Connector};
use crate::network::Network;
use crate::publisher::Publisher;
use crate::sensor::AnalogInput;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Connect(connector::Error),
    SessionLost,
}

impl From<connector::Error> for Error {
    fn from(e: connector::Error) -> Self {
        Error::Connect(e)
    }
}

/// Owns everything the connect/publish cycle needs except the network and
/// broker, which are lent to each session.
pub struct Station<A, C, D, H> {
    config: Config,
    connector: Connector,
    publisher: Publisher,
    sensor: A,
    clock: C,
    delay: D,
    handler: H,
}

impl<A, C, D, H> Station<A, C, D, H>
where
    A: AnalogInput,
    C: Uptime,
    D: DelayNs,
    H: MessageHandler,
{
    pub fn new(config: Config, sensor: A, clock: C, delay: D, handler: H) -> Self {
        Self {
            config,
            connector: Connector::default(),
            publisher: Publisher::default(),
            sensor,
            clock,
            delay,
            handler,
        }
    }

    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connector = connector;
        self
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Connect, publish until the session drops, then connect again.
    pub async fn run<N, B>(&mut self, network: &mut N, broker: &mut B) -> !
    where
        N: Network,
        B: Broker,
    {
        loop {
            let Err(e) = self.run_session(network, broker).await;
            // Connector failures were already reported where they happened.
            if e == Error::SessionLost {
                error!("Session ended: {:?}", e);
            }
            self.delay.delay_ms(self.config.publish_interval_ms).await;
        }
    }

    /// One connector pass followed by the publish loop. Only returns once the
    /// connector gave up or the session was lost.
    pub async fn run_session<N, B>(
        &mut self,
        network: &mut N,
        broker: &mut B,
    ) -> Result<Infallible, Error>
    where
        N: Network,
        B: Broker,
    {
        self.connector.associate(network, &mut self.delay).await?;
        self.connector.install(broker, &self.config.credentials())?;

        let endpoint = self.config.endpoint();
        let mut wait = self.connector.broker_wait(&endpoint);

        loop {
            match broker.open(&endpoint).await {
                Ok(mut session) => {
                    self.connector.subscribe(&mut session, network).await?;
                    return Err(self.serve(&mut session).await);
                }
                Err(e) => wait.failed(&e, &mut self.delay).await?,
            }
        }
    }

    async fn serve<S: Session>(&mut self, session: &mut S) -> Error {
        loop {
            if !session.is_connected() {
                warn!("AWS IoT session lost");
                return Error::SessionLost;
            }

            if let Err(e) = self
                .publisher
                .publish(session, &mut self.sensor, &self.clock)
                .await
            {
                warn!("Publish failed: {:?}", e);
            }

            if let Err(e) = session.service(&mut self.handler).await {
                warn!("MQTT service failed: {:?}", e);
            }

            self.delay.delay_ms(self.config.publish_interval_ms).await;
        }
    }
}
