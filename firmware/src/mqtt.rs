use embassy_net::Stack;
use embassy_time::{with_timeout, Duration, Instant};
use esp_mbedtls::{Certificates, Tls, TlsError, X509};
use heapless::Vec;
use rust_mqtt::{
    client::{
        client::MqttClient,
        client_config::{ClientConfig, MqttVersion},
    },
    packet::v5::{publish_packet::QualityOfService, reason_codes::ReasonCode},
    utils::rng_generator::CountingRng,
};

use iot_telemetry::{Broker, Credentials, Endpoint, MessageHandler, Session};

use crate::constants::*;
use crate::cstr;
use crate::transport::{self, TlsSession};

#[derive(Debug)]
pub enum Error {
    CredentialsMissing,
    #[allow(dead_code)]
    Credentials(cstr::Error),
    #[allow(dead_code)]
    Hostname(cstr::Error),
    #[allow(dead_code)]
    Certificate(TlsError),
    #[allow(dead_code)]
    Transport(transport::Error),
    #[allow(dead_code)]
    Mqtt(ReasonCode),
}

struct Pem {
    ca_cert: Vec<u8, TLS_BUFFER_MAX>,
    device_cert: Vec<u8, TLS_BUFFER_MAX>,
    private_key: Vec<u8, TLS_BUFFER_MAX>,
}

/// AWS IoT Core over mutual TLS. Owns the socket, TLS and MQTT buffers lent to
/// each session.
pub struct AwsIot {
    stack: Stack<'static>,
    tls: &'static Tls<'static>,
    pem: Option<Pem>,
    servername: [u8; HOSTNAME_MAX],
    rx_buf: [u8; RX_BUFFER_SIZE],
    tx_buf: [u8; TX_BUFFER_SIZE],
    mqtt_rx_buf: [u8; MQTT_RX_BUFFER_SIZE],
    mqtt_tx_buf: [u8; MQTT_TX_BUFFER_SIZE],
}

impl AwsIot {
    pub fn new(stack: Stack<'static>, tls: &'static Tls<'static>) -> Self {
        Self {
            stack,
            tls,
            pem: None,
            servername: [0; HOSTNAME_MAX],
            rx_buf: [0; RX_BUFFER_SIZE],
            tx_buf: [0; TX_BUFFER_SIZE],
            mqtt_rx_buf: [0; MQTT_RX_BUFFER_SIZE],
            mqtt_tx_buf: [0; MQTT_TX_BUFFER_SIZE],
        }
    }
}

impl Broker for AwsIot {
    type Error = Error;
    type Session<'s> = MqttSession<'s>;

    fn install(&mut self, credentials: &Credentials<'_>) -> Result<(), Self::Error> {
        let pem = Pem {
            ca_cert: cstr::build_pem_vec(credentials.ca_cert).map_err(Error::Credentials)?,
            device_cert: cstr::build_pem_vec(credentials.device_cert)
                .map_err(Error::Credentials)?,
            private_key: cstr::build_pem_vec(credentials.private_key)
                .map_err(Error::Credentials)?,
        };
        log::info!(
            "TLS credentials installed: ca {} bytes, cert {} bytes, key {} bytes",
            pem.ca_cert.len(),
            pem.device_cert.len(),
            pem.private_key.len()
        );
        self.pem = Some(pem);
        Ok(())
    }

    async fn open<'s>(
        &'s mut self,
        endpoint: &Endpoint<'s>,
    ) -> Result<Self::Session<'s>, Self::Error> {
        let Self {
            stack,
            tls,
            pem,
            servername,
            rx_buf,
            tx_buf,
            mqtt_rx_buf,
            mqtt_tx_buf,
        } = self;

        let pem = pem.as_ref().ok_or(Error::CredentialsMissing)?;
        let servername = cstr::write_trimmed_c_str(endpoint.host, &mut servername[..])
            .map_err(Error::Hostname)?;

        let certificates = Certificates {
            ca_chain: Some(X509::pem(&pem.ca_cert).map_err(Error::Certificate)?),
            certificate: Some(X509::pem(&pem.device_cert).map_err(Error::Certificate)?),
            private_key: Some(X509::pem(&pem.private_key).map_err(Error::Certificate)?),
            password: None,
        };

        let session = transport::connect(
            *stack,
            tls.reference(),
            &mut rx_buf[..],
            &mut tx_buf[..],
            endpoint.host,
            servername,
            endpoint.port,
            certificates,
        )
        .await
        .map_err(Error::Transport)?;

        let mut config = ClientConfig::new(MqttVersion::MQTTv5, CountingRng(20000));
        config.add_client_id(endpoint.client_id);
        config.keep_alive = MQTT_KEEP_ALIVE_SECS;
        config.max_packet_size = MQTT_RX_BUFFER_SIZE as u32;

        let mut client = MqttClient::<_, MQTT_MAX_PROPERTIES, _>::new(
            session,
            &mut mqtt_tx_buf[..],
            MQTT_TX_BUFFER_SIZE,
            &mut mqtt_rx_buf[..],
            MQTT_RX_BUFFER_SIZE,
            config,
        );

        match client.connect_to_broker().await {
            Ok(()) => log::info!("MQTT connected to broker successfully"),
            Err(e) => {
                log::error!("MQTT connect_to_broker failed: {:?}", e);
                return Err(Error::Mqtt(e));
            }
        }

        Ok(MqttSession {
            client,
            connected: true,
            last_activity: Instant::now(),
        })
    }
}

pub struct MqttSession<'a> {
    client: MqttClient<'a, TlsSession<'a>, MQTT_MAX_PROPERTIES, CountingRng>,
    connected: bool,
    last_activity: Instant,
}

impl MqttSession<'_> {
    // Any failure other than "nobody listening" leaves the session unusable.
    fn check(&mut self, result: Result<(), ReasonCode>) -> Result<(), Error> {
        match result {
            Ok(()) | Err(ReasonCode::NoMatchingSubscribers) => {
                self.last_activity = Instant::now();
                Ok(())
            }
            Err(e) => {
                self.connected = false;
                Err(Error::Mqtt(e))
            }
        }
    }
}

impl Session for MqttSession<'_> {
    type Error = Error;

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn subscribe(&mut self, topic: &str) -> Result<(), Self::Error> {
        let result = self.client.subscribe_to_topic(topic).await;
        self.check(result)?;
        log::info!("Subscribed to {}", topic);
        Ok(())
    }

    async fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Self::Error> {
        let result = self
            .client
            .send_message(topic, payload, QualityOfService::QoS0, false)
            .await;
        self.check(result)
    }

    async fn service<H: MessageHandler>(&mut self, handler: &mut H) -> Result<(), Self::Error> {
        // A receive still pending when the window closes is dropped, inbound
        // traffic on the subscribed topic is expected to be sparse.
        match with_timeout(
            Duration::from_millis(MQTT_SERVICE_WINDOW_MS),
            self.client.receive_message(),
        )
        .await
        {
            Ok(Ok((topic, payload))) => handler.on_message(topic, payload),
            Ok(Err(e)) => return self.check(Err(e)),
            Err(_) => {}
        }

        let keep_alive = Duration::from_secs(u64::from(MQTT_KEEP_ALIVE_SECS) / 2);
        if self.last_activity.elapsed() >= keep_alive {
            log::debug!("Sending MQTT ping");
            let result = self.client.send_ping().await;
            self.check(result)?;
        }

        Ok(())
    }
}
