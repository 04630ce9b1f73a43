use core::fmt::Debug;

use crate::config::{Credentials, Endpoint};

/// Secure MQTT transport able to open broker sessions.
///
/// A session borrows the broker for its whole lifetime: the socket, TLS and
/// MQTT buffers are owned by the broker and handed to the next session once the
/// previous one is dropped.
pub trait Broker {
    type Error: Debug;
    type Session<'s>: Session
    where
        Self: 's;

    /// Install the CA certificate, device certificate and private key used by
    /// every session opened afterwards.
    fn install(&mut self, credentials: &Credentials<'_>) -> Result<(), Self::Error>;

    /// Open TCP, TLS and the MQTT session (CONNECT/CONNACK) against `endpoint`.
    /// The endpoint strings must outlive the session.
    async fn open<'s>(
        &'s mut self,
        endpoint: &Endpoint<'s>,
    ) -> Result<Self::Session<'s>, Self::Error>;
}

/// Established MQTT session.
pub trait Session {
    type Error: Debug;

    fn is_connected(&self) -> bool;

    async fn subscribe(&mut self, topic: &str) -> Result<(), Self::Error>;

    async fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Self::Error>;

    /// Cooperative read and keep-alive step. Inbound publications received
    /// during the call are handed to `handler` before it returns.
    async fn service<H: MessageHandler>(&mut self, handler: &mut H) -> Result<(), Self::Error>;
}

/// Receives messages from the subscribed topic.
pub trait MessageHandler {
    fn on_message(&mut self, topic: &str, payload: &[u8]);
}

impl<H: MessageHandler + ?Sized> MessageHandler for &mut H {
    fn on_message(&mut self, topic: &str, payload: &[u8]) {
        (**self).on_message(topic, payload)
    }
}
