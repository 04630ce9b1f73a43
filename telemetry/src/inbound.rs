use log::info;

use crate::broker::MessageHandler;

/// Logs every inbound message as `incoming: <topic> - <payload>`.
///
/// Payloads are expected to be JSON but are neither parsed nor acted upon.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHandler;

impl MessageHandler for LogHandler {
    fn on_message(&mut self, topic: &str, payload: &[u8]) {
        match core::str::from_utf8(payload) {
            Ok(text) => info!("incoming: {} - {}", topic, text),
            Err(_) => info!("incoming: {} - {:?}", topic, payload),
        }
    }
}
