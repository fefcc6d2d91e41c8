//! In-process message bus.
//!
//! Inbound messages queue on an unbounded channel drained by the
//! dispatcher. Published messages fan out to outbound subscribers, such as
//! a broker bridge; with none attached they are dropped like on a broker
//! topic nobody listens to.

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};

use crate::error::BusError;
use crate::messaging::{Message, MessageBus};

const OUTBOUND_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
pub struct LocalBus {
    inbound: mpsc::UnboundedSender<Message>,
    outbound: broadcast::Sender<Message>,
}

impl LocalBus {
    /// Create the bus and the receiver the dispatcher drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Message>) {
        let (inbound, inbound_rx) = mpsc::unbounded_channel();
        let (outbound, _) = broadcast::channel(OUTBOUND_CAPACITY);
        (Self { inbound, outbound }, inbound_rx)
    }

    /// Deliver a message as if it arrived from the broker.
    pub fn inject(&self, topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Result<(), BusError> {
        self.inbound
            .send(Message::new(topic, payload))
            .map_err(|_| BusError::Closed)
    }

    /// Observe everything the router publishes.
    pub fn subscribe_outbound(&self) -> broadcast::Receiver<Message> {
        self.outbound.subscribe()
    }
}

#[async_trait]
impl MessageBus for LocalBus {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BusError> {
        if self.outbound.send(Message::new(topic, payload)).is_err() {
            tracing::trace!(topic = %topic, "No outbound subscribers");
        }
        Ok(())
    }
}
