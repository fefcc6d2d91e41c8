//! Inbound message dispatch.

use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

use crate::error::EvidenceError;
use crate::fleet::Registry;
use crate::health::{passive, reply};
use crate::messaging::payload::{AdminReply, StatusAnnouncement};
use crate::messaging::topic::{Channel, TopicScheme};
use crate::messaging::Message;
use crate::observability::metrics;

/// Routes inbound messages to the matching evidence handler.
pub struct Dispatcher {
    registry: Arc<Registry>,
    topics: Arc<TopicScheme>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>, topics: Arc<TopicScheme>) -> Self {
        Self { registry, topics }
    }

    /// Validate and apply one message.
    pub fn handle(&self, message: &Message) -> Result<Channel, EvidenceError> {
        tracing::debug!(
            topic = %message.topic,
            payload = %String::from_utf8_lossy(&message.payload),
            "Inbound message"
        );

        let topic = self.topics.parse(&message.topic)?;
        match topic.channel {
            Channel::Status => {
                let announcement: StatusAnnouncement = serde_json::from_slice(&message.payload)?;
                passive::apply_status_announcement(&self.registry, &topic.node, announcement)?;
                metrics::record_routable_nodes(self.registry.routable_count());
            }
            Channel::AdminReply => {
                let admin_reply: AdminReply = serde_json::from_slice(&message.payload)?;
                reply::apply_admin_reply(&self.registry, &topic.node, &admin_reply)?;
            }
        }
        Ok(topic.channel)
    }

    /// Handle a message, logging and dropping anything rejected.
    pub fn process(&self, message: &Message) {
        if let Err(e) = self.handle(message) {
            match &e {
                EvidenceError::NotSuccess(_) => {
                    tracing::debug!(topic = %message.topic, error = %e, "Admin reply discarded");
                }
                _ => {
                    tracing::warn!(topic = %message.topic, error = %e, "Inbound message rejected");
                }
            }
            metrics::record_evidence_rejected(e.reason());
        }
    }

    /// Drain `inbound`, handling each message on its own task.
    pub async fn run(
        self: Arc<Self>,
        mut inbound: mpsc::UnboundedReceiver<Message>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        tracing::info!(subscriptions = ?self.topics.subscriptions(), "Dispatcher starting");

        loop {
            tokio::select! {
                received = inbound.recv() => {
                    let Some(message) = received else {
                        tracing::info!("Inbound channel closed, dispatcher exiting");
                        break;
                    };
                    let dispatcher = self.clone();
                    tokio::spawn(async move {
                        dispatcher.process(&message);
                    });
                }
                _ = shutdown.recv() => {
                    tracing::info!("Dispatcher received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
