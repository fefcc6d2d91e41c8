//! Messaging boundary.
//!
//! # Data Flow
//! ```text
//! Inbound:
//!     broker / bridge → Message{topic, payload}
//!     → dispatch.rs (one task per message)
//!     → topic.rs (validate prefix, node name, channel)
//!     → payload.rs (decode)
//!     → health::passive / health::reply
//!
//! Outbound:
//!     health::active → MessageBus::publish(probe topic, AdminProbe)
//! ```
//!
//! # Design Decisions
//! - Transport is behind the `MessageBus` trait; only publish/subscribe semantics matter here
//! - Malformed messages are logged and dropped, never fatal to the ingestion loop

pub mod dispatch;
pub mod local;
pub mod payload;
pub mod topic;

use async_trait::async_trait;

use crate::error::BusError;

pub use dispatch::Dispatcher;
pub use local::LocalBus;
pub use topic::{Channel, NodeName, Topic, TopicScheme};

/// A raw message as carried by the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

/// Outbound side of the publish/subscribe transport.
#[async_trait]
pub trait MessageBus: Send + Sync {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BusError>;
}
