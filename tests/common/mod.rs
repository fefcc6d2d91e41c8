//! Shared utilities for integration testing.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use relay_router::error::BusError;
use relay_router::fleet::{FleetMap, Registry, Server};
use relay_router::messaging::{Message, MessageBus, TopicScheme};

/// Bus that records every publish.
#[derive(Default)]
pub struct RecordingBus {
    pub published: Mutex<Vec<Message>>,
}

#[async_trait]
impl MessageBus for RecordingBus {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BusError> {
        self.published.lock().push(Message::new(topic, payload));
        Ok(())
    }
}

/// Bus whose publishes always fail.
#[derive(Default)]
pub struct FailingBus {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl MessageBus for FailingBus {
    async fn publish(&self, topic: &str, _payload: Vec<u8>) -> Result<(), BusError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(BusError::Publish {
            topic: topic.to_string(),
            reason: "broker unreachable".to_string(),
        })
    }
}

/// Bus whose publishes never complete.
#[derive(Default)]
pub struct HangingBus {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl MessageBus for HangingBus {
    async fn publish(&self, _topic: &str, _payload: Vec<u8>) -> Result<(), BusError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

pub fn registry(servers: Vec<Server>) -> Arc<Registry> {
    let map: FleetMap = servers.into_iter().map(|s| (s.name.clone(), s)).collect();
    Arc::new(Registry::from_map(map))
}

pub fn topics() -> Arc<TopicScheme> {
    Arc::new(TopicScheme::new("janus", "^[A-Za-z]+[0-9]+$").unwrap())
}
