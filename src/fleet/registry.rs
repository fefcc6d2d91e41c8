//! Concurrency-safe fleet registry.
//!
//! # Responsibilities
//! - Own the name -> Server map behind one reader/writer lock
//! - Expose whole-record atomic operations only
//!
//! # Design Decisions
//! - Readers get owned copies; no guard ever escapes this module
//! - Mutation closures run under the write lock and must not do I/O

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::fleet::server::Server;

/// Fleet state keyed by node name.
pub type FleetMap = HashMap<String, Server>;

#[derive(Debug, Default)]
pub struct Registry {
    servers: RwLock<FleetMap>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry already holding `fleet`.
    pub fn from_map(fleet: FleetMap) -> Self {
        let registry = Self::new();
        registry.load(fleet);
        registry
    }

    /// Replace the whole map. Called once at startup before any other use.
    pub fn load(&self, fleet: FleetMap) {
        let count = fleet.len();
        *self.servers.write() = fleet;
        tracing::info!(servers = count, "Registry loaded");
    }

    /// Read-consistent copy of every record.
    pub fn snapshot(&self) -> FleetMap {
        self.servers.read().clone()
    }

    pub fn get(&self, name: &str) -> Option<Server> {
        self.servers.read().get(name).cloned()
    }

    /// Apply `update` to the named record under the exclusive lock.
    ///
    /// Returns `None` when the node is unknown.
    pub fn mutate<R>(&self, name: &str, update: impl FnOnce(&mut Server) -> R) -> Option<R> {
        let mut servers = self.servers.write();
        servers.get_mut(name).map(update)
    }

    /// Names of all records, for callers that mutate record by record.
    pub fn names(&self) -> Vec<String> {
        self.servers.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.servers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.read().is_empty()
    }

    /// Number of nodes currently eligible for routing.
    pub fn routable_count(&self) -> usize {
        self.servers.read().values().filter(|s| s.is_routable()).count()
    }
}
