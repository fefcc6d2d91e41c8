//! Fleet node record.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A single media-relay node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Server {
    /// Unique, stable identity.
    #[serde(default)]
    pub name: String,
    /// Routing target handed to clients.
    pub dns: String,
    /// Active session count reported by the node.
    #[serde(default)]
    pub sessions: usize,
    /// Operator participation toggle.
    pub enable: bool,
    /// Derived liveness flag.
    #[serde(default)]
    pub online: bool,
    /// Region affinity code; empty means global.
    #[serde(default)]
    pub region: String,
    /// Consecutive unanswered probes. Internal to the failure detector.
    #[serde(default, skip_serializing)]
    pub missed_ping: u32,
    /// Unix seconds of the last accepted liveness evidence, 0 if never.
    #[serde(default)]
    pub last_seen: i64,
}

impl Server {
    pub fn new(name: impl Into<String>, dns: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dns: dns.into(),
            sessions: 0,
            enable: true,
            online: true,
            region: String::new(),
            missed_ping: 0,
            last_seen: 0,
        }
    }

    /// Builder-style region setter.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Builder-style session setter.
    pub fn with_sessions(mut self, sessions: usize) -> Self {
        self.sessions = sessions;
        self
    }

    /// Builder-style liveness setter.
    pub fn with_online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    /// Builder-style enable setter.
    pub fn with_enable(mut self, enable: bool) -> Self {
        self.enable = enable;
        self
    }

    /// A node receives traffic only when enabled and online.
    pub fn is_routable(&self) -> bool {
        self.enable && self.online
    }

    pub fn is_global(&self) -> bool {
        self.region.is_empty()
    }
}

/// Current wall clock as unix seconds.
pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_record_defaults() {
        let server: Server =
            serde_json::from_str(r#"{"name":"str1","dns":"str1.example.com","enable":true}"#).unwrap();
        assert_eq!(server.sessions, 0);
        assert!(!server.online);
        assert!(server.is_global());
        assert_eq!(server.missed_ping, 0);
        assert!(!server.is_routable());
    }

    #[test]
    fn test_routable_requires_enable_and_online() {
        let s = Server::new("str1", "a");
        assert!(s.is_routable());
        assert!(!s.clone().with_enable(false).is_routable());
        assert!(!s.with_online(false).is_routable());
    }

    #[test]
    fn test_missed_ping_not_serialized() {
        let mut server = Server::new("str1", "a");
        server.missed_ping = 2;
        let value = serde_json::to_value(&server).unwrap();
        assert!(value.get("missed_ping").is_none());
        assert_eq!(value["name"], "str1");
    }
}
