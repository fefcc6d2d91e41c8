//! Admin probe reply ingestion.
//!
//! A successful reply is evidence of life and carries the session count.
//! Anything else is dropped by the caller without touching the registry.

use crate::error::EvidenceError;
use crate::fleet::server::now_unix;
use crate::fleet::Registry;
use crate::health::state;
use crate::messaging::payload::AdminReply;
use crate::messaging::topic::NodeName;

/// Apply an admin reply for `node`. Returns the recorded session count.
pub fn apply_admin_reply(
    registry: &Registry,
    node: &NodeName,
    reply: &AdminReply,
) -> Result<usize, EvidenceError> {
    let sessions = reply.session_count()?;
    let now = now_unix();

    registry
        .mutate(node.as_str(), |server| state::record_sessions(server, sessions, now))
        .ok_or_else(|| EvidenceError::UnknownNode(node.to_string()))?;

    tracing::debug!(
        server = %node,
        sessions,
        transaction = reply.transaction.as_deref().unwrap_or_default(),
        "Admin reply applied"
    );
    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::{FleetMap, Server};
    use crate::messaging::topic::TopicScheme;

    fn setup() -> (Registry, NodeName) {
        let mut map = FleetMap::new();
        map.insert("str1".into(), Server::new("str1", "a").with_sessions(8));
        let scheme = TopicScheme::new("janus", "^[a-z]+[0-9]+$").unwrap();
        (Registry::from_map(map), scheme.node_name("str1").unwrap())
    }

    fn reply(json: &str) -> AdminReply {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_success_updates_sessions() {
        let (registry, node) = setup();
        registry.mutate("str1", |s| s.missed_ping = 3);

        let count = apply_admin_reply(&registry, &node, &reply(r#"{"janus":"success","sessions":[1,2,3]}"#)).unwrap();
        assert_eq!(count, 3);
        let s = registry.get("str1").unwrap();
        assert_eq!(s.sessions, 3);
        assert_eq!(s.missed_ping, 0);
        assert!(s.last_seen > 0);
    }

    #[test]
    fn test_failure_reply_leaves_record_alone() {
        let (registry, node) = setup();
        registry.mutate("str1", |s| s.missed_ping = 2);
        let before = registry.get("str1").unwrap();

        assert!(apply_admin_reply(&registry, &node, &reply(r#"{"janus":"error","sessions":[]}"#)).is_err());
        assert_eq!(registry.get("str1").unwrap(), before);
    }
}
