//! Wire payloads exchanged with relay nodes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EvidenceError;

/// Admin action requesting the node's live sessions.
pub const LIST_SESSIONS: &str = "list_sessions";

/// Status value of a successful admin reply.
pub const SUCCESS: &str = "success";

/// Self-reported liveness on the status channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusAnnouncement {
    pub online: bool,
}

/// Outbound admin probe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdminProbe {
    #[serde(rename = "janus")]
    pub action: String,
    #[serde(rename = "transaction")]
    pub transaction_id: String,
    #[serde(rename = "admin_secret")]
    pub shared_secret: String,
}

impl AdminProbe {
    /// A `list_sessions` probe with a fresh transaction ID.
    pub fn list_sessions(shared_secret: &str) -> Self {
        Self {
            action: LIST_SESSIONS.to_string(),
            transaction_id: Uuid::new_v4().to_string(),
            shared_secret: shared_secret.to_string(),
        }
    }
}

/// Reply to an [`AdminProbe`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdminReply {
    #[serde(rename = "janus")]
    pub status: String,
    #[serde(default)]
    pub transaction: Option<String>,
    #[serde(default)]
    pub sessions: Option<Vec<u64>>,
}

impl AdminReply {
    /// Number of live sessions, if this reply is usable evidence.
    pub fn session_count(&self) -> Result<usize, EvidenceError> {
        if self.status != SUCCESS {
            return Err(EvidenceError::NotSuccess(self.status.clone()));
        }
        self.sessions
            .as_ref()
            .map(Vec::len)
            .ok_or(EvidenceError::Incomplete("successful reply without sessions"))
    }
}
