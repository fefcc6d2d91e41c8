//! Passive status announcements.
//!
//! # Responsibilities
//! - Apply `{online}` self-reports from the status channel
//! - Log every status change
//!
//! # Design Decisions
//! - `online: false` is authoritative and takes effect without a threshold
//! - This is the only path that brings an evicted node back online

use crate::error::EvidenceError;
use crate::fleet::server::now_unix;
use crate::fleet::Registry;
use crate::health::state;
use crate::messaging::payload::StatusAnnouncement;
use crate::messaging::topic::NodeName;

/// Apply a status announcement for `node`.
pub fn apply_status_announcement(
    registry: &Registry,
    node: &NodeName,
    announcement: StatusAnnouncement,
) -> Result<(), EvidenceError> {
    let now = now_unix();
    let previous = registry
        .mutate(node.as_str(), |server| state::announce(server, announcement.online, now))
        .ok_or_else(|| EvidenceError::UnknownNode(node.to_string()))?;

    if previous != announcement.online {
        tracing::info!(
            server = %node,
            old_status = previous,
            new_status = announcement.online,
            "Server status changed via announcement"
        );
    }
    Ok(())
}
