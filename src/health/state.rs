//! Node liveness state machine.
//!
//! # States
//! - online: node may receive traffic (if enabled)
//! - offline: node is excluded from selection
//!
//! # State Transitions
//! ```text
//! online  → offline: missed probes > threshold, or announcement {online: false}
//! offline → online:  announcement {online: true} only
//! ```
//!
//! Every function here runs inside `Registry::mutate` and touches memory only.

use crate::fleet::Server;

/// What one probe clock tick did to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Disabled or already offline; untouched.
    Skipped,
    /// Counter advanced; a probe should be sent.
    Probe { missed_ping: u32 },
    /// Counter crossed the threshold; the node was taken offline.
    Evicted { missed_ping: u32 },
}

/// Advance the failure detector for one tick.
pub fn probe_tick(server: &mut Server, threshold: u32) -> TickOutcome {
    if !server.is_routable() {
        return TickOutcome::Skipped;
    }

    server.missed_ping = server.missed_ping.saturating_add(1);
    if server.missed_ping > threshold {
        server.online = false;
        server.sessions = 0;
        TickOutcome::Evicted {
            missed_ping: server.missed_ping,
        }
    } else {
        TickOutcome::Probe {
            missed_ping: server.missed_ping,
        }
    }
}

/// Apply an authoritative self-report. Returns the previous `online` value.
pub fn announce(server: &mut Server, online: bool, now: i64) -> bool {
    let previous = server.online;
    server.online = online;
    server.missed_ping = 0;
    if online {
        server.last_seen = now;
    } else {
        server.sessions = 0;
    }
    previous
}

/// Apply a successful admin reply. Liveness is left as is.
pub fn record_sessions(server: &mut Server, sessions: usize, now: i64) {
    server.sessions = sessions;
    server.missed_ping = 0;
    server.last_seen = now;
}

/// Operator toggle. Returns true when the value changed.
pub fn set_enabled(server: &mut Server, enable: bool) -> bool {
    if server.enable == enable {
        return false;
    }
    server.enable = enable;
    // A stale counter must not evict a node the moment it is re-enabled.
    server.missed_ping = 0;
    true
}
