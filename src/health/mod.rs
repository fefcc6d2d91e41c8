//! Health checking subsystem (failure detector).
//!
//! # Data Flow
//! ```text
//! Active probing (active.rs):
//!     Periodic timer
//!     → missed_ping += 1 for every enabled, online node
//!     → evict above threshold (online = false, sessions = 0)
//!     → publish admin probe (outside the registry lock)
//!
//! Passive announcements (passive.rs):
//!     {online} on the status channel
//!     → set liveness directly, no threshold
//!
//! Admin replies (reply.rs):
//!     successful list_sessions reply
//!     → sessions = len(list), missed_ping = 0
//!
//! State machine (state.rs):
//!     online ←→ offline
//! ```
//!
//! # Design Decisions
//! - Every evidence path goes through `Registry::mutate`
//! - Eviction is automatic, recovery is not: only an announcement revives a node
//! - Probe publish failures still count as missed probes

pub mod active;
pub mod passive;
pub mod reply;
pub mod state;

pub use active::{HealthMonitor, ProbeCycleReport};

use crate::fleet::Registry;

/// Operator enable toggle. Returns `None` for an unknown node.
pub fn set_enabled(registry: &Registry, name: &str, enable: bool) -> Option<bool> {
    let changed = registry.mutate(name, |server| state::set_enabled(server, enable))?;
    if changed {
        tracing::info!(server = %name, enable, "Server enable toggled");
    }
    Some(changed)
}
