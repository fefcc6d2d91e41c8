//! Fleet state subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     bootstrap.rs (URL, then file) → FleetMap → Registry::load
//!
//! Runtime:
//!     health monitor / dispatcher → Registry::mutate (exclusive)
//!     selector / status query     → Registry::snapshot (shared)
//! ```
//!
//! # Design Decisions
//! - Topology is fixed for the process lifetime; nodes are never added or removed
//! - One reader/writer lock guards the whole map
//! - No I/O happens while the lock is held

pub mod bootstrap;
pub mod registry;
pub mod server;

pub use registry::{FleetMap, Registry};
pub use server::Server;
