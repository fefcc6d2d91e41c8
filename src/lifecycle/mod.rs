//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Bootstrap fleet map → Registry → Bus → Dispatcher
//!     → Probe clock → HTTP listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → every task exits its loop
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: no usable fleet map is fatal
//! - Listeners start last (traffic only when the registry is loaded)

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
