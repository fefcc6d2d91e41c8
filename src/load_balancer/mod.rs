//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! pick(country_code)
//!     → Registry::snapshot (shared lock only)
//!     → pool.rs (routable filter + regional isolation)
//!     → least_sessions.rs (nodes tied at minimum sessions)
//!     → random.rs (uniform tie-break)
//!     → node name or SelectError::NotFound
//! ```
//!
//! # Design Decisions
//! - Selection is synchronous, read-only and never does I/O
//! - A country with routable regional nodes never falls through to global ones
//! - The random source is injected so tie-breaks are reproducible in tests

pub mod least_sessions;
pub mod pool;
pub mod random;
pub mod selector;

pub use pool::PoolKind;
pub use random::{RandomSource, SharedRng};
pub use selector::Selector;
