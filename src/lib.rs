//! Relay fleet router library.
//!
//! Routes clients to the least-loaded, region-eligible media relay and
//! tracks fleet liveness through probes and announcements on a message bus.

pub mod admin;
pub mod config;
pub mod error;
pub mod fleet;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod load_balancer;
pub mod messaging;
pub mod observability;

pub use config::schema::RouterConfig;
pub use fleet::{Registry, Server};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use load_balancer::Selector;
