//! HTTP query subsystem.
//!
//! # Data Flow
//! ```text
//! GET  /server          → Selector::pick("")
//! POST /server          → request.rs (client descriptor) → Selector::pick(country_code)
//! GET  /status          → Registry::snapshot
//! POST /bus/{*topic}    → LocalBus::inject (broker bridge ingress)
//! PUT  /admin/...       → admin subsystem (bearer auth)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
