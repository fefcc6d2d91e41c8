//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where the initial fleet map comes from.
    pub bootstrap: BootstrapConfig,

    /// Failure detector settings.
    pub health: HealthConfig,

    /// Message bus topics and credentials.
    pub messaging: MessagingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Operator API settings.
    pub admin: AdminConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Bootstrap fleet map sources. The URL is tried before the file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// HTTP endpoint returning the fleet JSON map.
    pub url: Option<String>,

    /// Local JSON fallback.
    pub file: String,

    /// Fetch timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            url: None,
            file: "conf.json".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Failure detector configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Probe clock period in seconds.
    pub probe_interval_secs: u64,

    /// A node is evicted once its missed probe count exceeds this.
    pub missed_ping_threshold: u32,

    /// Regex a node identity must match to be accepted from the bus.
    pub node_name_pattern: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            probe_interval_secs: 10,
            missed_ping_threshold: 3,
            node_name_pattern: "^[A-Za-z]+[0-9]+$".to_string(),
        }
    }
}

/// Message bus configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// First topic segment, e.g. `janus` in `janus/str1/status`.
    pub topic_prefix: String,

    /// Secret sent with every admin probe.
    pub admin_secret: String,

    /// Where the router announces its own presence, if anywhere.
    pub service_status_topic: Option<String>,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            topic_prefix: "janus".to_string(),
            admin_secret: String::new(),
            service_status_topic: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Operator API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount the admin routes.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

/// Value rejected by validation when admin routes are enabled.
pub const PLACEHOLDER_API_KEY: &str = "CHANGE_ME_IN_PRODUCTION";

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: PLACEHOLDER_API_KEY.to_string(),
        }
    }
}
