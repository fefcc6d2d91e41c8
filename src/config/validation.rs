//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval > 0, addresses parse)
//! - Check the node name pattern compiles
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::{RouterConfig, PLACEHOLDER_API_KEY};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("invalid socket address {:?}", config.listener.bind_address),
        ));
    }

    if config.health.probe_interval_secs == 0 {
        errors.push(ValidationError::new("health.probe_interval_secs", "must be > 0"));
    }
    if config.health.missed_ping_threshold == 0 {
        errors.push(ValidationError::new("health.missed_ping_threshold", "must be > 0"));
    }
    if let Err(e) = regex::Regex::new(&config.health.node_name_pattern) {
        errors.push(ValidationError::new("health.node_name_pattern", e.to_string()));
    }

    let prefix = &config.messaging.topic_prefix;
    if prefix.is_empty() || prefix.contains('/') {
        errors.push(ValidationError::new(
            "messaging.topic_prefix",
            "must be a single non-empty topic segment",
        ));
    }

    if config.bootstrap.url.is_none() && config.bootstrap.file.is_empty() {
        errors.push(ValidationError::new("bootstrap", "no fleet map source configured"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address {:?}", config.observability.metrics_address),
        ));
    }

    if config.admin.enabled
        && (config.admin.api_key.is_empty() || config.admin.api_key == PLACEHOLDER_API_KEY)
    {
        errors.push(ValidationError::new("admin.api_key", "must be set when admin is enabled"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
