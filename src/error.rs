//! Error types shared across the router.

use thiserror::Error;

/// Selection outcome when no routable node exists for the requested pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("no routable server for country code {country_code:?}")]
    NotFound { country_code: String },
}

/// Inbound liveness evidence that was rejected before touching the registry.
#[derive(Debug, Error)]
pub enum EvidenceError {
    #[error("unrecognised topic: {0}")]
    Topic(String),

    #[error("node name {0:?} does not match the naming pattern")]
    NodeName(String),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("incomplete payload: {0}")]
    Incomplete(&'static str),

    #[error("admin reply reported {0:?}")]
    NotSuccess(String),
}

impl EvidenceError {
    /// Short label used for the rejection metric.
    pub fn reason(&self) -> &'static str {
        match self {
            EvidenceError::Topic(_) => "topic",
            EvidenceError::NodeName(_) => "node_name",
            EvidenceError::Payload(_) => "payload",
            EvidenceError::UnknownNode(_) => "unknown_node",
            EvidenceError::Incomplete(_) => "incomplete",
            EvidenceError::NotSuccess(_) => "not_success",
        }
    }
}

/// Failure to hand a message to the message bus.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("bus closed")]
    Closed,

    #[error("publish to {topic} failed: {reason}")]
    Publish { topic: String, reason: String },

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failure to obtain the initial fleet map.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("fetch error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("fleet map is empty")]
    Empty,
}

/// Fatal error during process startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("bootstrap failed: {0}")]
    Bootstrap(#[from] BootstrapError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
