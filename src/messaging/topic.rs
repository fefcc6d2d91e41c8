//! Typed topic addressing.
//!
//! Topics have the shape `{prefix}/{node}/{channel}`. Node identity is
//! validated here once so handlers only ever see a [`NodeName`].

use regex::Regex;
use std::fmt;

use crate::error::EvidenceError;

const STATUS_CHANNEL: &str = "status";
const PROBE_CHANNEL: &str = "to-janus-admin";
const REPLY_CHANNEL: &str = "from-janus-admin";

/// A node identity that passed the naming pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName(String);

impl NodeName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inbound channels the router subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Unsolicited `{online}` announcements.
    Status,
    /// Replies to admin probes.
    AdminReply,
}

/// A parsed inbound topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub node: NodeName,
    pub channel: Channel,
}

/// Topic layout plus the node naming rule.
#[derive(Debug, Clone)]
pub struct TopicScheme {
    prefix: String,
    node_pattern: Regex,
}

impl TopicScheme {
    pub fn new(prefix: impl Into<String>, node_pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            prefix: prefix.into(),
            node_pattern: Regex::new(node_pattern)?,
        })
    }

    /// Validate a raw node identity.
    pub fn node_name(&self, raw: &str) -> Result<NodeName, EvidenceError> {
        if self.node_pattern.is_match(raw) {
            Ok(NodeName(raw.to_string()))
        } else {
            Err(EvidenceError::NodeName(raw.to_string()))
        }
    }

    /// Parse an inbound topic, rejecting anything outside the scheme.
    pub fn parse(&self, topic: &str) -> Result<Topic, EvidenceError> {
        let mut parts = topic.split('/');
        let (Some(prefix), Some(node), Some(channel), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(EvidenceError::Topic(topic.to_string()));
        };

        if prefix != self.prefix {
            return Err(EvidenceError::Topic(topic.to_string()));
        }

        let channel = match channel {
            STATUS_CHANNEL => Channel::Status,
            REPLY_CHANNEL => Channel::AdminReply,
            _ => return Err(EvidenceError::Topic(topic.to_string())),
        };

        Ok(Topic {
            node: self.node_name(node)?,
            channel,
        })
    }

    pub fn status_topic(&self, node: &str) -> String {
        format!("{}/{}/{}", self.prefix, node, STATUS_CHANNEL)
    }

    pub fn probe_topic(&self, node: &str) -> String {
        format!("{}/{}/{}", self.prefix, node, PROBE_CHANNEL)
    }

    pub fn reply_topic(&self, node: &str) -> String {
        format!("{}/{}/{}", self.prefix, node, REPLY_CHANNEL)
    }

    /// Wildcard subscriptions for a pattern-matching broker.
    pub fn subscriptions(&self) -> [String; 2] {
        [self.status_topic("+"), self.reply_topic("+")]
    }
}
