//! Core types used throughout the prime tally service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Component identifier attached to every structured log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// HTTP facade
    WebServer,
    /// Per-number counters
    TallyStore,
    /// Non-prime feedback rule table
    FeedbackRules,
    /// JSON document storage
    Repository,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::WebServer => write!(f, "webserver"),
            Component::TallyStore => write!(f, "tally"),
            Component::FeedbackRules => write!(f, "feedback"),
            Component::Repository => write!(f, "repository"),
        }
    }
}

/// Answer to a single primality lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimeResponse {
    pub is_prime: bool,
    pub message: String,
}

/// How many times one number has been looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub number: i64,
    pub count: u64,
}

/// Body of `GET /history`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub requests: Vec<HistoryEntry>,
}

/// One row of the feedback table: shown once a non-prime has been asked
/// at least `lower_limit` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRule {
    pub lower_limit: i64,
    pub message: String,
}

impl FeedbackRule {
    pub fn new(lower_limit: i64, message: impl Into<String>) -> Self {
        Self {
            lower_limit,
            message: message.into(),
        }
    }
}

/// Uses the wire field names, e.g. `{lowerLimit:3 message:Again?}`
impl fmt::Display for FeedbackRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{lowerLimit:{} message:{}}}", self.lower_limit, self.message)
    }
}

/// Feedback rule table as exchanged over HTTP and stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackMessages {
    pub messages: Vec<FeedbackRule>,
}

impl FeedbackMessages {
    pub fn new(messages: Vec<FeedbackRule>) -> Self {
        Self { messages }
    }
}
