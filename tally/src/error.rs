//! Tally-specific error types

use shared::FeedbackRule;
use std::path::PathBuf;
use thiserror::Error;

/// Reason a candidate feedback rule table was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("must contain only 1 element with lower limit 0, found multiple in {rule}")]
    MultipleDefaults { rule: FeedbackRule },

    #[error("must contain only positive lower limits, found negatives in {rule}")]
    NegativeLimit { rule: FeedbackRule },

    #[error("must contain element with lower limit 0, found none in {}", format_rules(.rules))]
    MissingDefault { rules: Vec<FeedbackRule> },
}

fn format_rules(rules: &[FeedbackRule]) -> String {
    let rules: Vec<String> = rules.iter().map(FeedbackRule::to_string).collect();
    format!("[{}]", rules.join(" "))
}

#[derive(Error, Debug)]
pub enum TallyError {
    #[error(transparent)]
    Validation(#[from] RuleViolation),

    #[error("Storage root {path} could not be prepared: {source}")]
    StorageRoot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Storage root {path} is not a directory")]
    StorageRootNotDirectory { path: PathBuf },

    #[error("File system operation failed: {operation} on {path}: {source}")]
    FileSystemError {
        operation: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Corrupt {entity} document: {source}")]
    Decode {
        entity: String,
        source: serde_json::Error,
    },

    #[error("Invalid {entity} document: {source}")]
    InvalidDocument {
        entity: String,
        source: RuleViolation,
    },

    #[error("Could not encode {entity} document: {source}")]
    Encode {
        entity: String,
        source: serde_json::Error,
    },

    #[error("Invalid {entity} document: {number} has a zero count")]
    ZeroCount { entity: String, number: i64 },

    #[error("No tally recorded for {number}")]
    UnknownNumber { number: i64 },
}

impl TallyError {
    /// Whether the caller submitted bad input (as opposed to a server fault)
    pub fn is_validation(&self) -> bool {
        matches!(self, TallyError::Validation(_))
    }
}

pub type TallyResult<T> = Result<T, TallyError>;
