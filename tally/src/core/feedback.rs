//! Feedback rule table for non-prime lookups
//!
//! A table maps a minimum repeat count to the message shown once a non-prime
//! has been asked at least that many times. A valid table always holds
//! exactly one rule with limit 0, so every count resolves to some message.

use serde::{Deserialize, Serialize};
use shared::{FeedbackMessages, FeedbackRule};

use crate::error::RuleViolation;
use crate::traits::Document;

/// Validated rule table, sorted by lower limit descending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<FeedbackRule>,
}

impl RuleTable {
    /// Validate and sort a candidate table
    pub fn new(mut rules: Vec<FeedbackRule>) -> Result<Self, RuleViolation> {
        validate(&rules)?;
        // Stable: rules sharing a limit keep their submitted order
        rules.sort_by(|a, b| b.lower_limit.cmp(&a.lower_limit));
        Ok(Self { rules })
    }

    /// Message of the most specific rule whose limit is reached by `count`
    pub fn resolve(&self, count: u64) -> &str {
        self.rules
            .iter()
            .find(|rule| u64::try_from(rule.lower_limit).is_ok_and(|limit| limit <= count))
            .or_else(|| self.rules.last())
            .map(|rule| rule.message.as_str())
            .unwrap_or_default()
    }

    pub fn rules(&self) -> &[FeedbackRule] {
        &self.rules
    }

    /// Wire representation of the table
    pub fn to_messages(&self) -> FeedbackMessages {
        FeedbackMessages::new(self.rules.clone())
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            rules: vec![
                FeedbackRule::new(3, "No, and we already told you so!"),
                FeedbackRule::new(0, "No"),
            ],
        }
    }
}

impl TryFrom<FeedbackMessages> for RuleTable {
    type Error = RuleViolation;

    fn try_from(messages: FeedbackMessages) -> Result<Self, Self::Error> {
        Self::new(messages.messages)
    }
}

/// Rules document as read back from storage
///
/// A missing or `null` `messages` field means no table was ever stored,
/// while an empty list is a stored table that fails validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRules {
    #[serde(default)]
    pub messages: Option<Vec<FeedbackRule>>,
}

impl Document for StoredRules {
    const ENTITY: &'static str = "messages";
}

fn validate(rules: &[FeedbackRule]) -> Result<(), RuleViolation> {
    let mut default_found = false;
    for rule in rules {
        if rule.lower_limit == 0 {
            if default_found {
                return Err(RuleViolation::MultipleDefaults { rule: rule.clone() });
            }
            default_found = true;
        }
        if rule.lower_limit < 0 {
            return Err(RuleViolation::NegativeLimit { rule: rule.clone() });
        }
    }
    if !default_found {
        return Err(RuleViolation::MissingDefault { rules: rules.to_vec() });
    }
    Ok(())
}
