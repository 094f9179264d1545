//! Feedback rules service
//!
//! Holds the active rule table. Updates are validated first and then replace
//! the table wholesale; a rejected update leaves the active table untouched.

use shared::{Component, FeedbackMessages, component_info, component_warn};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::{RuleTable, StoredRules};
use crate::error::{TallyError, TallyResult};
use crate::services::file_repository::{load, save};
use crate::services::persister::Persister;
use crate::traits::{Document, Storage};

pub struct FeedbackRules {
    table: RwLock<RuleTable>,
    persister: Persister<FeedbackMessages>,
}

impl FeedbackRules {
    /// Load the persisted rules, or create and persist the default table
    ///
    /// A document without a `messages` list counts as absent. A stored table
    /// that breaks the rule invariants is rejected like a corrupt one.
    pub async fn setup(storage: Arc<dyn Storage>) -> TallyResult<Self> {
        let stored = load::<StoredRules>(storage.as_ref())
            .await?
            .and_then(|stored| stored.messages);

        let table = match stored {
            Some(rules) => {
                let table = RuleTable::new(rules).map_err(|source| TallyError::InvalidDocument {
                    entity: StoredRules::ENTITY.to_string(),
                    source,
                })?;
                component_info!(Component::FeedbackRules, "📋 Loaded {} feedback rules", table.rules().len());
                table
            }
            None => {
                let table = RuleTable::default();
                save(storage.as_ref(), &table.to_messages()).await?;
                component_info!(Component::FeedbackRules, "📋 Starting with the default feedback rules");
                table
            }
        };

        Ok(Self::with_table(storage, table))
    }

    /// Wrap an already validated table without touching storage
    pub fn with_table(storage: Arc<dyn Storage>, table: RuleTable) -> Self {
        let persister = Persister::spawn(Component::FeedbackRules, storage, table.to_messages());
        Self {
            table: RwLock::new(table),
            persister,
        }
    }

    /// Default rules without touching storage
    pub fn with_defaults(storage: Arc<dyn Storage>) -> Self {
        Self::with_table(storage, RuleTable::default())
    }

    /// Message for a non-prime that has been asked `count` times
    pub async fn resolve(&self, count: u64) -> String {
        self.table.read().await.resolve(count).to_string()
    }

    /// Validate and install a new table, then schedule it for persisting
    pub async fn update(&self, candidate: FeedbackMessages) -> TallyResult<()> {
        let validated = RuleTable::try_from(candidate).inspect_err(|violation| {
            component_warn!(Component::FeedbackRules, "⚠️ Rejected feedback rules: {}", violation);
        })?;

        let mut table = self.table.write().await;
        *table = validated;
        self.persister.schedule(table.to_messages());
        component_info!(Component::FeedbackRules, "✅ Installed {} feedback rules", table.rules().len());
        Ok(())
    }

    /// Active rules, sorted by lower limit descending
    pub async fn get(&self) -> FeedbackMessages {
        self.table.read().await.to_messages()
    }

    /// Flush the pending snapshot and stop persisting
    pub async fn shutdown(&self) {
        self.persister.close().await;
    }
}
