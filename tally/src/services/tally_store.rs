//! Tally store service
//!
//! Owns the per-number counters behind a single lock and hands every new
//! table state to its persister.

use shared::{Component, HistoryEntry, PrimeResponse, component_debug, component_info};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::{CounterRecord, PRIME_MESSAGE, TallyTable};
use crate::error::{TallyError, TallyResult};
use crate::services::feedback_rules::FeedbackRules;
use crate::services::file_repository::{load, save};
use crate::services::persister::Persister;
use crate::traits::{Document, Storage};

pub struct TallyStore {
    table: RwLock<TallyTable>,
    persister: Persister<TallyTable>,
}

impl TallyStore {
    /// Load the persisted table, or create and persist an empty one
    pub async fn setup(storage: Arc<dyn Storage>) -> TallyResult<Self> {
        let table = match load::<TallyTable>(storage.as_ref()).await? {
            Some(table) => {
                if let Some(number) = table.first_zero_count() {
                    return Err(TallyError::ZeroCount {
                        entity: TallyTable::ENTITY.to_string(),
                        number,
                    });
                }
                component_info!(Component::TallyStore, "📋 Loaded {} tallies", table.len());
                table
            }
            None => {
                let table = TallyTable::new();
                save(storage.as_ref(), &table).await?;
                component_info!(Component::TallyStore, "📋 Starting with an empty tally table");
                table
            }
        };

        Ok(Self::with_table(storage, table))
    }

    /// Wrap an existing table without touching storage
    pub fn with_table(storage: Arc<dyn Storage>, table: TallyTable) -> Self {
        let persister = Persister::spawn(Component::TallyStore, storage, table.clone());
        Self {
            table: RwLock::new(table),
            persister,
        }
    }

    /// Count one lookup of `number` and schedule the table for persisting
    pub async fn update(&self, number: i64) -> CounterRecord {
        let mut table = self.table.write().await;
        let record = table.observe(number);
        // Scheduled under the guard so the pending snapshot is always the newest
        self.persister.schedule(table.clone());
        component_debug!(Component::TallyStore, "🔢 {} seen {} time(s)", number, record.count);
        record
    }

    /// Current record of `number`, if it was ever looked up
    pub async fn record(&self, number: i64) -> Option<CounterRecord> {
        self.table.read().await.get(number)
    }

    /// Answer for `number`; only valid after `update(number)`
    pub async fn resolve(&self, number: i64, rules: &FeedbackRules) -> TallyResult<PrimeResponse> {
        let record = self
            .record(number)
            .await
            .ok_or(TallyError::UnknownNumber { number })?;

        let message = if record.is_prime {
            PRIME_MESSAGE.to_string()
        } else {
            rules.resolve(record.count).await
        };

        Ok(PrimeResponse {
            is_prime: record.is_prime,
            message,
        })
    }

    /// One entry per number looked up so far
    pub async fn snapshot(&self) -> Vec<HistoryEntry> {
        self.table.read().await.snapshot()
    }

    /// Flush the pending snapshot and stop persisting
    pub async fn shutdown(&self) {
        self.persister.close().await;
    }
}
