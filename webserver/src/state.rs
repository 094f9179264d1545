//! Webserver state management
//!
//! Shared handles to the stores, cloned into every request handler.

use std::sync::Arc;
use tally::{FeedbackRules, FileRepository, Storage, TallyStore, TallyResult};

#[derive(Clone)]
pub struct WebServerState {
    pub tallies: Arc<TallyStore>,
    pub rules: Arc<FeedbackRules>,
}

impl WebServerState {
    pub fn new(tallies: TallyStore, rules: FeedbackRules) -> Self {
        Self {
            tallies: Arc::new(tallies),
            rules: Arc::new(rules),
        }
    }

    /// Load (or create) both stores from a data directory
    pub async fn load(repository: FileRepository) -> TallyResult<Self> {
        let storage: Arc<dyn Storage> = Arc::new(repository);
        let tallies = TallyStore::setup(storage.clone()).await?;
        let rules = FeedbackRules::setup(storage).await?;
        Ok(Self::new(tallies, rules))
    }

    /// Flush pending writes of both stores
    pub async fn shutdown(&self) {
        self.tallies.shutdown().await;
        self.rules.shutdown().await;
    }
}
