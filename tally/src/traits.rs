//! Trait definitions with mockall annotations for testing
//!
//! Storage is abstracted behind a trait so the stores can be exercised
//! against mocks, and every persisted document names the entity it is
//! stored under.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::TallyResult;

/// Raw per-entity document storage
///
/// Each entity is stored as a single blob that is always overwritten as a
/// whole. No atomicity is provided across entities.
#[mockall::automock]
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the stored contents of an entity, `None` when nothing is stored
    async fn read(&self, entity: &str) -> TallyResult<Option<Vec<u8>>>;

    /// Replace the stored contents of an entity
    async fn write(&self, entity: &str, contents: Vec<u8>) -> TallyResult<()>;
}

/// Typed schema of one persisted entity
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Entity name, also the file stem on disk
    const ENTITY: &'static str;
}
