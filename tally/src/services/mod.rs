//! Service implementations
//!
//! Real implementations that touch the file system or spawn background tasks

pub mod feedback_rules;
pub mod file_repository;
pub mod persister;
pub mod tally_store;

pub use feedback_rules::FeedbackRules;
pub use file_repository::{FileRepository, load, save};
pub use persister::Persister;
pub use tally_store::TallyStore;
