//! Tally library for the prime lookup service
//!
//! Keeps a per-number lookup counter with a cached primality verdict, resolves
//! feedback messages for non-primes from a configurable threshold table, and
//! persists both tables to JSON documents in the background.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use crate::core::{CounterRecord, RuleTable, TallyTable, is_prime};
pub use error::{RuleViolation, TallyError, TallyResult};
pub use services::{FeedbackRules, FileRepository, Persister, TallyStore, load, save};
pub use traits::{Document, Storage};
