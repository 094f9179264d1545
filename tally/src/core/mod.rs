//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod feedback;
pub mod primality;
pub mod tally;

// Re-export commonly used types
pub use feedback::{RuleTable, StoredRules};
pub use primality::is_prime;
pub use tally::{CounterRecord, PRIME_MESSAGE, TallyTable};
