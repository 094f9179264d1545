//! Shared types for the prime tally service
//!
//! Contains the JSON wire shapes exchanged over HTTP and persisted to disk,
//! the component identity used in log lines, and the tracing setup used by
//! every binary in the workspace.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
