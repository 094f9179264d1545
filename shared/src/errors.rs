//! Shared error types for the prime tally service

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Log directory {path} could not be prepared: {source}")]
    LogDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Log file {path} could not be opened: {source}")]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Tracing subscriber already installed: {message}")]
    TracingInit { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
