//! Webserver library for the prime lookup service
//!
//! This library exposes the HTTP surface over the tally stores: primality
//! lookups with repeat-count feedback, lookup history and the feedback rules.

pub mod error;
pub mod state;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use webserver_impl::{WebServer, build_router};
