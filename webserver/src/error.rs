//! WebServer-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::{Component, SharedError, component_error};
use tally::TallyError;
use thiserror::Error;

/// Body sent for every unknown route
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("HTTP server startup failed on {address}: {source}")]
    ServerStartupFailed {
        address: String,
        source: std::io::Error,
    },

    #[error("Not an integer: {input}")]
    NotAnInteger { input: String },

    #[error("Can't unmarshal request from {body}")]
    InvalidRequest { body: String },

    #[error("404 page not found")]
    NotFound,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error(transparent)]
    Tally(#[from] TallyError),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        WebServerError::ConfigError {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::NotAnInteger { .. } | WebServerError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            WebServerError::NotFound => StatusCode::NOT_FOUND,
            WebServerError::Tally(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            WebServerError::NotFound => NOT_FOUND_BODY.to_string(),
            other => format!("{other}\n"),
        };

        if status.is_server_error() {
            component_error!(Component::WebServer, "❌ Request failed: {}", self);
        }
        (status, body).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
